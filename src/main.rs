use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use ombre_terminal::bracket::{self, LOSERS_GRAND_FINAL_KEY, RoundColumn, promotion_winner};
use ombre_terminal::classes;
use ombre_terminal::dataset::{self, Player, resolve_team_scores};
use ombre_terminal::layout::{BracketSide, CARD_ROWS, px_to_rows};
use ombre_terminal::state::{AppState, BracketSeat, Screen, screen_label};

const CARD_WIDTH: u16 = 24;
const COLUMN_GUTTER: u16 = 2;

struct App {
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new(state: AppState) -> Self {
        let tick_ms = std::env::var("OMBRE_TICK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        Self {
            state,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.ranking_search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_screen(Screen::Ranking),
            KeyCode::Char('2') => self.state.set_screen(Screen::Bracket),
            KeyCode::Char('3') => self.state.set_screen(Screen::Rules),
            KeyCode::Tab => self.state.cycle_screen(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => match self.state.screen {
                Screen::Ranking => self.on_ranking_key(key),
                Screen::Bracket => self.on_bracket_key(key),
                Screen::Rules => self.on_rules_key(key),
            },
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.state.ranking_search_active = false,
            KeyCode::Backspace => self.state.search_pop(),
            KeyCode::Up => self.state.select_ranking_prev(),
            KeyCode::Down => self.state.select_ranking_next(),
            KeyCode::Char(c) => self.state.search_push(c),
            _ => {}
        }
    }

    fn on_ranking_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => self.state.ranking_search_active = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_ranking_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_ranking_prev(),
            KeyCode::Esc => self.state.clear_search(),
            _ => {}
        }
    }

    fn on_bracket_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.seat_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.seat_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.seat_column_next(),
            KeyCode::Char('h') | KeyCode::Left => self.state.seat_column_prev(),
            KeyCode::Char('a') => self.state.seat_other_side(),
            KeyCode::Esc => self.state.clear_hover(),
            _ => {}
        }
    }

    fn on_rules_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_rules_down(rules_max_scroll()),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_rules_up(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    // The document loads before the terminal switches modes.
    let data = dataset::tournament_data()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(AppState::new(data));
    app.state.push_log(dataset::data_source_note());
    app.state.push_log(format!(
        "[INFO] {} participants, {} winners columns, {} losers columns",
        app.state.participant_count(),
        app.state.winners_columns.len(),
        app.state.losers_columns.len()
    ));
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Ranking => render_ranking(frame, chunks[1], &app.state),
        Screen::Bracket => render_bracket(frame, chunks[1], &app.state),
        Screen::Rules => render_rules(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size(), &app.state);
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!(
        "Dofus - Tournoi Ombre - PvP 2v2 | {}",
        screen_label(state.screen)
    );
    let line2 = format!(
        "Edition III - {} participants. 1 point pour une victoire, 0 pour une defaite.",
        state.participant_count()
    );
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.ranking_search_active {
        return "Entree/Echap Terminer la saisie | Retour Effacer | Fleches Naviguer".to_string();
    }
    match state.screen {
        Screen::Ranking => {
            "1/2/3 Ecrans | Tab Suivant | / Rechercher | j/k Naviguer | Echap Effacer | ? Aide | q Quitter"
                .to_string()
        }
        Screen::Bracket => {
            "1/2/3 Ecrans | Tab Suivant | j/k Sieges | h/l Colonnes | a Autre arbre | Echap Reset | ? Aide | q Quitter"
                .to_string()
        }
        Screen::Rules => {
            "1/2/3 Ecrans | Tab Suivant | j/k Defiler | ? Aide | q Quitter".to_string()
        }
    }
}

fn render_ranking(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let mut heading = vec![Line::styled(
        "Classement actuel",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(last_updated) = state.data.last_updated.as_deref() {
        heading.push(Line::styled(
            format!(
                "Derniere mise a jour: {}",
                format_last_updated(last_updated)
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(heading), sections[0]);

    render_search_box(frame, sections[1], state);

    let widths = ranking_columns();
    render_ranking_header(frame, sections[2], &widths);

    let list_area = sections[3];
    let filtered = state.filtered_standings();
    if filtered.is_empty() {
        let empty = Paragraph::new("Aucun joueur ne correspond a la recherche")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    const ROW_HEIGHT: u16 = 1;
    let visible = (list_area.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(state.ranking_selected, filtered.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + (i as u16) * ROW_HEIGHT,
            width: list_area.width,
            height: ROW_HEIGHT,
        };

        let selected = idx == state.ranking_selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = filtered[idx];
        let rank = format!("#{}", row.rank);
        let points = row.points.to_string();

        render_cell_text(frame, cols[0], &rank, row_style);
        if row.classes.is_empty() {
            render_cell_text(
                frame,
                cols[1],
                "Aucune classe",
                row_style.fg(Color::DarkGray),
            );
        } else {
            let badges = class_badges_text(&row.classes);
            render_cell_text(frame, cols[1], &badges, row_style);
        }
        render_cell_text(frame, cols[2], &row.name, row_style);
        render_cell_text(frame, cols[3], &points, row_style);
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &AppState) {
    let border_style = if state.ranking_search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title("Rechercher un joueur")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let text = if state.ranking_search.is_empty() && !state.ranking_search_active {
        Line::styled("Ex: Skrys", Style::default().fg(Color::DarkGray))
    } else if state.ranking_search_active {
        Line::from(vec![
            Span::raw(state.ranking_search.clone()),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::raw(state.ranking_search.clone())
    };
    frame.render_widget(Paragraph::new(text), inner);
}

fn ranking_columns() -> [Constraint; 4] {
    [
        Constraint::Length(6),
        Constraint::Length(24),
        Constraint::Min(16),
        Constraint::Length(8),
    ]
}

fn render_ranking_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "#", style);
    render_cell_text(frame, cols[1], "Classes", style);
    render_cell_text(frame, cols[2], "Joueur", style);
    render_cell_text(frame, cols[3], "Points", style);
}

fn class_badges_text(class_names: &[String]) -> String {
    class_names
        .iter()
        .map(|name| classes::class_badge(name))
        .collect::<Vec<_>>()
        .join(" ")
}

struct TreeContext<'a> {
    body: Rect,
    scroll: u16,
    hovered: Option<&'a str>,
    cursor: Option<&'a BracketSeat>,
    players: &'a [Player],
}

fn render_bracket(frame: &mut Frame, area: Rect, state: &AppState) {
    if !state.has_any_bracket() {
        let empty = Paragraph::new("Aucun bracket disponible dans les donnees.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let mut heading: Vec<Line> = Vec::new();
    let mut title_spans = vec![Span::styled(
        "Bracket du tournoi",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(team) = state.hovered_team() {
        title_spans.push(Span::raw("  "));
        title_spans.push(Span::styled(
            format!("Survol: {team}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    heading.push(Line::from(title_spans));
    if let Some(winner) = bracket::champion(&state.data.tournament) {
        heading.push(Line::styled(
            format!("Champion du winner bracket: {winner}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(winner) = bracket::losers_champion(&state.data.tournament) {
        heading.push(Line::styled(
            format!("Champion du loser bracket: {winner}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let heading_height = heading.len() as u16;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(heading_height), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(heading), sections[0]);

    let body = sections[1];
    let show_bridge = state.has_grand_final && !state.losers_columns.is_empty();

    match (
        state.winners_columns.is_empty(),
        state.losers_columns.is_empty(),
    ) {
        (false, true) => {
            render_tree(
                frame,
                body,
                "Winner Bracket",
                &state.winners_columns,
                BracketSide::Winners,
                state,
            );
        }
        (true, false) => {
            let mut losers_area = body;
            if show_bridge {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(1)])
                    .split(body);
                render_bridge(frame, chunks[0]);
                losers_area = chunks[1];
            }
            render_tree(
                frame,
                losers_area,
                "Loser Bracket",
                &state.losers_columns,
                BracketSide::Losers,
                state,
            );
        }
        _ => {
            let constraints = if show_bridge {
                vec![
                    Constraint::Percentage(50),
                    Constraint::Length(1),
                    Constraint::Min(4),
                ]
            } else {
                vec![Constraint::Percentage(50), Constraint::Min(4)]
            };
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(body);
            render_tree(
                frame,
                chunks[0],
                "Winner Bracket",
                &state.winners_columns,
                BracketSide::Winners,
                state,
            );
            let losers_area = if show_bridge {
                render_bridge(frame, chunks[1]);
                chunks[2]
            } else {
                chunks[1]
            };
            render_tree(
                frame,
                losers_area,
                "Loser Bracket",
                &state.losers_columns,
                BracketSide::Losers,
                state,
            );
        }
    }
}

fn render_bridge(frame: &mut Frame, area: Rect) {
    let bridge = Paragraph::new("Loser bracket winner remonte en grand final")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(bridge, area);
}

fn render_tree(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    columns: &[RoundColumn],
    side: BracketSide,
    state: &AppState,
) {
    if area.height < 2 || columns.is_empty() {
        return;
    }

    let title_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
        title_area,
    );

    let body = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    // One label row per column, cards below it.
    if body.height < CARD_ROWS + 1 {
        let empty = Paragraph::new("Le bracket a besoin de plus de hauteur")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, body);
        return;
    }

    let column_pitch = CARD_WIDTH + COLUMN_GUTTER;
    let visible_columns = (body.width / column_pitch).max(1) as usize;
    let cursor = state.cursor_seat().filter(|seat| seat.side == side);
    let focus_column = cursor.map(|seat| seat.column).unwrap_or(0);
    let (start, end) = visible_range(focus_column, columns.len(), visible_columns);

    let viewport = body.height - 1;
    let content = columns.iter().map(column_content_rows).max().unwrap_or(0);
    let max_scroll = content.saturating_sub(viewport);
    let scroll = match cursor {
        Some(seat) => {
            let column = &columns[seat.column];
            let seat_row = card_top_row(column, seat.card).saturating_add(seat_row_offset(seat));
            seat_row.saturating_sub(viewport / 2).min(max_scroll)
        }
        None => 0,
    };

    let ctx = TreeContext {
        body,
        scroll,
        hovered: state.hovered_team(),
        cursor,
        players: &state.data.players,
    };
    for (i, column_index) in (start..end).enumerate() {
        let x = body.x + (i as u16) * column_pitch;
        render_round_column(frame, &ctx, x, &columns[column_index], column_index);
    }
}

fn render_round_column(
    frame: &mut Frame,
    ctx: &TreeContext,
    x: u16,
    column: &RoundColumn,
    column_index: usize,
) {
    let label_style = if column.promotion_column {
        let promoted = promotion_winner(column);
        if promoted.is_some() && promoted == ctx.hovered {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        }
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    };
    let label = if column.promotion_column {
        format!("{} ^", column.label)
    } else {
        column.label.clone()
    };
    let label_area = Rect {
        x,
        y: ctx.body.y,
        width: CARD_WIDTH,
        height: 1,
    };
    frame.render_widget(Paragraph::new(label).style(label_style), label_area);

    let cards_top = ctx.body.y + 1;
    let viewport = ctx.body.height - 1;

    for card_index in 0..column.cards.len() {
        let top = card_top_row(column, card_index);
        if top < ctx.scroll || top as u32 + CARD_ROWS as u32 > ctx.scroll as u32 + viewport as u32 {
            continue;
        }
        let card_area = Rect {
            x,
            y: cards_top + (top - ctx.scroll),
            width: CARD_WIDTH,
            height: CARD_ROWS,
        };
        render_match_card(frame, ctx, card_area, column, column_index, card_index);
    }
}

fn render_match_card(
    frame: &mut Frame,
    ctx: &TreeContext,
    area: Rect,
    column: &RoundColumn,
    column_index: usize,
    card_index: usize,
) {
    let card = &column.cards[card_index];
    let winner = card.fixture.winner.as_deref().filter(|w| !w.is_empty());
    let outgoing_highlighted = winner.is_some() && winner == ctx.hovered;

    let border_style = if outgoing_highlighted {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(block, area);

    let (top_score, bottom_score) = resolve_team_scores(card.fixture.score.as_deref());

    for bottom in [false, true] {
        let team = if bottom {
            card.fixture.team_b.as_deref()
        } else {
            card.fixture.team_a.as_deref()
        };
        let team = team.filter(|name| !name.is_empty());
        let links = if bottom { card.bottom } else { card.top };
        let score = if bottom { bottom_score } else { top_score };
        let seat_row = area.y + if bottom { 2 } else { 1 };
        let seat_area = Rect {
            x: area.x + 1,
            y: seat_row,
            width: CARD_WIDTH - 2,
            height: 1,
        };

        let is_winner = winner.is_some() && winner == team;
        let highlighted = team.is_some() && team == ctx.hovered;
        let under_cursor = ctx.cursor.is_some_and(|seat| {
            seat.column == column_index && seat.card == card_index && seat.bottom == bottom
        });

        if highlighted || under_cursor {
            frame.render_widget(
                Block::default().style(Style::default().bg(Color::DarkGray)),
                seat_area,
            );
        }

        let promotes = column.key == LOSERS_GRAND_FINAL_KEY && is_winner;
        let line = seat_line(ctx.players, team, score, is_winner, under_cursor, promotes);
        frame.render_widget(Paragraph::new(line), seat_area);

        // Incoming connector sits in the gutter to the left of the card.
        if links.incoming && area.x > ctx.body.x {
            let glyph = if links.cross_bracket { "═" } else { "─" };
            let style = if highlighted {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let cell = Rect {
                x: area.x - 1,
                y: seat_row,
                width: 1,
                height: 1,
            };
            frame.render_widget(Paragraph::new(glyph).style(style), cell);
        }

        // Outgoing connector leaves from the winner seat.
        if card.has_outgoing && is_winner {
            let out_x = area.x + CARD_WIDTH;
            if out_x < ctx.body.x + ctx.body.width {
                let style = if outgoing_highlighted {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let cell = Rect {
                    x: out_x,
                    y: seat_row,
                    width: 1,
                    height: 1,
                };
                frame.render_widget(Paragraph::new("─").style(style), cell);
            }
        }
    }
}

fn seat_line(
    players: &[Player],
    team: Option<&str>,
    score: Option<u32>,
    is_winner: bool,
    under_cursor: bool,
    promotes: bool,
) -> Line<'static> {
    let marker = if under_cursor {
        Span::styled(
            "» ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    } else if is_winner {
        Span::styled("▸ ", Style::default().fg(Color::Green))
    } else {
        Span::raw("  ")
    };

    let name_style = if promotes {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if is_winner {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if team.is_none() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = vec![marker];
    match team {
        Some(name) => {
            spans.push(Span::styled(name.to_string(), name_style));
            let badges = classes_for(players, name)
                .map(class_badges_text)
                .unwrap_or_default();
            if !badges.is_empty() {
                spans.push(Span::styled(
                    format!(" {badges}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        None => spans.push(Span::styled("TBD", name_style)),
    }
    if let Some(value) = score {
        spans.push(Span::styled(
            format!(" {value}"),
            Style::default().fg(Color::White),
        ));
    }
    Line::from(spans)
}

fn classes_for<'a>(players: &'a [Player], name: &str) -> Option<&'a [String]> {
    players
        .iter()
        .find(|player| player.name == name)
        .map(|player| player.classes.as_slice())
}

fn column_content_rows(column: &RoundColumn) -> u16 {
    let cards = column.cards.len() as u64;
    if cards == 0 {
        return 0;
    }
    let gap_rows = px_to_rows(column.gap) as u64;
    let rows =
        px_to_rows(column.offset) as u64 + cards * CARD_ROWS as u64 + (cards - 1) * gap_rows;
    rows.min(u16::MAX as u64) as u16
}

fn card_top_row(column: &RoundColumn, card_index: usize) -> u16 {
    let gap_rows = px_to_rows(column.gap) as u64;
    let row = px_to_rows(column.offset) as u64 + card_index as u64 * (CARD_ROWS as u64 + gap_rows);
    row.min(u16::MAX as u64) as u16
}

fn seat_row_offset(seat: &BracketSeat) -> u16 {
    if seat.bottom { 2 } else { 1 }
}

const RULES_TEXT: &str = "\
1) Les classes

Chaque classe vaut des points selon le systeme suivant :
- 5 points : Osamodas
- 4 points : Huppermage, Xelor et Ecaflip
- 3,5 points : Eniripsa, Sadida et Forgelance
- 3 points : Iop, Zobal, Steamer, Eliotrope, Sacrieur, Panda et Ouginak
- 2,5 points : Feca
- 2 points : Enutrof, Sram, Cra et Roublard

La somme des points de l'equipe doit etre de 6 maximum.
La valeur de chaque classe a ete determinee par le comite strategique
compose de Coach Shangai, Ryk, Shura et Nde.
Avec la beta, il est possible qu'Ankama distribue encore quelques up ou nerfs.

2) Limitations d'equipement

Certains objets sont proscrits du fait de leur rarete/prix sur le serveur Ombre :
- Dofus interdits : Ebene, Ivoire, Vulbis, Tachete, Forgelave, Cauchemar,
  Nebuleux et Sylvestre.
- Gargandias : panoplie et corps a corps autorises, mais pas en degats neutres.
- Botte Meriana : exclue.

Vous avez le droit de changer d'equipement a chaque combat.
- Les limitations de retraits PA ou PM sont fixees a 85 maximum.
- Vous ne pouvez pas utiliser de trophee, familier ou monture donnant des do-pou.
- Les items legendaires et familiers legendaires sont autorises.
  (Toutes les dragodindes, Muldo et Volk sont up)

3) Regles generales

- A partir du 16eme tour, le premier coup fatal determine le vainqueur.
- A partir du 21eme tour, l'equipe qui possede le plus de HP gagne.
- Vous avez le droit de jouer des stuffs ou equipements pretes pour l'occasion.
- Il y a une tolerance de 5 minutes de retard, sinon c'est disqualifie.
- Si vous pensez que vos adversaires ne respectent pas une regle, vous pouvez
  demander un screen de leur stuff avec le combat en arriere-plan pendant le
  combat. Ils devront partager le screen sur Discord avant la fin du match.
- Si vous trouvez les regles trop contraignantes, vous pouvez jouer une compo
  lvl 180 MAX sans aucune restriction.";

fn rules_max_scroll() -> u16 {
    (RULES_TEXT.lines().count() as u16).saturating_sub(1)
}

fn render_rules(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines: Vec<Line> = RULES_TEXT
        .lines()
        .map(|raw| {
            if raw.starts_with(|c: char| c.is_ascii_digit()) && raw.contains(')') {
                Line::styled(raw, Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::raw(raw)
            }
        })
        .collect();

    let rules = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Reglement du tournoi PvP")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.rules_scroll, 0));
    frame.render_widget(rules, area);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn format_last_updated(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return "-".to_string();
    }
    if let Some(dt) = parse_last_updated(cleaned) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    cleaned.to_string()
}

fn parse_last_updated(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        "Tournoi Ombre - Aide".to_string(),
        String::new(),
        "Global:".to_string(),
        "  1 / 2 / 3    Classement / Bracket / Regles".to_string(),
        "  Tab          Ecran suivant".to_string(),
        "  ?            Afficher l'aide".to_string(),
        "  q            Quitter".to_string(),
        String::new(),
        "Classement:".to_string(),
        "  /            Rechercher un joueur".to_string(),
        "  j/k          Naviguer".to_string(),
        "  Echap        Effacer la recherche".to_string(),
        String::new(),
        "Bracket:".to_string(),
        "  j/k          Siege precedent/suivant".to_string(),
        "  h/l          Colonne precedente/suivante".to_string(),
        "  a            Autre arbre".to_string(),
        "  Echap        Retirer le survol".to_string(),
        String::new(),
        "Console:".to_string(),
    ];
    let recent: Vec<&String> = state.logs.iter().rev().take(3).collect();
    if recent.is_empty() {
        lines.push("  (vide)".to_string());
    } else {
        for log in recent.into_iter().rev() {
            lines.push(format!("  {log}"));
        }
    }

    let help = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Aide").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
