use std::collections::VecDeque;

use crate::bracket::{self, RoundColumn};
use crate::dataset::TournamentFile;
use crate::layout::BracketSide;
use crate::standings::{self, StandingRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Ranking,
    Bracket,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSeat {
    pub side: BracketSide,
    pub column: usize,
    pub card: usize,
    pub bottom: bool,
    pub team: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub data: &'static TournamentFile,
    pub standings: Vec<StandingRow>,
    pub winners_columns: Vec<RoundColumn>,
    pub losers_columns: Vec<RoundColumn>,
    pub has_grand_final: bool,
    pub seats: Vec<BracketSeat>,
    pub ranking_selected: usize,
    pub ranking_search: String,
    pub ranking_search_active: bool,
    pub seat_cursor: Option<usize>,
    pub rules_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(data: &'static TournamentFile) -> Self {
        let standings = standings::compute_standings(&data.players, &data.tournament);
        let has_grand_final = !bracket::grand_final_rounds(&data.tournament).is_empty();
        let winners_columns = bracket::build_columns(
            BracketSide::Winners,
            &bracket::winners_rounds(&data.tournament),
            false,
        );
        let losers_columns = bracket::build_columns(
            BracketSide::Losers,
            &bracket::losers_rounds(&data.tournament),
            has_grand_final,
        );
        let seats = collect_seats(&winners_columns, &losers_columns);

        Self {
            screen: Screen::Ranking,
            data,
            standings,
            winners_columns,
            losers_columns,
            has_grand_final,
            seats,
            ranking_selected: 0,
            ranking_search: String::new(),
            ranking_search_active: false,
            seat_cursor: None,
            rules_scroll: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.data.players.len()
    }

    pub fn has_any_bracket(&self) -> bool {
        !self.winners_columns.is_empty() || !self.losers_columns.is_empty()
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.ranking_search_active = false;
    }

    pub fn cycle_screen(&mut self) {
        let next = match self.screen {
            Screen::Ranking => Screen::Bracket,
            Screen::Bracket => Screen::Rules,
            Screen::Rules => Screen::Ranking,
        };
        self.set_screen(next);
    }

    pub fn filtered_standings(&self) -> Vec<&StandingRow> {
        standings::filter_standings(&self.standings, &self.ranking_search)
    }

    pub fn selected_standing(&self) -> Option<&StandingRow> {
        self.filtered_standings()
            .get(self.ranking_selected)
            .copied()
    }

    pub fn select_ranking_next(&mut self) {
        let total = self.filtered_standings().len();
        if total == 0 {
            self.ranking_selected = 0;
            return;
        }
        self.ranking_selected = (self.ranking_selected + 1) % total;
    }

    pub fn select_ranking_prev(&mut self) {
        let total = self.filtered_standings().len();
        if total == 0 {
            self.ranking_selected = 0;
            return;
        }
        if self.ranking_selected == 0 {
            self.ranking_selected = total - 1;
        } else {
            self.ranking_selected -= 1;
        }
    }

    pub fn clamp_ranking_selection(&mut self) {
        let total = self.filtered_standings().len();
        if total == 0 {
            self.ranking_selected = 0;
        } else if self.ranking_selected >= total {
            self.ranking_selected = total - 1;
        }
    }

    pub fn search_push(&mut self, c: char) {
        self.ranking_search.push(c);
        self.clamp_ranking_selection();
    }

    pub fn search_pop(&mut self) {
        self.ranking_search.pop();
        self.clamp_ranking_selection();
    }

    pub fn clear_search(&mut self) {
        self.ranking_search.clear();
        self.ranking_search_active = false;
        self.clamp_ranking_selection();
    }

    pub fn hovered_team(&self) -> Option<&str> {
        let cursor = self.seat_cursor?;
        self.seats.get(cursor)?.team.as_deref()
    }

    pub fn cursor_seat(&self) -> Option<&BracketSeat> {
        self.seats.get(self.seat_cursor?)
    }

    pub fn seat_next(&mut self) {
        if self.seats.is_empty() {
            self.seat_cursor = None;
            return;
        }
        self.seat_cursor = Some(match self.seat_cursor {
            Some(cursor) => (cursor + 1) % self.seats.len(),
            None => 0,
        });
    }

    pub fn seat_prev(&mut self) {
        if self.seats.is_empty() {
            self.seat_cursor = None;
            return;
        }
        self.seat_cursor = Some(match self.seat_cursor {
            Some(0) | None => self.seats.len() - 1,
            Some(cursor) => cursor - 1,
        });
    }

    pub fn seat_column_next(&mut self) {
        let starts = self.column_starts();
        if starts.is_empty() {
            return;
        }
        let next = match self.current_column_position(&starts) {
            Some(position) => (position + 1) % starts.len(),
            None => 0,
        };
        self.seat_cursor = Some(starts[next]);
    }

    pub fn seat_column_prev(&mut self) {
        let starts = self.column_starts();
        if starts.is_empty() {
            return;
        }
        let previous = match self.current_column_position(&starts) {
            Some(0) | None => starts.len() - 1,
            Some(position) => position - 1,
        };
        self.seat_cursor = Some(starts[previous]);
    }

    pub fn seat_other_side(&mut self) {
        let current_side = match self.cursor_seat() {
            Some(seat) => seat.side,
            None => BracketSide::Losers,
        };
        let target = match current_side {
            BracketSide::Winners => BracketSide::Losers,
            BracketSide::Losers => BracketSide::Winners,
        };
        if let Some(index) = self.seats.iter().position(|seat| seat.side == target) {
            self.seat_cursor = Some(index);
        }
    }

    pub fn clear_hover(&mut self) {
        self.seat_cursor = None;
    }

    pub fn scroll_rules_down(&mut self, max_scroll: u16) {
        if self.rules_scroll < max_scroll {
            self.rules_scroll += 1;
        }
    }

    pub fn scroll_rules_up(&mut self) {
        self.rules_scroll = self.rules_scroll.saturating_sub(1);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn column_starts(&self) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut previous: Option<(BracketSide, usize)> = None;
        for (index, seat) in self.seats.iter().enumerate() {
            let group = (seat.side, seat.column);
            if previous != Some(group) {
                starts.push(index);
                previous = Some(group);
            }
        }
        starts
    }

    fn current_column_position(&self, starts: &[usize]) -> Option<usize> {
        let cursor = self.seat_cursor?;
        starts.iter().rposition(|&start| start <= cursor)
    }
}

/// Cursor order: winners columns then losers, cards top down, top seat first.
pub fn collect_seats(winners: &[RoundColumn], losers: &[RoundColumn]) -> Vec<BracketSeat> {
    let mut seats = Vec::new();
    for (side, columns) in [
        (BracketSide::Winners, winners),
        (BracketSide::Losers, losers),
    ] {
        for (column_index, column) in columns.iter().enumerate() {
            for (card_index, card) in column.cards.iter().enumerate() {
                for (bottom, team) in [
                    (false, card.fixture.team_a.as_deref()),
                    (true, card.fixture.team_b.as_deref()),
                ] {
                    seats.push(BracketSeat {
                        side,
                        column: column_index,
                        card: card_index,
                        bottom,
                        team: team.filter(|name| !name.is_empty()).map(str::to_string),
                    });
                }
            }
        }
    }
    seats
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Ranking => "Classement",
        Screen::Bracket => "Bracket",
        Screen::Rules => "Regles",
    }
}
