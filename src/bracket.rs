use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::dataset::{Match, Tournament};
use crate::layout::{self, BracketSide};

pub const GRAND_FINAL_KEY: &str = "grand_final";
pub const LOSERS_GRAND_FINAL_KEY: &str = "losers_grand_final";

#[derive(Debug, Clone)]
pub struct BracketRound {
    pub key: String,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLinks {
    pub incoming: bool,
    pub cross_bracket: bool,
}

#[derive(Debug, Clone)]
pub struct MatchCard {
    pub fixture: Match,
    pub top: SeatLinks,
    pub bottom: SeatLinks,
    pub has_outgoing: bool,
}

/// One render-ready column: ordered cards plus spacing in page pixels.
#[derive(Debug, Clone)]
pub struct RoundColumn {
    pub key: String,
    pub label: String,
    pub cards: Vec<MatchCard>,
    pub gap: u32,
    pub offset: u32,
    pub promotion_column: bool,
}

fn round_order(key: &str) -> Option<u8> {
    let order = match key {
        "round_of_64" => 1,
        "round_of_32" => 2,
        "round_of_16" => 3,
        "quarterfinals" => 4,
        "semifinals" => 5,
        "final" => 6,
        "grand_final" => 7,
        "grand_final_reset" => 8,
        "losers_round_1" => 1,
        "losers_round_2" => 2,
        "losers_semifinals" => 3,
        "losers_final" => 4,
        "losers_grand_final" => 5,
        _ => return None,
    };
    Some(order)
}

pub fn round_label(key: &str) -> String {
    let label = match key {
        "round_of_64" => "Round of 64",
        "round_of_32" => "Round of 32",
        "round_of_16" => "Round of 16",
        "quarterfinals" => "Quarterfinals",
        "semifinals" => "Semifinals",
        "final" => "Final",
        "losers_round_1" => "Losers Round 1",
        "losers_round_2" => "Losers Round 2",
        "losers_semifinals" => "Losers Semifinals",
        "losers_final" => "Losers Final",
        "grand_final" => "Grand Final",
        "grand_final_reset" => "Grand Final Reset",
        _ => return key.replace('_', " "),
    };
    label.to_string()
}

/// Non-empty rounds in display order: known keys first, unknown keys after,
/// lexically among themselves.
pub fn normalize_rounds(bracket: &HashMap<String, Vec<Match>>) -> Vec<BracketRound> {
    let mut rounds: Vec<BracketRound> = bracket
        .iter()
        .filter(|(_, matches)| !matches.is_empty())
        .map(|(key, matches)| BracketRound {
            key: key.clone(),
            matches: matches.clone(),
        })
        .collect();
    rounds.sort_by(|a, b| match (round_order(&a.key), round_order(&b.key)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.key.cmp(&b.key),
    });
    rounds
}

pub fn champion(tournament: &Tournament) -> Option<&str> {
    tournament.champion.as_deref().filter(|name| !name.is_empty())
}

pub fn losers_champion(tournament: &Tournament) -> Option<&str> {
    tournament
        .losers_champion
        .as_deref()
        .filter(|name| !name.is_empty())
}

/// Grand final for the winners tree: the explicit list when present, else a
/// synthesized match once both champions are known. Explicit empty suppresses.
pub fn grand_final_rounds(tournament: &Tournament) -> Vec<BracketRound> {
    let matches = match &tournament.grand_final {
        Some(explicit) => explicit.clone(),
        None => match (champion(tournament), losers_champion(tournament)) {
            (Some(winner), Some(loser_side_winner)) => vec![Match {
                id: "grand-final-m1".to_string(),
                team_a: Some(winner.to_string()),
                team_b: Some(loser_side_winner.to_string()),
                winner: Some(winner.to_string()),
                ..Match::default()
            }],
            _ => Vec::new(),
        },
    };
    if matches.is_empty() {
        return Vec::new();
    }
    vec![BracketRound {
        key: GRAND_FINAL_KEY.to_string(),
        matches,
    }]
}

pub fn winners_rounds(tournament: &Tournament) -> Vec<BracketRound> {
    let mut rounds = normalize_rounds(&tournament.bracket);
    rounds.extend(grand_final_rounds(tournament));
    rounds
}

pub fn losers_rounds(tournament: &Tournament) -> Vec<BracketRound> {
    normalize_rounds(&tournament.losers_bracket)
}

// Link flags only ever look one round back, at the previous winner set.
pub fn build_columns(
    side: BracketSide,
    rounds: &[BracketRound],
    show_promotion_rail: bool,
) -> Vec<RoundColumn> {
    let mut columns = Vec::with_capacity(rounds.len());
    let mut previous_winners: HashSet<String> = HashSet::new();
    let mut previous_layout_index: Option<usize> = None;
    let mut previous_match_count = 0usize;

    for (round_index, round) in rounds.iter().enumerate() {
        let layout_index = layout::layout_round_index(side, round_index, &round.key);
        let mut column_layout = layout::round_layout(layout_index as u32);

        // A two-card losers final between three-card semifinals keeps the
        // previous spacing and slides down half a pitch.
        if side == BracketSide::Losers
            && round.key == "losers_final"
            && round.matches.len() == 2
            && previous_match_count == 3
        {
            if let Some(previous_index) = previous_layout_index {
                column_layout =
                    layout::centered_final_layout(layout::round_layout(previous_index as u32));
            }
        }

        let has_next_round = round_index + 1 < rounds.len();
        let promotion_column = show_promotion_rail && round_index + 1 == rounds.len();

        let cards: Vec<MatchCard> = round
            .matches
            .iter()
            .map(|fixture| {
                let top = seat_links(
                    side,
                    &round.key,
                    round_index,
                    &previous_winners,
                    fixture.team_a.as_deref(),
                    fixture.incoming_top_from_previous,
                );
                let bottom = seat_links(
                    side,
                    &round.key,
                    round_index,
                    &previous_winners,
                    fixture.team_b.as_deref(),
                    fixture.incoming_bottom_from_previous,
                );
                MatchCard {
                    fixture: fixture.clone(),
                    top,
                    bottom,
                    has_outgoing: has_next_round
                        && fixture.winner.as_deref().is_some_and(|w| !w.is_empty()),
                }
            })
            .collect();

        columns.push(RoundColumn {
            key: round.key.clone(),
            label: round_label(&round.key),
            cards,
            gap: column_layout.gap,
            offset: column_layout.offset,
            promotion_column,
        });

        previous_winners = round
            .matches
            .iter()
            .filter_map(|m| m.winner.clone())
            .filter(|w| !w.is_empty())
            .collect();
        previous_layout_index = Some(layout_index);
        previous_match_count = round.matches.len();
    }

    columns
}

pub fn promotion_winner(column: &RoundColumn) -> Option<&str> {
    if !column.promotion_column || column.key != LOSERS_GRAND_FINAL_KEY {
        return None;
    }
    column
        .cards
        .first()
        .and_then(|card| card.fixture.winner.as_deref())
        .filter(|winner| !winner.is_empty())
}

fn seat_links(
    side: BracketSide,
    round_key: &str,
    round_index: usize,
    previous_winners: &HashSet<String>,
    team: Option<&str>,
    override_flag: Option<bool>,
) -> SeatLinks {
    let team = team.filter(|name| !name.is_empty());
    let from_previous = match override_flag {
        Some(flag) => flag,
        None => match team {
            Some(name) if round_index > 0 => previous_winners.contains(name),
            _ => false,
        },
    };
    let cross_bracket = round_key == GRAND_FINAL_KEY
        && round_index > 0
        && team.is_some_and(|name| !previous_winners.contains(name));
    let outside_losers = side == BracketSide::Losers
        && round_index > 0
        && team.is_some_and(|name| !previous_winners.contains(name));
    SeatLinks {
        incoming: from_previous || cross_bracket || outside_losers,
        cross_bracket,
    }
}
