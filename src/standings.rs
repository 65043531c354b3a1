use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::dataset::{Player, Tournament};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub name: String,
    pub classes: Vec<String>,
    pub points: u32,
    pub rank: u32,
}

/// One point per match won in either bracket; the explicit grand final list
/// never counts.
pub fn resolve_player_points(players: &[Player], tournament: &Tournament) -> HashMap<String, u32> {
    let mut points: HashMap<String, u32> =
        players.iter().map(|p| (p.name.clone(), 0)).collect();
    let rounds = tournament
        .bracket
        .values()
        .chain(tournament.losers_bracket.values());
    for matches in rounds {
        for m in matches {
            let Some(winner) = m.winner.as_deref() else {
                continue;
            };
            if let Some(total) = points.get_mut(winner) {
                *total += 1;
            }
        }
    }
    points
}

pub fn compute_standings(players: &[Player], tournament: &Tournament) -> Vec<StandingRow> {
    let points_by_name = resolve_player_points(players, tournament);
    let mut rows: Vec<StandingRow> = players
        .iter()
        .map(|player| StandingRow {
            name: player.name.clone(),
            classes: player.classes.clone(),
            points: points_by_name.get(&player.name).copied().unwrap_or(0),
            rank: 0,
        })
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));

    let mut previous_points: Option<u32> = None;
    let mut current_rank = 0u32;
    for (index, row) in rows.iter_mut().enumerate() {
        if previous_points != Some(row.points) {
            current_rank = index as u32 + 1;
            previous_points = Some(row.points);
        }
        row.rank = current_rank;
    }
    rows
}

/// Lowercase and strip diacritics, so "osk" finds "Öskar".
pub fn normalize_search(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

// Ranks were assigned before the filter, so they do not shift while typing.
pub fn filter_standings<'a>(rows: &'a [StandingRow], query: &str) -> Vec<&'a StandingRow> {
    let needle = normalize_search(query.trim());
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| normalize_search(&row.name).contains(&needle))
        .collect()
}
