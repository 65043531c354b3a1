use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;

/// Bundled tournament document; `OMBRE_DATA` points at a replacement file.
pub const BUNDLED_DATA: &str = include_str!("../data/players.json");

const DATA_ENV: &str = "OMBRE_DATA";

static DATA: OnceCell<TournamentFile> = OnceCell::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentFile {
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub tournament: Tournament,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tournament {
    #[serde(default)]
    pub bracket: HashMap<String, Vec<Match>>,
    #[serde(default, alias = "losersBracket")]
    pub losers_bracket: HashMap<String, Vec<Match>>,
    #[serde(default)]
    pub champion: Option<String>,
    #[serde(default, alias = "losersChampion")]
    pub losers_champion: Option<String>,
    // An explicit list always wins over synthesis, even when it is empty.
    #[serde(default)]
    pub grand_final: Option<Vec<Match>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "teamA")]
    pub team_a: Option<String>,
    #[serde(default, rename = "teamB")]
    pub team_b: Option<String>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default, rename = "incomingTopFromPrevious")]
    pub incoming_top_from_previous: Option<bool>,
    #[serde(default, rename = "incomingBottomFromPrevious")]
    pub incoming_bottom_from_previous: Option<bool>,
}

pub fn tournament_data() -> Result<&'static TournamentFile> {
    DATA.get_or_try_init(load_tournament_file)
}

pub fn load_tournament_file() -> Result<TournamentFile> {
    if let Some(path) = data_override_path() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return parse_tournament_json(&raw)
            .with_context(|| format!("invalid tournament data in {}", path.display()));
    }
    parse_tournament_json(BUNDLED_DATA).context("invalid bundled tournament data")
}

pub fn data_source_note() -> String {
    match data_override_path() {
        Some(path) => format!("[INFO] Tournament data loaded from {}", path.display()),
        None => "[INFO] Tournament data loaded from the bundled document".to_string(),
    }
}

pub fn parse_tournament_json(raw: &str) -> Result<TournamentFile> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(TournamentFile::default());
    }
    serde_json::from_str(trimmed).context("invalid tournament json")
}

/// Seat scores split out of an "A-B" string; unparseable sides stay empty.
pub fn resolve_team_scores(score: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(raw) = score else {
        return (None, None);
    };
    let mut parts = raw.split('-');
    let top = parts.next().and_then(parse_score_part);
    let bottom = parts.next().and_then(parse_score_part);
    (top, bottom)
}

fn parse_score_part(part: &str) -> Option<u32> {
    part.trim().parse::<u32>().ok()
}

fn data_override_path() -> Option<PathBuf> {
    let raw = env::var(DATA_ENV).ok()?;
    non_empty(&raw).map(PathBuf::from)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
