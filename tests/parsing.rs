use std::fs;
use std::path::PathBuf;

use ombre_terminal::bracket::winners_rounds;
use ombre_terminal::classes::{class_badge, class_badge_key};
use ombre_terminal::dataset::{BUNDLED_DATA, parse_tournament_json, resolve_team_scores};
use ombre_terminal::standings::compute_standings;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_fixture_with_camel_case_aliases() {
    let raw = read_fixture("players.json");
    let file = parse_tournament_json(&raw).expect("fixture should parse");

    assert_eq!(file.last_updated.as_deref(), Some("2025-02-14T18:05"));
    assert_eq!(file.players.len(), 3);
    assert!(file.players[1].classes.is_empty());

    let t = &file.tournament;
    assert!(t.bracket.contains_key("final"));
    // "losersBracket" and "losersChampion" land in the snake_case fields.
    assert!(t.losers_bracket.contains_key("losers_final"));
    assert_eq!(t.losers_champion.as_deref(), Some("Zoe"));
    assert!(t.grand_final.is_none());

    let lf = &t.losers_bracket["losers_final"][0];
    assert!(lf.team_b.is_none());
    assert_eq!(resolve_team_scores(lf.score.as_deref()), (Some(2), None));
}

#[test]
fn null_and_blank_documents_fall_back_to_empty() {
    for doc in ["null", "", "   \n"] {
        let file = parse_tournament_json(doc).expect("lenient document should parse");
        assert!(file.players.is_empty());
        assert!(file.tournament.bracket.is_empty());
        assert!(file.last_updated.is_none());
    }
}

#[test]
fn player_without_name_is_an_error() {
    assert!(parse_tournament_json(r#"{"players": [{"classes": ["Iop"]}]}"#).is_err());
}

#[test]
fn garbage_documents_are_errors() {
    assert!(parse_tournament_json("{not json").is_err());
    assert!(parse_tournament_json(r#"{"players": 42}"#).is_err());
}

#[test]
fn score_splitting_tolerates_junk() {
    assert_eq!(resolve_team_scores(Some("3-1")), (Some(3), Some(1)));
    assert_eq!(resolve_team_scores(Some("2 - 1")), (Some(2), Some(1)));
    assert_eq!(resolve_team_scores(Some("2-x")), (Some(2), None));
    assert_eq!(resolve_team_scores(Some("x-1")), (None, Some(1)));
    assert_eq!(resolve_team_scores(Some("7")), (Some(7), None));
    assert_eq!(resolve_team_scores(Some("3-1-9")), (Some(3), Some(1)));
    assert_eq!(resolve_team_scores(Some("")), (None, None));
    assert_eq!(resolve_team_scores(None), (None, None));
}

#[test]
fn class_badges_normalize_known_spellings() {
    assert_eq!(class_badge_key("iop"), Some("iop"));
    assert_eq!(class_badge_key("Écaflip"), Some("eca"));
    assert_eq!(class_badge_key("HUPPERMAGE"), Some("hupper"));
    assert_eq!(class_badge_key("  sacrieur  "), Some("sacri"));
    assert_eq!(class_badge_key("Osamodas"), None);

    assert_eq!(class_badge("Iop"), "[IOP]");
    assert_eq!(class_badge("pandawa"), "[PANDA]");
    // Unknown spellings fall back to the raw trimmed name.
    assert_eq!(class_badge(" Eliotrope "), "Eliotrope");
}

#[test]
fn bundled_document_is_valid_and_ranks_its_players() {
    let file = parse_tournament_json(BUNDLED_DATA).expect("bundled data should parse");
    assert_eq!(file.players.len(), 12);
    assert_eq!(file.tournament.champion.as_deref(), Some("Skrys"));

    let rows = compute_standings(&file.players, &file.tournament);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].name, "Skrys");
    assert_eq!(rows[0].points, 4);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[1].name, "Öskar");
    assert_eq!(rows[1].rank, 1);
    assert_eq!(rows[2].rank, 3);

    // Both champions are present, so the winners tree ends in a grand final.
    let rounds = winners_rounds(&file.tournament);
    assert_eq!(
        rounds.last().map(|round| round.key.as_str()),
        Some("grand_final")
    );
}
