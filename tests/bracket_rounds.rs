use ombre_terminal::bracket::{
    build_columns, grand_final_rounds, losers_rounds, normalize_rounds, promotion_winner,
    round_label, winners_rounds,
};
use ombre_terminal::dataset::{Tournament, parse_tournament_json};
use ombre_terminal::layout::BracketSide;

fn tournament(doc: &str) -> Tournament {
    parse_tournament_json(doc)
        .expect("test document should parse")
        .tournament
}

#[test]
fn rounds_follow_canonical_order_and_drop_empty() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {
                    "final": [{"id": "f1"}],
                    "round_of_16": [],
                    "quarterfinals": [{"id": "q1"}],
                    "semifinals": [{"id": "s1"}]
                }
            }
        }"#,
    );

    let rounds = normalize_rounds(&t.bracket);
    let keys: Vec<&str> = rounds.iter().map(|round| round.key.as_str()).collect();
    assert_eq!(keys, ["quarterfinals", "semifinals", "final"]);
}

#[test]
fn unknown_rounds_sort_after_known_lexically() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {
                    "zz_exhibition": [{"id": "z1"}],
                    "aa_showmatch": [{"id": "a1"}],
                    "final": [{"id": "f1"}]
                }
            }
        }"#,
    );

    let rounds = normalize_rounds(&t.bracket);
    let keys: Vec<&str> = rounds.iter().map(|round| round.key.as_str()).collect();
    assert_eq!(keys, ["final", "aa_showmatch", "zz_exhibition"]);
}

#[test]
fn labels_cover_known_keys_and_fall_back_to_the_key() {
    assert_eq!(round_label("quarterfinals"), "Quarterfinals");
    assert_eq!(round_label("losers_round_2"), "Losers Round 2");
    assert_eq!(round_label("grand_final"), "Grand Final");
    // No table entry: underscores become spaces.
    assert_eq!(round_label("losers_grand_final"), "losers grand final");
    assert_eq!(round_label("third_place"), "third place");
}

#[test]
fn grand_final_synthesized_from_both_champions() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {"final": [{"id": "f1", "winner": "Ana"}]},
                "champion": "Ana",
                "losers_champion": "Zoe"
            }
        }"#,
    );

    let rounds = winners_rounds(&t);
    let last = rounds.last().expect("winners rounds should not be empty");
    assert_eq!(last.key, "grand_final");
    assert_eq!(last.matches.len(), 1);
    let gf = &last.matches[0];
    assert_eq!(gf.id, "grand-final-m1");
    assert_eq!(gf.team_a.as_deref(), Some("Ana"));
    assert_eq!(gf.team_b.as_deref(), Some("Zoe"));
    assert_eq!(gf.winner.as_deref(), Some("Ana"));
}

#[test]
fn explicit_grand_final_list_wins_even_when_empty() {
    let t = tournament(
        r#"{
            "tournament": {
                "champion": "Ana",
                "losers_champion": "Zoe",
                "grand_final": []
            }
        }"#,
    );
    assert!(grand_final_rounds(&t).is_empty());

    let t = tournament(
        r#"{
            "tournament": {
                "champion": "Ana",
                "losers_champion": "Zoe",
                "grand_final": [{"id": "gf9", "teamA": "Zoe", "teamB": "Ana"}]
            }
        }"#,
    );
    let rounds = grand_final_rounds(&t);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].matches[0].id, "gf9");
    assert!(rounds[0].matches[0].winner.is_none());
}

#[test]
fn blank_or_missing_champion_suppresses_synthesis() {
    let t = tournament(r#"{"tournament": {"champion": "", "losers_champion": "Zoe"}}"#);
    assert!(grand_final_rounds(&t).is_empty());

    let t = tournament(r#"{"tournament": {"champion": "Ana"}}"#);
    assert!(grand_final_rounds(&t).is_empty());
}

#[test]
fn links_derive_from_previous_round_winners() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {
                    "semifinals": [
                        {"id": "s1", "teamA": "Ana", "teamB": "Bea", "winner": "Ana"},
                        {"id": "s2", "teamA": "Cyr", "teamB": "Dom", "winner": "Cyr"}
                    ],
                    "final": [
                        {"id": "f1", "teamA": "Ana", "teamB": "Eve"}
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Winners, &winners_rounds(&t), false);
    assert_eq!(columns.len(), 2);

    // First round seats never link backwards.
    assert!(!columns[0].cards[0].top.incoming);
    assert!(!columns[0].cards[0].bottom.incoming);

    let final_card = &columns[1].cards[0];
    assert!(final_card.top.incoming);
    assert!(!final_card.top.cross_bracket);
    // Eve won nothing in the previous round and this is not a grand final.
    assert!(!final_card.bottom.incoming);
}

#[test]
fn override_flags_beat_derivation() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {
                    "semifinals": [
                        {"id": "s1", "teamA": "Ana", "teamB": "Bea", "winner": "Ana"}
                    ],
                    "final": [
                        {
                            "id": "f1",
                            "teamA": "Ana",
                            "teamB": null,
                            "incomingTopFromPrevious": false,
                            "incomingBottomFromPrevious": true
                        }
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Winners, &winners_rounds(&t), false);
    let final_card = &columns[1].cards[0];
    assert!(!final_card.top.incoming);
    assert!(final_card.bottom.incoming);
}

#[test]
fn grand_final_entrant_from_losers_is_cross_bracket() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {
                    "final": [{"id": "f1", "teamA": "Ana", "teamB": "Bea", "winner": "Ana"}]
                },
                "champion": "Ana",
                "losers_champion": "Zoe"
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Winners, &winners_rounds(&t), false);
    let gf = &columns[1].cards[0];
    assert!(gf.top.incoming);
    assert!(!gf.top.cross_bracket);
    assert!(gf.bottom.incoming);
    assert!(gf.bottom.cross_bracket);
}

#[test]
fn losers_entrants_link_from_outside_the_tree() {
    let t = tournament(
        r#"{
            "tournament": {
                "losers_bracket": {
                    "losers_round_1": [
                        {"id": "l1", "teamA": "Bea", "teamB": "Dom", "winner": "Bea"}
                    ],
                    "losers_round_2": [
                        {"id": "l2", "teamA": "Bea", "teamB": "Cyr"}
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Losers, &losers_rounds(&t), false);
    let card = &columns[1].cards[0];
    assert!(card.top.incoming);
    assert!(!card.top.cross_bracket);
    // Cyr drops in from the winners side: linked, but not grand-final styled.
    assert!(card.bottom.incoming);
    assert!(!card.bottom.cross_bracket);
}

#[test]
fn condensed_losers_final_reuses_previous_spacing() {
    let t = tournament(
        r#"{
            "tournament": {
                "losers_bracket": {
                    "losers_round_1": [
                        {"id": "l1"}, {"id": "l2"}, {"id": "l3"}
                    ],
                    "losers_final": [
                        {"id": "l4"}, {"id": "l5"}
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Losers, &losers_rounds(&t), false);
    assert_eq!(columns[0].gap, 14);
    assert_eq!(columns[0].offset, 7);
    // Two finals against three predecessors: same gap, slid down half a pitch.
    assert_eq!(columns[1].gap, 14);
    assert_eq!(columns[1].offset, 55);
}

#[test]
fn ordinary_two_card_rounds_keep_the_grid_layout() {
    let t = tournament(
        r#"{
            "tournament": {
                "losers_bracket": {
                    "losers_round_1": [
                        {"id": "l1"}, {"id": "l2"}, {"id": "l3"}
                    ],
                    "losers_round_2": [
                        {"id": "l4"}, {"id": "l5"}
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Losers, &losers_rounds(&t), false);
    assert_eq!(columns[1].gap, 14);
    assert_eq!(columns[1].offset, 7);
}

#[test]
fn promotion_rail_marks_last_column_and_names_its_winner() {
    let t = tournament(
        r#"{
            "tournament": {
                "losers_bracket": {
                    "losers_final": [
                        {"id": "l1", "teamA": "Zoe", "teamB": "Bea", "winner": "Zoe"}
                    ],
                    "losers_grand_final": [
                        {"id": "l2", "teamA": "Zoe", "teamB": "Cyr", "winner": "Zoe"}
                    ]
                }
            }
        }"#,
    );

    let with_rail = build_columns(BracketSide::Losers, &losers_rounds(&t), true);
    assert!(!with_rail[0].promotion_column);
    assert!(with_rail[1].promotion_column);
    assert_eq!(promotion_winner(&with_rail[1]), Some("Zoe"));

    let without_rail = build_columns(BracketSide::Losers, &losers_rounds(&t), false);
    assert!(!without_rail[1].promotion_column);
    assert_eq!(promotion_winner(&without_rail[1]), None);
}

#[test]
fn promotion_winner_requires_the_losers_grand_final_round() {
    let t = tournament(
        r#"{
            "tournament": {
                "losers_bracket": {
                    "losers_final": [
                        {"id": "l1", "teamA": "Zoe", "teamB": "Bea", "winner": "Zoe"}
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Losers, &losers_rounds(&t), true);
    assert!(columns[0].promotion_column);
    assert_eq!(promotion_winner(&columns[0]), None);
}

#[test]
fn outgoing_edges_need_a_next_round_and_a_winner() {
    let t = tournament(
        r#"{
            "tournament": {
                "bracket": {
                    "semifinals": [
                        {"id": "s1", "teamA": "Ana", "teamB": "Bea", "winner": "Ana"},
                        {"id": "s2", "teamA": "Cyr", "teamB": "Dom"}
                    ],
                    "final": [
                        {"id": "f1", "teamA": "Ana", "teamB": "Cyr", "winner": "Ana"}
                    ]
                }
            }
        }"#,
    );

    let columns = build_columns(BracketSide::Winners, &winners_rounds(&t), false);
    assert!(columns[0].cards[0].has_outgoing);
    assert!(!columns[0].cards[1].has_outgoing);
    // Last round has nowhere to go.
    assert!(!columns[1].cards[0].has_outgoing);
}
