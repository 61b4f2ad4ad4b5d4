use clap::Parser;
use gameshelf_catalog::{GameId, GameRecord};

use super::*;
use crate::cli_types::{Cli, Commands};

fn record(id: GameId, title: &str, parent_id: Option<GameId>) -> GameRecord {
    GameRecord {
        id,
        user_id: "u1".to_string(),
        title: title.to_string(),
        parent_id,
        ..Default::default()
    }
}

fn shelf() -> Vec<GameRecord> {
    vec![
        record(1, "Elden Ring", None),
        record(2, "Shadow of the Erdtree", Some(1)),
        record(3, "Dark Souls", None),
        record(4, "Dark Souls III", None),
    ]
}

#[test]
fn parent_title_resolves_single_base_game() {
    assert_eq!(resolve_parent(&shelf(), "elden").unwrap(), 1);
}

#[test]
fn parent_title_skips_dlcs() {
    let err = resolve_parent(&shelf(), "erdtree").unwrap_err();
    assert!(err.to_string().contains("No base game matches"));
}

#[test]
fn parent_title_prefers_exact_match() {
    assert_eq!(resolve_parent(&shelf(), "dark souls").unwrap(), 3);
}

#[test]
fn ambiguous_parent_title_lists_candidates() {
    let err = resolve_parent(&shelf(), "r").unwrap_err().to_string();
    assert!(err.contains("#1 Elden Ring"), "{}", err);
    assert!(err.contains("#4 Dark Souls III"), "{}", err);
    assert!(!err.contains("Erdtree"), "{}", err);
}

#[test]
fn dlc_parent_flags_are_exclusive() {
    let cli = Cli::try_parse_from(["gameshelf", "add", "erdtree", "--dlc-of-title", "elden"]).unwrap();
    let Commands::Add { dlc_of_title, .. } = cli.command else {
        panic!("expected add");
    };
    assert_eq!(dlc_of_title.as_deref(), Some("elden"));

    assert!(
        Cli::try_parse_from([
            "gameshelf", "add", "erdtree", "--dlc-of", "1", "--dlc-of-title", "elden",
        ])
        .is_err()
    );
}
