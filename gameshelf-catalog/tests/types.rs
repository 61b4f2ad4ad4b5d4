use chrono::{NaiveDate, TimeZone, Utc};
use gameshelf_catalog::*;

fn record() -> GameRecord {
    GameRecord {
        id: 7,
        user_id: "u1".to_string(),
        title: "Hollow Knight".to_string(),
        platform: Platform::Switch,
        format: Format::Digital,
        status: Status::Pending,
        image_url: None,
        critic_score: 87,
        user_rating: None,
        started_at: None,
        finished_at: None,
        notes: None,
        description: None,
        screenshots: vec![],
        play_order: Some(3),
        is_hidden_in_queue: false,
        parent_id: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn patch_applies_only_set_fields() {
    let mut game = record();
    let patch = GamePatch {
        status: Some(Status::Playing),
        user_rating: Some(Some(8.5)),
        ..Default::default()
    };
    patch.apply(&mut game);
    assert_eq!(game.status, Status::Playing);
    assert_eq!(game.user_rating, Some(8.5));
    assert_eq!(game.title, "Hollow Knight");
    assert_eq!(game.play_order, Some(3));
}

#[test]
fn patch_can_clear_nullable_fields() {
    let mut game = record();
    GamePatch {
        play_order: Some(None),
        ..Default::default()
    }
    .apply(&mut game);
    assert_eq!(game.play_order, None);
}

#[test]
fn rating_must_be_on_half_point_grid() {
    assert!(validate_user_rating(0.0).is_ok());
    assert!(validate_user_rating(7.5).is_ok());
    assert!(validate_user_rating(10.0).is_ok());
    assert_eq!(validate_user_rating(7.3), Err(ValidationError::UserRating(7.3)));
    assert_eq!(validate_user_rating(10.5), Err(ValidationError::UserRating(10.5)));
    assert_eq!(validate_user_rating(-0.5), Err(ValidationError::UserRating(-0.5)));
}

#[test]
fn patch_checks_dates_against_current_record() {
    let mut game = record();
    game.started_at = Some(date(2024, 5, 10));

    let bad = GamePatch {
        finished_at: Some(Some(date(2024, 5, 1))),
        ..Default::default()
    };
    assert!(matches!(
        bad.validate_against(&game),
        Err(ValidationError::FinishedBeforeStarted { .. })
    ));

    let good = GamePatch {
        finished_at: Some(Some(date(2024, 6, 1))),
        ..Default::default()
    };
    assert!(good.validate_against(&game).is_ok());
}

#[test]
fn patch_rejects_self_parent() {
    let game = record();
    let patch = GamePatch {
        parent_id: Some(Some(game.id)),
        ..Default::default()
    };
    assert_eq!(
        patch.validate_against(&game),
        Err(ValidationError::SelfParent(7))
    );
}

#[test]
fn new_game_validation() {
    let mut game = NewGame::new("  ", Platform::Pc);
    assert_eq!(game.validate(), Err(ValidationError::EmptyTitle));
    game.title = "Celeste".to_string();
    game.critic_score = 101;
    assert_eq!(game.validate(), Err(ValidationError::CriticScore(101)));
    game.critic_score = 92;
    assert!(game.validate().is_ok());
}

#[test]
fn empty_patch_is_empty() {
    assert!(GamePatch::default().is_empty());
    assert!(!GamePatch::play_order(0).is_empty());
}

#[test]
fn record_deserializes_with_missing_optional_fields() {
    let json = r#"{
        "id": 1, "user_id": "u", "title": "Zelda", "platform": "Switch",
        "format": "Physical", "status": "Pendiente",
        "created_at": "2024-03-01T10:00:00Z"
    }"#;
    let game: GameRecord = serde_json::from_str(json).unwrap();
    assert_eq!(game.status, Status::Pending);
    assert!(game.screenshots.is_empty());
    assert!(!game.is_hidden_in_queue);
    assert!(!game.is_dlc());
}
