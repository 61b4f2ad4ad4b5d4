mod common;

use common::{FakeGateway, game, queued};
use gameshelf_catalog::{
    GameGateway, GamePatch, GatewayError, NewGame, Platform, Status, ValidationError,
};
use gameshelf_collection::{CollectionStore, PlayQueue, StoreError};
use gameshelf_db::LocalGateway;

async fn loaded(gateway: FakeGateway) -> CollectionStore<FakeGateway> {
    let mut store = CollectionStore::new(gateway, "u1");
    store.refresh().await.unwrap();
    store
}

#[tokio::test]
async fn refresh_loads_records() {
    let store = loaded(FakeGateway::new(vec![game(1, "A"), game(2, "B")])).await;
    assert_eq!(store.records().len(), 2);
    assert_eq!(store.get(2).unwrap().title, "B");
}

#[tokio::test]
async fn failed_update_restores_the_previous_record() {
    let mut original = game(1, "Okami");
    original.user_rating = Some(7.0);
    let gateway = FakeGateway::new(vec![original.clone()]).failing([1]);
    let mut store = loaded(gateway).await;

    let patch = GamePatch {
        status: Some(Status::Completed),
        user_rating: Some(Some(9.0)),
        ..Default::default()
    };
    let err = store.update(1, patch).await.unwrap_err();
    assert!(matches!(err, StoreError::Gateway(GatewayError::Backend(_))));
    assert_eq!(store.get(1), Some(&original));
}

#[tokio::test]
async fn successful_update_is_applied_locally() {
    let gateway = FakeGateway::new(vec![game(1, "Okami")]);
    let mut store = loaded(gateway).await;

    store
        .update(
            1,
            GamePatch {
                status: Some(Status::Playing),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(store.get(1).unwrap().status, Status::Playing);
    assert_eq!(store.gateway().stored(1).unwrap().status, Status::Playing);
}

#[tokio::test]
async fn invalid_patch_never_reaches_the_gateway() {
    let gateway = FakeGateway::new(vec![game(1, "Okami")]);
    let mut store = loaded(gateway).await;

    let patch = GamePatch {
        user_rating: Some(Some(11.0)),
        ..Default::default()
    };
    assert!(matches!(
        store.update(1, patch).await,
        Err(StoreError::Validation(ValidationError::UserRating(_)))
    ));
    assert_eq!(store.gateway().update_count(), 0);
}

#[tokio::test]
async fn update_of_unknown_record_is_not_found() {
    let mut store = loaded(FakeGateway::new(vec![])).await;
    let err = store.update(9, GamePatch::play_order(0)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn notes_are_trimmed_and_blank_clears() {
    let mut store = loaded(FakeGateway::new(vec![game(1, "Okami")])).await;
    store.save_notes(1, "  Beat the final boss \n").await.unwrap();
    assert_eq!(store.get(1).unwrap().notes.as_deref(), Some("Beat the final boss"));

    store.save_notes(1, "   ").await.unwrap();
    assert_eq!(store.get(1).unwrap().notes, None);
}

#[tokio::test]
async fn add_checks_the_parent_locally() {
    let mut dlc = game(2, "Expansion");
    dlc.parent_id = Some(1);
    let mut store = loaded(FakeGateway::new(vec![game(1, "Base"), dlc])).await;

    let mut nested = NewGame::new("Nested", Platform::Pc);
    nested.parent_id = Some(2);
    assert!(matches!(
        store.add_game(nested).await,
        Err(StoreError::Validation(ValidationError::NestedParent(2)))
    ));

    let mut missing = NewGame::new("Orphan", Platform::Pc);
    missing.parent_id = Some(77);
    assert!(matches!(
        store.add_game(missing).await,
        Err(StoreError::Validation(ValidationError::MissingParent(77)))
    ));

    let mut ok = NewGame::new("Second Expansion", Platform::Pc);
    ok.parent_id = Some(1);
    let added = store.add_game(ok).await.unwrap();
    assert_eq!(added.parent_id, Some(1));
    assert_eq!(store.records()[0].title, "Second Expansion");
    assert_eq!(store.dlcs_of(1).len(), 2);
}

#[tokio::test]
async fn delete_removes_dlcs_locally() {
    let mut dlc = game(2, "Expansion");
    dlc.parent_id = Some(1);
    let mut store = loaded(FakeGateway::new(vec![game(1, "Base"), dlc, game(3, "Other")])).await;

    store.delete(1).await.unwrap();
    let ids: Vec<_> = store.records().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![3]);
}

#[tokio::test]
async fn detail_of_deleted_record_falls_back() {
    let gateway = LocalGateway::in_memory().unwrap();
    let record = gateway
        .insert_game("u1", &NewGame::new("Celeste", Platform::Pc))
        .await
        .unwrap();
    let mut store = CollectionStore::new(gateway, "u1");
    store.refresh().await.unwrap();

    assert_eq!(store.load_detail(record.id).await.unwrap().title, "Celeste");

    store.gateway().delete_game("u1", record.id).await.unwrap();
    let err = store.load_detail(record.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(store.get(record.id).is_none());
}

#[tokio::test]
async fn reorder_updates_cached_positions() {
    let records = vec![queued(1, "Zelda", 0), queued(2, "Mario", 1)];
    let mut store = loaded(FakeGateway::new(records)).await;
    let queue = PlayQueue::new();

    let outcome = store.reorder_queue(&queue, 2, 0).await.unwrap().unwrap();
    assert!(outcome.is_complete());
    assert_eq!(store.get(2).unwrap().play_order, Some(0));
    assert_eq!(store.get(1).unwrap().play_order, Some(1));
}

#[tokio::test]
async fn failed_queue_writes_leave_cache_unchanged() {
    let records = vec![queued(1, "Zelda", 0), queued(2, "Mario", 1)];
    let mut store = loaded(FakeGateway::new(records).failing([1])).await;
    let queue = PlayQueue::new();

    store.reorder_queue(&queue, 2, 0).await.unwrap();
    assert_eq!(store.get(2).unwrap().play_order, Some(0));
    assert_eq!(store.get(1).unwrap().play_order, Some(0));
}

#[tokio::test]
async fn toggle_hidden_updates_cache() {
    let mut store = loaded(FakeGateway::new(vec![queued(1, "Zelda", 0)])).await;
    let queue = PlayQueue::new();

    assert!(store.toggle_queue_hidden(&queue, 1).await.unwrap());
    assert!(store.get(1).unwrap().is_hidden_in_queue);
    assert!(!store.toggle_queue_hidden(&queue, 1).await.unwrap());
    assert_eq!(store.get(1).unwrap().play_order, Some(0));
}
