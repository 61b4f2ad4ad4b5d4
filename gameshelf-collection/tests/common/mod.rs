#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};
use gameshelf_catalog::{
    Format, GameGateway, GameId, GamePatch, GameRecord, GatewayError, NewGame, Platform, Status,
};
use tokio::sync::Semaphore;

pub fn game(id: GameId, title: &str) -> GameRecord {
    GameRecord {
        id,
        user_id: "u1".to_string(),
        title: title.to_string(),
        platform: Platform::Pc,
        format: Format::Digital,
        status: Status::Pending,
        image_url: None,
        critic_score: 0,
        user_rating: None,
        started_at: None,
        finished_at: None,
        notes: None,
        description: None,
        screenshots: vec![],
        play_order: None,
        is_hidden_in_queue: false,
        parent_id: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id),
    }
}

pub fn queued(id: GameId, title: &str, order: i64) -> GameRecord {
    let mut g = game(id, title);
    g.play_order = Some(order);
    g
}

/// In-memory gateway. Updates for ids in `failing` return a backend error;
/// when `gate` is set, every update waits for a permit first.
pub struct FakeGateway {
    pub records: Mutex<Vec<GameRecord>>,
    pub failing: HashSet<GameId>,
    pub gate: Option<Semaphore>,
    pub updates: Mutex<Vec<(GameId, GamePatch)>>,
}

impl FakeGateway {
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            failing: HashSet::new(),
            gate: None,
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, ids: impl IntoIterator<Item = GameId>) -> Self {
        self.failing = ids.into_iter().collect();
        self
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn open_gate(&self) {
        if let Some(ref gate) = self.gate {
            gate.add_permits(1000);
        }
    }

    pub fn stored(&self, id: GameId) -> Option<GameRecord> {
        self.records.lock().unwrap().iter().find(|g| g.id == id).cloned()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

impl GameGateway for FakeGateway {
    async fn list_games(&self, _user_id: &str) -> Result<Vec<GameRecord>, GatewayError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get_game(&self, _user_id: &str, id: GameId) -> Result<GameRecord, GatewayError> {
        self.stored(id).ok_or(GatewayError::NotFound(id))
    }

    async fn insert_game(&self, user_id: &str, game: &NewGame) -> Result<GameRecord, GatewayError> {
        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let mut record = crate::common::game(id, &game.title);
        record.user_id = user_id.to_string();
        record.platform = game.platform_or_default();
        record.status = game.status;
        record.parent_id = game.parent_id;
        records.insert(0, record.clone());
        Ok(record)
    }

    async fn update_game(
        &self,
        _user_id: &str,
        id: GameId,
        patch: &GamePatch,
    ) -> Result<(), GatewayError> {
        if let Some(ref gate) = self.gate {
            let _permit = gate.acquire().await.unwrap();
        }
        self.updates.lock().unwrap().push((id, patch.clone()));
        if self.failing.contains(&id) {
            return Err(GatewayError::backend("connection reset"));
        }
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        patch.apply(record);
        Ok(())
    }

    async fn delete_game(&self, _user_id: &str, id: GameId) -> Result<(), GatewayError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|g| g.id != id && g.parent_id != Some(id));
        if records.len() == before {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }
}
