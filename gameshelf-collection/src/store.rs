//! Client-side cache of one user's records.
//!
//! The store is the only owner of the in-memory record set. Reads are served
//! from the cache; writes go through the gateway and are applied locally,
//! optimistically for updates.

use gameshelf_catalog::{
    GameGateway, GameId, GamePatch, GameRecord, GatewayError, NewGame, UserId, ValidationError,
};
use thiserror::Error;

use crate::queue::{PlayQueue, QueueError, ReorderOutcome};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Game {0} not found")]
    NotFound(GameId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl StoreError {
    /// True when the record no longer exists; callers fall back to the list.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Gateway(GatewayError::NotFound(_))
        )
    }
}

pub struct CollectionStore<G> {
    gateway: G,
    user_id: UserId,
    records: Vec<GameRecord>,
}

impl<G: GameGateway> CollectionStore<G> {
    /// An empty store. Call [`refresh`](Self::refresh) to load records.
    pub fn new(gateway: G, user_id: impl Into<UserId>) -> Self {
        Self {
            gateway,
            user_id: user_id.into(),
            records: Vec::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Cached records, newest first.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn get(&self, id: GameId) -> Option<&GameRecord> {
        self.records.iter().find(|g| g.id == id)
    }

    /// DLCs of `id`, in record order.
    pub fn dlcs_of(&self, id: GameId) -> Vec<&GameRecord> {
        self.records
            .iter()
            .filter(|g| g.parent_id == Some(id))
            .collect()
    }

    pub fn parent_of(&self, record: &GameRecord) -> Option<&GameRecord> {
        record.parent_id.and_then(|p| self.get(p))
    }

    /// Reload every record from the gateway.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.records = self.gateway.list_games(&self.user_id).await?;
        log::debug!("Loaded {} records for {}", self.records.len(), self.user_id);
        Ok(())
    }

    /// Fetch one record fresh from the gateway and update the cache.
    ///
    /// A record that no longer exists is dropped from the cache and reported
    /// as [`StoreError::NotFound`].
    pub async fn load_detail(&mut self, id: GameId) -> Result<&GameRecord, StoreError> {
        match self.gateway.get_game(&self.user_id, id).await {
            Ok(record) => {
                let idx = match self.position(id) {
                    Some(idx) => {
                        self.records[idx] = record;
                        idx
                    }
                    None => {
                        self.records.insert(0, record);
                        0
                    }
                };
                Ok(&self.records[idx])
            }
            Err(GatewayError::NotFound(_)) => {
                self.records.retain(|g| g.id != id && g.parent_id != Some(id));
                Err(StoreError::NotFound(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Validate and insert a new record. A parent must be a cached base game.
    pub async fn add_game(&mut self, game: NewGame) -> Result<&GameRecord, StoreError> {
        game.validate()?;
        if let Some(parent) = game.parent_id {
            match self.get(parent) {
                None => return Err(ValidationError::MissingParent(parent).into()),
                Some(p) if p.is_dlc() => return Err(ValidationError::NestedParent(parent).into()),
                Some(_) => {}
            }
        }
        let record = self.gateway.insert_game(&self.user_id, &game).await?;
        log::info!("Added '{}' ({})", record.title, record.platform);
        self.records.insert(0, record);
        Ok(&self.records[0])
    }

    /// Apply `patch` locally, then persist it. On failure the previous
    /// record is restored and the error returned.
    pub async fn update(&mut self, id: GameId, patch: GamePatch) -> Result<(), StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        patch.validate_against(&self.records[idx])?;
        if let Some(Some(parent)) = patch.parent_id {
            match self.get(parent) {
                None => return Err(ValidationError::MissingParent(parent).into()),
                Some(p) if p.is_dlc() => return Err(ValidationError::NestedParent(parent).into()),
                Some(_) => {}
            }
        }

        let snapshot = self.records[idx].clone();
        patch.apply(&mut self.records[idx]);

        if let Err(e) = self.gateway.update_game(&self.user_id, id, &patch).await {
            log::warn!("Update of game {} failed, restoring previous values: {}", id, e);
            if let Some(idx) = self.position(id) {
                self.records[idx] = snapshot;
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Save free-text notes. Blank text clears them.
    pub async fn save_notes(&mut self, id: GameId, notes: &str) -> Result<(), StoreError> {
        let notes = Some(notes.trim()).filter(|n| !n.is_empty()).map(str::to_string);
        self.update(id, GamePatch::notes(notes)).await
    }

    pub async fn set_cover(&mut self, id: GameId, url: &str) -> Result<(), StoreError> {
        self.update(id, GamePatch::image_url(url)).await
    }

    /// Delete a record. Deleting a base game also drops its DLCs.
    pub async fn delete(&mut self, id: GameId) -> Result<(), StoreError> {
        self.gateway.delete_game(&self.user_id, id).await?;
        let before = self.records.len();
        self.records.retain(|g| g.id != id && g.parent_id != Some(id));
        log::info!("Deleted game {} ({} records removed)", id, before - self.records.len());
        Ok(())
    }

    /// Move a queue item and record the new positions that were saved.
    pub async fn reorder_queue(
        &mut self,
        queue: &PlayQueue,
        moved_id: GameId,
        target_index: usize,
    ) -> Result<Option<ReorderOutcome>, StoreError> {
        let outcome = queue
            .reorder(&self.gateway, &self.user_id, &self.records, moved_id, target_index)
            .await?;
        if let Some(ref outcome) = outcome {
            for (id, order) in outcome.saved() {
                if let Some(idx) = self.position(id) {
                    self.records[idx].play_order = Some(order);
                }
            }
        }
        Ok(outcome)
    }

    /// Flip one record's queue visibility. Returns the new value.
    pub async fn toggle_queue_hidden(
        &mut self,
        queue: &PlayQueue,
        id: GameId,
    ) -> Result<bool, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        let hidden = queue
            .toggle_hidden(&self.gateway, &self.user_id, &self.records[idx])
            .await?;
        self.records[idx].is_hidden_in_queue = hidden;
        Ok(hidden)
    }

    fn position(&self, id: GameId) -> Option<usize> {
        self.records.iter().position(|g| g.id == id)
    }
}
