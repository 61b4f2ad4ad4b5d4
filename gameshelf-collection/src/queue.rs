//! The play queue: an ordered backlog of pending games.
//!
//! Order lives in each record's `play_order`. A reorder rewrites the order of
//! every displayed item as its index, one gateway update per item, all in
//! flight at once. Hidden items that are not displayed keep their values.

use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::join_all;
use gameshelf_catalog::{GameGateway, GameId, GamePatch, GameRecord, GatewayError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("A queue update is already being saved")]
    SaveInProgress,

    #[error("Game {0} is not in the displayed queue")]
    UnknownItem(GameId),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// What the queue screen should show.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueDisplay<'a> {
    Items(Vec<&'a GameRecord>),
    /// Nothing pending, or nothing at all while hidden items are shown.
    Empty,
    /// Every pending game is hidden; offer to reveal them.
    AllHidden { hidden: usize },
}

/// The result of moving one item: the new order of the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub order: Vec<GameId>,
    pub from: usize,
    pub to: usize,
}

impl ReorderPlan {
    /// `(id, play_order)` for every displayed item.
    pub fn assignments(&self) -> impl Iterator<Item = (GameId, i64)> + '_ {
        self.order.iter().enumerate().map(|(i, &id)| (id, i as i64))
    }
}

/// Outcome of a dispatched reorder batch.
#[derive(Debug)]
pub struct ReorderOutcome {
    pub order: Vec<GameId>,
    /// Items whose update failed. Their stored order is unchanged.
    pub failed: Vec<(GameId, GatewayError)>,
}

impl ReorderOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// `(id, play_order)` for the updates that were stored.
    pub fn saved(&self) -> impl Iterator<Item = (GameId, i64)> + '_ {
        self.order
            .iter()
            .enumerate()
            .filter(|(_, id)| !self.failed.iter().any(|(f, _)| f == *id))
            .map(|(i, &id)| (id, i as i64))
    }
}

/// Queue display state plus the in-flight guard for saves.
#[derive(Debug, Default)]
pub struct PlayQueue {
    show_hidden: bool,
    saving: AtomicBool,
}

/// Clears the saving flag when the batch finishes, whatever the outcome.
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn set_show_hidden(&mut self, show: bool) {
        self.show_hidden = show;
    }

    pub fn toggle_show_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
    }

    /// True while a batch of updates is outstanding.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    fn begin_save(&self) -> Result<SavingGuard<'_>, QueueError> {
        self.saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| QueueError::SaveInProgress)?;
        Ok(SavingGuard(&self.saving))
    }

    /// Pending records in queue order. Unordered records go last; ties fall
    /// back to creation time, then id.
    pub fn working_list<'a>(&self, records: &'a [GameRecord]) -> Vec<&'a GameRecord> {
        let mut items: Vec<&GameRecord> = records
            .iter()
            .filter(|g| g.is_pending())
            .filter(|g| self.show_hidden || !g.is_hidden_in_queue)
            .collect();
        items.sort_by(|a, b| {
            let order = match (a.play_order, b.play_order) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            order
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }

    pub fn display<'a>(&self, records: &'a [GameRecord]) -> QueueDisplay<'a> {
        let items = self.working_list(records);
        if !items.is_empty() {
            return QueueDisplay::Items(items);
        }
        let hidden = records
            .iter()
            .filter(|g| g.is_pending() && g.is_hidden_in_queue)
            .count();
        if self.show_hidden || hidden == 0 {
            QueueDisplay::Empty
        } else {
            QueueDisplay::AllHidden { hidden }
        }
    }

    /// Move `moved_id` to `target_index` in the displayed list. `None` when
    /// the move changes nothing.
    pub fn plan_reorder(
        &self,
        records: &[GameRecord],
        moved_id: GameId,
        target_index: usize,
    ) -> Result<Option<ReorderPlan>, QueueError> {
        let mut order: Vec<GameId> = self.working_list(records).iter().map(|g| g.id).collect();
        let from = order
            .iter()
            .position(|&id| id == moved_id)
            .ok_or(QueueError::UnknownItem(moved_id))?;
        let to = target_index.min(order.len() - 1);
        if from == to {
            return Ok(None);
        }
        let id = order.remove(from);
        order.insert(to, id);
        Ok(Some(ReorderPlan { order, from, to }))
    }

    /// Plan the move and write `play_order = index` for every displayed item.
    ///
    /// Rejected with [`QueueError::SaveInProgress`] while an earlier batch is
    /// outstanding. Individual write failures are logged and collected in the
    /// outcome.
    pub async fn reorder<G: GameGateway>(
        &self,
        gateway: &G,
        user_id: &str,
        records: &[GameRecord],
        moved_id: GameId,
        target_index: usize,
    ) -> Result<Option<ReorderOutcome>, QueueError> {
        let _guard = self.begin_save()?;
        let Some(plan) = self.plan_reorder(records, moved_id, target_index)? else {
            return Ok(None);
        };
        log::debug!(
            "Moving game {} from position {} to {}",
            moved_id,
            plan.from,
            plan.to
        );

        let updates = plan.assignments().map(|(id, index)| async move {
            let result = gateway
                .update_game(user_id, id, &GamePatch::play_order(index))
                .await;
            (id, result)
        });
        let results = join_all(updates).await;

        let failed: Vec<(GameId, GatewayError)> = results
            .into_iter()
            .filter_map(|(id, result)| result.err().map(|e| (id, e)))
            .collect();
        for (id, e) in &failed {
            log::warn!("Failed to save queue position for game {}: {}", id, e);
        }

        Ok(Some(ReorderOutcome {
            order: plan.order,
            failed,
        }))
    }

    /// Flip one record's visibility in the queue. Returns the new value.
    pub async fn toggle_hidden<G: GameGateway>(
        &self,
        gateway: &G,
        user_id: &str,
        record: &GameRecord,
    ) -> Result<bool, QueueError> {
        let _guard = self.begin_save()?;
        let hidden = !record.is_hidden_in_queue;
        gateway
            .update_game(user_id, record.id, &GamePatch::hidden_in_queue(hidden))
            .await?;
        Ok(hidden)
    }
}
