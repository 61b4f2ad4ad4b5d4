use gameshelf_catalog::{GameId, GamePatch};

use super::{Context, game_line, success};
use crate::cli_types::EditArgs;
use crate::error::CliError;

/// Translate edit flags into a patch. `clear_*` flags write NULL.
pub(crate) fn patch_from(changes: &EditArgs) -> GamePatch {
    fn nullable<T: Clone>(value: &Option<T>, clear: bool) -> Option<Option<T>> {
        if clear { Some(None) } else { value.clone().map(Some) }
    }

    GamePatch {
        title: changes.title.clone(),
        platform: changes.platform,
        format: changes.format,
        status: changes.status,
        critic_score: changes.critic_score,
        user_rating: nullable(&changes.rating, changes.clear_rating),
        started_at: nullable(&changes.started, changes.clear_started),
        finished_at: nullable(&changes.finished, changes.clear_finished),
        parent_id: nullable(&changes.dlc_of, changes.no_parent),
        ..Default::default()
    }
}

pub(crate) async fn run_edit(ctx: &Context, id: GameId, changes: &EditArgs) -> Result<(), CliError> {
    let patch = patch_from(changes);
    if patch.is_empty() {
        return Err(CliError::other("Nothing to change. See `gameshelf edit --help`"));
    }

    let mut store = ctx.signed_in_store().await?;
    store.update(id, patch).await?;
    if let Some(game) = store.get(id) {
        success(format!("Updated {}", game_line(game)));
    }
    Ok(())
}

pub(crate) async fn run_notes(ctx: &Context, id: GameId, text: &str) -> Result<(), CliError> {
    let mut store = ctx.signed_in_store().await?;
    store.save_notes(id, text).await?;
    if text.trim().is_empty() {
        success(format!("Cleared notes for #{}", id));
    } else {
        success(format!("Saved notes for #{}", id));
    }
    Ok(())
}

pub(crate) async fn run_delete(ctx: &Context, id: GameId) -> Result<(), CliError> {
    let mut store = ctx.signed_in_store().await?;
    let title = store
        .get(id)
        .map(|g| g.title.clone())
        .ok_or_else(|| CliError::other(format!("Game {} not found", id)))?;
    let dlcs = store.dlcs_of(id).len();

    store.delete(id).await?;
    if dlcs > 0 {
        success(format!("Deleted {} and {} DLC(s)", title, dlcs));
    } else {
        success(format!("Deleted {}", title));
    }
    Ok(())
}

pub(crate) async fn run_set_cover(ctx: &Context, id: GameId, url: &str) -> Result<(), CliError> {
    let mut store = ctx.signed_in_store().await?;
    store.set_cover(id, url).await?;
    success(format!("Cover updated for #{}", id));
    Ok(())
}

#[cfg(test)]
#[path = "../tests/edit_tests.rs"]
mod tests;
