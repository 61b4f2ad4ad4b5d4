//! Write operations on the games table.
//!
//! Every operation is scoped to a user id. A record owned by someone else is
//! reported as not found.

use chrono::Utc;
use gameshelf_catalog::{GameId, GamePatch, GameRecord, NewGame, ValidationError};
use rusqlite::types::ToSql;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::queries::get_game;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new record for `user_id`. Returns the stored row.
pub fn insert_game(
    conn: &Connection,
    user_id: &str,
    game: &NewGame,
) -> Result<GameRecord, OperationError> {
    game.validate()?;
    if let Some(parent) = game.parent_id {
        check_parent(conn, user_id, parent)?;
    }

    let screenshots = serde_json::to_string(&game.screenshots)?;
    conn.execute(
        "INSERT INTO games (user_id, title, platform, format, status, image_url,
                            critic_score, user_rating, started_at, finished_at,
                            notes, description, screenshots, play_order,
                            is_hidden_in_queue, parent_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, 0, ?15, ?16)",
        params![
            user_id,
            game.title.trim(),
            game.platform_or_default().label(),
            game.format.label(),
            game.status.label(),
            game.image_url,
            game.critic_score,
            game.user_rating.map(f64::from),
            game.started_at,
            game.finished_at,
            game.notes,
            game.description,
            screenshots,
            game.play_order,
            game.parent_id,
            Utc::now(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("Inserted game {} '{}' for user {}", id, game.title, user_id);
    get_game(conn, user_id, id)?.ok_or_else(|| OperationError::GameNotFound(id))
}

/// Apply a partial update. Only the fields set in `patch` are written.
pub fn update_game(
    conn: &Connection,
    user_id: &str,
    id: GameId,
    patch: &GamePatch,
) -> Result<(), OperationError> {
    let current = get_game(conn, user_id, id)?.ok_or_else(|| OperationError::GameNotFound(id))?;
    patch.validate_against(&current)?;
    if let Some(Some(parent)) = patch.parent_id {
        check_parent(conn, user_id, parent)?;
        if has_dlcs(conn, id)? {
            return Err(ValidationError::HasDlcs(id).into());
        }
    }
    if patch.is_empty() {
        return Ok(());
    }

    let mut columns: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(ref title) = patch.title {
        columns.push("title");
        values.push(Box::new(title.trim().to_string()));
    }
    if let Some(platform) = patch.platform {
        columns.push("platform");
        values.push(Box::new(platform.label()));
    }
    if let Some(format) = patch.format {
        columns.push("format");
        values.push(Box::new(format.label()));
    }
    if let Some(status) = patch.status {
        columns.push("status");
        values.push(Box::new(status.label()));
    }
    if let Some(ref url) = patch.image_url {
        columns.push("image_url");
        values.push(Box::new(url.clone()));
    }
    if let Some(score) = patch.critic_score {
        columns.push("critic_score");
        values.push(Box::new(score));
    }
    if let Some(rating) = patch.user_rating {
        columns.push("user_rating");
        values.push(Box::new(rating.map(f64::from)));
    }
    if let Some(started) = patch.started_at {
        columns.push("started_at");
        values.push(Box::new(started));
    }
    if let Some(finished) = patch.finished_at {
        columns.push("finished_at");
        values.push(Box::new(finished));
    }
    if let Some(ref notes) = patch.notes {
        columns.push("notes");
        values.push(Box::new(notes.clone()));
    }
    if let Some(order) = patch.play_order {
        columns.push("play_order");
        values.push(Box::new(order));
    }
    if let Some(hidden) = patch.is_hidden_in_queue {
        columns.push("is_hidden_in_queue");
        values.push(Box::new(hidden));
    }
    if let Some(parent) = patch.parent_id {
        columns.push("parent_id");
        values.push(Box::new(parent));
    }

    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ?{}", col, i + 1))
        .collect();
    let sql = format!(
        "UPDATE games SET {} WHERE id = ?{} AND user_id = ?{}",
        assignments.join(", "),
        values.len() + 1,
        values.len() + 2,
    );
    values.push(Box::new(id));
    values.push(Box::new(user_id.to_string()));

    let changed = conn.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
    if changed == 0 {
        return Err(OperationError::GameNotFound(id));
    }
    log::debug!("Updated game {} ({})", id, columns.join(", "));
    Ok(())
}

/// Delete a record. DLCs of a deleted base game go with it.
pub fn delete_game(conn: &Connection, user_id: &str, id: GameId) -> Result<(), OperationError> {
    let changed = conn.execute(
        "DELETE FROM games WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    if changed == 0 {
        return Err(OperationError::GameNotFound(id));
    }
    log::debug!("Deleted game {} for user {}", id, user_id);
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// A parent must exist, belong to the same user, and not be a DLC itself.
fn check_parent(conn: &Connection, user_id: &str, parent: GameId) -> Result<(), OperationError> {
    match get_game(conn, user_id, parent)? {
        None => Err(ValidationError::MissingParent(parent).into()),
        Some(p) if p.is_dlc() => Err(ValidationError::NestedParent(parent).into()),
        Some(_) => Ok(()),
    }
}

fn has_dlcs(conn: &Connection, id: GameId) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM games WHERE parent_id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}
