//! Read queries for the collection database.

use std::str::FromStr;

use gameshelf_catalog::{GameId, GameRecord};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};

use crate::operations::OperationError;

const GAME_COLUMNS: &str = "id, user_id, title, platform, format, status, image_url,
        critic_score, user_rating, started_at, finished_at, notes, description,
        screenshots, play_order, is_hidden_in_queue, parent_id, created_at";

// ── Game Lookups ────────────────────────────────────────────────────────────

/// All records owned by `user_id`, newest first.
pub fn list_games(conn: &Connection, user_id: &str) -> Result<Vec<GameRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE user_id = ?1
         ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![user_id], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// One record, if it exists and belongs to `user_id`.
pub fn get_game(
    conn: &Connection,
    user_id: &str,
    id: GameId,
) -> Result<Option<GameRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE id = ?1 AND user_id = ?2"
    ))?;
    match stmt.query_row(params![id, user_id], row_to_game) {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// DLCs attached to a base game.
pub fn dlcs_of(
    conn: &Connection,
    user_id: &str,
    parent_id: GameId,
) -> Result<Vec<GameRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE parent_id = ?1 AND user_id = ?2
         ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![parent_id, user_id], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of records owned by `user_id`.
pub fn count_games(conn: &Connection, user_id: &str) -> Result<i64, OperationError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

fn row_to_game(row: &Row) -> rusqlite::Result<GameRecord> {
    let screenshots: String = row.get(13)?;
    let screenshots = serde_json::from_str(&screenshots)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(13, Type::Text, Box::new(e)))?;

    Ok(GameRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        platform: parse_column(row, 3)?,
        format: parse_column(row, 4)?,
        status: parse_column(row, 5)?,
        image_url: row.get(6)?,
        critic_score: row.get(7)?,
        user_rating: row.get::<_, Option<f64>>(8)?.map(|r| r as f32),
        started_at: row.get(9)?,
        finished_at: row.get(10)?,
        notes: row.get(11)?,
        description: row.get(12)?,
        screenshots,
        play_order: row.get(14)?,
        is_hidden_in_queue: row.get(15)?,
        parent_id: row.get(16)?,
        created_at: row.get(17)?,
    })
}

/// Read a text column and parse it through the vocabulary's `FromStr`.
fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
