//! Data model types for the game collection.
//!
//! A collection is a flat list of [`GameRecord`]s owned by one user. DLCs and
//! expansions are records whose `parent_id` points at a base game.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::platform::Platform;
use crate::status::{Format, Status};

/// Identifier assigned by the gateway on insert.
pub type GameId = i64;

/// Opaque identifier of the owning user.
pub type UserId = String;

/// Cover shown when the catalog lookup found nothing.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x400?text=No+Cover";

// ── Game Record ─────────────────────────────────────────────────────────────

/// One owned title, or one DLC/expansion of an owned title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub user_id: UserId,
    pub title: String,
    pub platform: Platform,
    pub format: Format,
    pub status: Status,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Aggregate critic score (0-100) captured from the catalog; 0 when unknown.
    #[serde(default)]
    pub critic_score: i32,
    /// User score in `[0, 10]`, step 0.5. `None` means unrated.
    #[serde(default)]
    pub user_rating: Option<f32>,
    #[serde(default)]
    pub started_at: Option<NaiveDate>,
    #[serde(default)]
    pub finished_at: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    /// Position in the play queue. Only meaningful while `status` is pending.
    #[serde(default)]
    pub play_order: Option<i64>,
    #[serde(default)]
    pub is_hidden_in_queue: bool,
    /// Base game this record extends, if it is a DLC.
    #[serde(default)]
    pub parent_id: Option<GameId>,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    pub fn is_dlc(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    /// User rating with "unrated" treated as zero, for sorting.
    pub fn rating_or_zero(&self) -> f32 {
        self.user_rating.unwrap_or(0.0)
    }
}

// ── New Game ────────────────────────────────────────────────────────────────

/// Fields supplied when creating a record. The gateway assigns `id`,
/// `user_id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub title: String,
    pub platform: Option<Platform>,
    pub format: Format,
    pub status: Status,
    pub image_url: Option<String>,
    pub critic_score: i32,
    pub user_rating: Option<f32>,
    pub started_at: Option<NaiveDate>,
    pub finished_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub screenshots: Vec<String>,
    pub play_order: Option<i64>,
    pub parent_id: Option<GameId>,
}

impl NewGame {
    pub fn new(title: impl Into<String>, platform: Platform) -> Self {
        Self {
            title: title.into(),
            platform: Some(platform),
            ..Default::default()
        }
    }

    /// Platform, falling back to PC when none was chosen.
    pub fn platform_or_default(&self) -> Platform {
        self.platform.unwrap_or(Platform::Pc)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_critic_score(self.critic_score)?;
        if let Some(rating) = self.user_rating {
            validate_user_rating(rating)?;
        }
        validate_dates(self.started_at, self.finished_at)
    }
}

// ── Game Patch ──────────────────────────────────────────────────────────────

/// A partial update. Only `Some` fields are written; nullable columns use
/// `Option<Option<_>>` so they can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePatch {
    pub title: Option<String>,
    pub platform: Option<Platform>,
    pub format: Option<Format>,
    pub status: Option<Status>,
    pub image_url: Option<Option<String>>,
    pub critic_score: Option<i32>,
    pub user_rating: Option<Option<f32>>,
    pub started_at: Option<Option<NaiveDate>>,
    pub finished_at: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
    pub play_order: Option<Option<i64>>,
    pub is_hidden_in_queue: Option<bool>,
    pub parent_id: Option<Option<GameId>>,
}

impl GamePatch {
    pub fn play_order(order: i64) -> Self {
        Self {
            play_order: Some(Some(order)),
            ..Default::default()
        }
    }

    pub fn hidden_in_queue(hidden: bool) -> Self {
        Self {
            is_hidden_in_queue: Some(hidden),
            ..Default::default()
        }
    }

    pub fn notes(notes: Option<String>) -> Self {
        Self {
            notes: Some(notes),
            ..Default::default()
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(Some(url.into())),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validate the patch against the record it will be applied to, so date
    /// ordering is checked against the resulting values.
    pub fn validate_against(&self, current: &GameRecord) -> Result<(), ValidationError> {
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(score) = self.critic_score {
            validate_critic_score(score)?;
        }
        if let Some(Some(rating)) = self.user_rating {
            validate_user_rating(rating)?;
        }
        let started = self.started_at.unwrap_or(current.started_at);
        let finished = self.finished_at.unwrap_or(current.finished_at);
        validate_dates(started, finished)?;
        if self.parent_id == Some(Some(current.id)) {
            return Err(ValidationError::SelfParent(current.id));
        }
        Ok(())
    }

    /// Apply this patch to a local copy of a record.
    pub fn apply(&self, record: &mut GameRecord) {
        if let Some(ref title) = self.title {
            record.title = title.clone();
        }
        if let Some(platform) = self.platform {
            record.platform = platform;
        }
        if let Some(format) = self.format {
            record.format = format;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(ref url) = self.image_url {
            record.image_url = url.clone();
        }
        if let Some(score) = self.critic_score {
            record.critic_score = score;
        }
        if let Some(rating) = self.user_rating {
            record.user_rating = rating;
        }
        if let Some(started) = self.started_at {
            record.started_at = started;
        }
        if let Some(finished) = self.finished_at {
            record.finished_at = finished;
        }
        if let Some(ref notes) = self.notes {
            record.notes = notes.clone();
        }
        if let Some(order) = self.play_order {
            record.play_order = order;
        }
        if let Some(hidden) = self.is_hidden_in_queue {
            record.is_hidden_in_queue = hidden;
        }
        if let Some(parent) = self.parent_id {
            record.parent_id = parent;
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_critic_score(score: i32) -> Result<(), ValidationError> {
    if !(0..=100).contains(&score) {
        return Err(ValidationError::CriticScore(score));
    }
    Ok(())
}

/// A user rating must lie in `[0, 10]` on a 0.5 grid.
pub fn validate_user_rating(rating: f32) -> Result<(), ValidationError> {
    let doubled = rating * 2.0;
    if !(0.0..=10.0).contains(&rating) || (doubled - doubled.round()).abs() > f32::EPSILON {
        return Err(ValidationError::UserRating(rating));
    }
    Ok(())
}

fn validate_dates(
    started: Option<NaiveDate>,
    finished: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(s), Some(f)) = (started, finished) {
        if f < s {
            return Err(ValidationError::FinishedBeforeStarted {
                started: s,
                finished: f,
            });
        }
    }
    Ok(())
}

// ── Auth ────────────────────────────────────────────────────────────────────

/// The signed-in user as reported by the auth gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: String,
}

/// A session returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserIdentity,
    pub created_at: DateTime<Utc>,
}
