use chrono::NaiveDate;
use thiserror::Error;

use crate::types::GameId;

/// A record or patch that breaks a field constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("User rating {0} is outside 0-10 or not a multiple of 0.5")]
    UserRating(f32),

    #[error("Critic score {0} is outside 0-100")]
    CriticScore(i32),

    #[error("Finished date {finished} is before started date {started}")]
    FinishedBeforeStarted {
        started: NaiveDate,
        finished: NaiveDate,
    },

    #[error("Game {0} cannot be its own parent")]
    SelfParent(GameId),

    #[error("Parent game {0} is itself a DLC")]
    NestedParent(GameId),

    #[error("Parent game {0} does not exist")]
    MissingParent(GameId),

    #[error("Game {0} has DLCs and cannot become a DLC itself")]
    HasDlcs(GameId),
}

/// Errors from the persistence gateway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Game {0} not found")]
    NotFound(GameId),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl GatewayError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }
}

/// Errors from the auth gateway. Always recoverable: the caller shows the
/// message and lets the user retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address has not been confirmed")]
    EmailNotConfirmed,

    #[error("An account already exists for {0}")]
    AlreadyRegistered(String),

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
