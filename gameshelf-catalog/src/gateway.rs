//! Seams to the remote data service.
//!
//! The collection logic never persists anything itself; it issues requests
//! through these traits and reconciles the responses. `gameshelf-db` provides
//! a SQLite implementation.

use crate::error::{AuthError, GatewayError};
use crate::types::{GameId, GamePatch, GameRecord, NewGame, Session, UserIdentity};

/// Account and session management.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    /// The user of the active session, if any.
    async fn current_user(&self) -> Option<UserIdentity>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Restore a session from a token saved by an earlier `sign_in`.
    async fn resume(&self, token: &str) -> Result<Session, AuthError>;

    /// Ask for a password-reset link to be sent to `email`, pointing at
    /// `redirect_url`.
    async fn request_password_reset(&self, email: &str, redirect_url: &str)
    -> Result<(), AuthError>;

    /// Change the password of the signed-in user.
    async fn update_password(&self, new_password: &str) -> Result<(), AuthError>;
}

/// Row-level CRUD on the games table, scoped to one user.
#[allow(async_fn_in_trait)]
pub trait GameGateway {
    /// All of the user's records, newest first.
    async fn list_games(&self, user_id: &str) -> Result<Vec<GameRecord>, GatewayError>;

    async fn get_game(&self, user_id: &str, id: GameId) -> Result<GameRecord, GatewayError>;

    async fn insert_game(&self, user_id: &str, game: &NewGame)
    -> Result<GameRecord, GatewayError>;

    async fn update_game(
        &self,
        user_id: &str,
        id: GameId,
        patch: &GamePatch,
    ) -> Result<(), GatewayError>;

    /// Delete a record. Deleting a base game also deletes its DLCs.
    async fn delete_game(&self, user_id: &str, id: GameId) -> Result<(), GatewayError>;
}
