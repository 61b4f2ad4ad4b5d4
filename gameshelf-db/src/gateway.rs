//! SQLite-backed implementation of the auth and game gateways.

use std::path::Path;
use std::sync::Mutex;

use gameshelf_catalog::{
    AuthError, AuthGateway, GameGateway, GameId, GamePatch, GameRecord, GatewayError, NewGame,
    Session, UserIdentity,
};
use rusqlite::Connection;

use crate::accounts::{self, AccountError};
use crate::operations::{self, OperationError};
use crate::queries;
use crate::schema::{self, SchemaError};

impl From<OperationError> for GatewayError {
    fn from(e: OperationError) -> Self {
        match e {
            OperationError::GameNotFound(id) => GatewayError::NotFound(id),
            OperationError::Validation(v) => GatewayError::Validation(v),
            other => GatewayError::backend(other.to_string()),
        }
    }
}

impl From<AccountError> for AuthError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Rejected(auth) => auth,
            AccountError::Operation(op) => AuthError::Gateway(op.into()),
        }
    }
}

/// A local collection database with at most one signed-in session.
pub struct LocalGateway {
    conn: Mutex<Connection>,
    session: Mutex<Option<Session>>,
}

impl LocalGateway {
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self::from_connection(schema::open_database(path)?))
    }

    pub fn in_memory() -> Result<Self, SchemaError> {
        Ok(Self::from_connection(schema::open_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            session: Mutex::new(None),
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|s| s.clone())
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, OperationError>,
    ) -> Result<T, GatewayError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| GatewayError::backend("database connection lock poisoned"))?;
        f(&conn).map_err(Into::into)
    }

    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, AccountError>,
    ) -> Result<T, AuthError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| GatewayError::backend("database connection lock poisoned"))?;
        f(&conn).map_err(Into::into)
    }

    fn set_session(&self, session: Option<Session>) -> Result<(), AuthError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| GatewayError::backend("session lock poisoned"))?;
        *guard = session;
        Ok(())
    }
}

impl AuthGateway for LocalGateway {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.session().map(|s| s.user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.with_accounts(|conn| {
            let user = accounts::authenticate(conn, email, password)?
                .ok_or(AuthError::InvalidCredentials)?;
            Ok(accounts::create_session(conn, &user)?)
        })?;
        log::info!("Signed in as {}", session.user.email);
        self.set_session(Some(session.clone()))?;
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.with_accounts(|conn| accounts::create_user(conn, email, password))?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.session() {
            self.with_conn(|conn| accounts::delete_session(conn, &session.token))?;
            log::info!("Signed out {}", session.user.email);
        }
        self.set_session(None)
    }

    async fn resume(&self, token: &str) -> Result<Session, AuthError> {
        let session = self
            .with_conn(|conn| accounts::find_session(conn, token))?
            .ok_or(AuthError::NotSignedIn)?;
        self.set_session(Some(session.clone()))?;
        Ok(session)
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> Result<(), AuthError> {
        self.with_accounts(|conn| accounts::record_password_reset(conn, email, redirect_url))
    }

    async fn update_password(&self, new_password: &str) -> Result<(), AuthError> {
        let session = self.session().ok_or(AuthError::NotSignedIn)?;
        self.with_accounts(|conn| accounts::set_password(conn, &session.user.id, new_password))
    }
}

impl GameGateway for LocalGateway {
    async fn list_games(&self, user_id: &str) -> Result<Vec<GameRecord>, GatewayError> {
        self.with_conn(|conn| queries::list_games(conn, user_id))
    }

    async fn get_game(&self, user_id: &str, id: GameId) -> Result<GameRecord, GatewayError> {
        self.with_conn(|conn| queries::get_game(conn, user_id, id))?
            .ok_or(GatewayError::NotFound(id))
    }

    async fn insert_game(&self, user_id: &str, game: &NewGame) -> Result<GameRecord, GatewayError> {
        self.with_conn(|conn| operations::insert_game(conn, user_id, game))
    }

    async fn update_game(
        &self,
        user_id: &str,
        id: GameId,
        patch: &GamePatch,
    ) -> Result<(), GatewayError> {
        self.with_conn(|conn| operations::update_game(conn, user_id, id, patch))
    }

    async fn delete_game(&self, user_id: &str, id: GameId) -> Result<(), GatewayError> {
        self.with_conn(|conn| operations::delete_game(conn, user_id, id))
    }
}
