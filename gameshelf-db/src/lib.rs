//! SQLite persistence layer for game collections.
//!
//! Provides schema creation, user-scoped CRUD on games, local accounts and
//! sessions, and [`LocalGateway`], which implements the catalog's gateway
//! traits on top of them.

pub mod accounts;
pub mod gateway;
pub mod operations;
pub mod queries;
pub mod schema;

pub use accounts::{AccountError, MIN_PASSWORD_LEN};
pub use gateway::LocalGateway;
pub use operations::{OperationError, delete_game, insert_game, update_game};
pub use queries::{count_games, dlcs_of, get_game, list_games};
pub use schema::{SchemaError, open_database, open_memory};
