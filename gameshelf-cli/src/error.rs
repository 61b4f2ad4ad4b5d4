use thiserror::Error;

use gameshelf_catalog::{AuthError, GatewayError};
use gameshelf_collection::{QueueError, StoreError};
use gameshelf_import::{ExportError, ImportError};
use gameshelf_lookup::LookupError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened
    #[error("Database error: {0}")]
    Database(String),

    /// No usable session
    #[error("Not signed in. Run `gameshelf login <email>` first")]
    NotSignedIn,

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl From<GatewayError> for CliError {
    fn from(e: GatewayError) -> Self {
        Self::Store(StoreError::Gateway(e))
    }
}

impl From<QueueError> for CliError {
    fn from(e: QueueError) -> Self {
        Self::Store(StoreError::Queue(e))
    }
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
