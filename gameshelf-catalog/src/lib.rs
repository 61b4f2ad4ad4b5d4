//! Game collection data model, vocabularies, and gateway traits.
//!
//! This crate defines the records a user owns without any storage or network
//! dependencies. `gameshelf-db` implements the gateway traits; the collection
//! and import crates consume them.

pub mod error;
pub mod gateway;
pub mod platform;
pub mod status;
pub mod types;

pub use error::{AuthError, GatewayError, ValidationError};
pub use gateway::{AuthGateway, GameGateway};
pub use platform::{PLATFORMS, Platform, PlatformParseError};
pub use status::{Format, FormatParseError, STATUSES, Status, StatusParseError};
pub use types::*;
