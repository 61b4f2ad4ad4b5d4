//! Game metadata lookup against the RAWG catalog.
//!
//! [`CatalogSearch`] is the seam the rest of the workspace depends on;
//! [`RawgClient`] is the HTTP implementation.

pub mod client;
pub mod credentials;
pub mod error;
pub mod search;
pub mod types;

pub use client::{COVER_PAGE_SIZE, RawgClient, SEARCH_PAGE_SIZE};
pub use credentials::{ApiKey, KeySource, config_path, key_source, save_to_file};
pub use error::LookupError;
pub use search::{CatalogSearch, best_match, enrich_entries};
pub use types::{CatalogDetails, CatalogEntry, CatalogPage, CoverEntry};
