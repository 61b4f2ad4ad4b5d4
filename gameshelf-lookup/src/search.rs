//! The metadata lookup seam and the helpers built on it.

use futures::future::join_all;

use crate::error::LookupError;
use crate::types::{CatalogDetails, CatalogEntry, CatalogPage, CoverEntry};

/// Search access to an external game catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogSearch {
    /// One page (1-based) of relevance-ordered results for `query`.
    async fn search_catalog(&self, query: &str, page: u32) -> Result<CatalogPage, LookupError>;

    /// Description and screenshots for a single catalog entry.
    async fn fetch_details(&self, id: u64) -> Result<CatalogDetails, LookupError>;

    /// Cover candidates for `query`, at most 12.
    async fn search_covers(&self, query: &str) -> Result<Vec<CoverEntry>, LookupError>;
}

/// Run the detail lookup for every entry concurrently. An entry whose lookup
/// fails keeps its search data and an empty description.
pub async fn enrich_entries<S: CatalogSearch>(search: &S, entries: &mut [CatalogEntry]) {
    let results = join_all(entries.iter().map(|e| search.fetch_details(e.id))).await;
    for (entry, result) in entries.iter_mut().zip(results) {
        match result {
            Ok(details) => entry.apply_details(details),
            Err(e) => log::warn!("Failed to fetch details for '{}' ({}): {}", entry.name, entry.id, e),
        }
    }
}

/// Search for `title` and return the first hit with its details filled in.
///
/// `Ok(None)` means the catalog has no match. A failed detail lookup is
/// logged and the bare hit returned.
pub async fn best_match<S: CatalogSearch>(
    search: &S,
    title: &str,
) -> Result<Option<CatalogEntry>, LookupError> {
    let page = search.search_catalog(title, 1).await?;
    let Some(mut entry) = page.results.into_iter().next() else {
        return Ok(None);
    };
    enrich_entries(search, std::slice::from_mut(&mut entry)).await;
    Ok(Some(entry))
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
