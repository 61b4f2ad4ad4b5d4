use std::time::Duration;

use crate::credentials::ApiKey;
use crate::error::LookupError;
use crate::search::CatalogSearch;
use crate::types::{
    CatalogDetails, CatalogPage, CoverEntry, GameDetailResponse, GameListResponse,
};

const BASE_URL: &str = "https://api.rawg.io/api";

/// Results per search page.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Results returned by the cover picker.
pub const COVER_PAGE_SIZE: u32 = 12;

/// HTTP client for the RAWG games API.
pub struct RawgClient {
    http: reqwest::Client,
    key: ApiKey,
    base_url: String,
}

impl RawgClient {
    pub fn new(key: ApiKey) -> Result<Self, LookupError> {
        Self::with_base_url(key, BASE_URL)
    }

    /// Point the client at a different server (a mirror or a local stub).
    pub fn with_base_url(key: ApiKey, base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, path: &str, params: &[(&str, String)]) -> Result<String, LookupError> {
        let mut query: Vec<(&str, String)> = vec![("key", self.key.expose().to_string())];
        query.extend(params.iter().cloned());

        log::debug!("GET {}{} {:?}", self.base_url, path, params);
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(LookupError::InvalidKey("API key rejected".to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimit);
        }
        if !status.is_success() {
            return Err(LookupError::ServerError {
                status: status.as_u16(),
                message: snippet(&text).to_string(),
            });
        }
        Ok(text)
    }
}

impl CatalogSearch for RawgClient {
    async fn search_catalog(&self, query: &str, page: u32) -> Result<CatalogPage, LookupError> {
        let text = self
            .get_text("/games", &search_params(query, Some(page), SEARCH_PAGE_SIZE))
            .await?;
        parse_game_list(&text).map(CatalogPage::from)
    }

    async fn fetch_details(&self, id: u64) -> Result<CatalogDetails, LookupError> {
        let text = match self.get_text(&format!("/games/{}", id), &[]).await {
            Err(LookupError::ServerError { status: 404, .. }) => {
                return Err(LookupError::NotFound(id));
            }
            other => other?,
        };
        let detail: GameDetailResponse = serde_json::from_str(&text).map_err(|e| {
            LookupError::Api(format!(
                "Failed to parse game details: {e}. Response: {}",
                snippet(&text)
            ))
        })?;
        Ok(detail.into())
    }

    async fn search_covers(&self, query: &str) -> Result<Vec<CoverEntry>, LookupError> {
        let text = self
            .get_text("/games", &search_params(query, None, COVER_PAGE_SIZE))
            .await?;
        let list = parse_game_list(&text)?;
        Ok(list
            .results
            .into_iter()
            .take(COVER_PAGE_SIZE as usize)
            .map(CoverEntry::from)
            .collect())
    }
}

/// Query parameters for a precise, relevance-ordered search.
pub(crate) fn search_params(query: &str, page: Option<u32>, page_size: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![("search", query.trim().to_string())];
    if let Some(page) = page {
        params.push(("page", page.max(1).to_string()));
    }
    params.push(("page_size", page_size.to_string()));
    params.push(("search_precise", "true".to_string()));
    params
}

pub(crate) fn parse_game_list(text: &str) -> Result<GameListResponse, LookupError> {
    serde_json::from_str(text).map_err(|e| {
        LookupError::Api(format!(
            "Failed to parse search results: {e}. Response: {}",
            snippet(text)
        ))
    })
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
