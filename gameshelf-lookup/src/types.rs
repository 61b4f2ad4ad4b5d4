use gameshelf_catalog::{NewGame, PLACEHOLDER_IMAGE_URL};
use serde::{Deserialize, Serialize};

// ── RAWG wire types ─────────────────────────────────────────────────────────

/// Paged response from `GET /games`.
#[derive(Debug, Deserialize)]
pub struct GameListResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<RawgGame>,
}

/// One search hit. Only the fields we use are modeled.
#[derive(Debug, Deserialize, Clone)]
pub struct RawgGame {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub metacritic: Option<i32>,
    /// `YYYY-MM-DD`, when known.
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub short_screenshots: Vec<Screenshot>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Screenshot {
    #[serde(default)]
    pub id: i64,
    pub image: String,
}

/// Response from `GET /games/{id}`.
#[derive(Debug, Deserialize)]
pub struct GameDetailResponse {
    pub id: u64,
    #[serde(default)]
    pub description_raw: Option<String>,
    #[serde(default)]
    pub short_screenshots: Option<Vec<Screenshot>>,
}

// ── Catalog types ───────────────────────────────────────────────────────────

/// A catalog search result in the shape the collection uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
    pub image_url: Option<String>,
    /// Metacritic score, 0 when the catalog has none.
    pub critic_score: i32,
    pub release_year: Option<String>,
    /// Empty until [`CatalogEntry::apply_details`] runs.
    pub description: String,
    pub screenshots: Vec<String>,
}

impl CatalogEntry {
    /// Release year for display, `"N/A"` when unknown.
    pub fn year_label(&self) -> &str {
        self.release_year.as_deref().unwrap_or("N/A")
    }

    /// Merge the result of a detail lookup. Detail screenshots replace the
    /// search ones when present.
    pub fn apply_details(&mut self, details: CatalogDetails) {
        self.description = details.description;
        if let Some(screenshots) = details.screenshots {
            self.screenshots = screenshots;
        }
    }

    /// Copy cover, score, description and screenshots onto a new record.
    pub fn fill_new_game(&self, game: &mut NewGame) {
        game.image_url = Some(
            self.image_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        );
        game.critic_score = self.critic_score.clamp(0, 100);
        if !self.description.is_empty() {
            game.description = Some(self.description.clone());
        }
        game.screenshots = self.screenshots.clone();
    }
}

impl From<RawgGame> for CatalogEntry {
    fn from(game: RawgGame) -> Self {
        let release_year = game
            .released
            .as_deref()
            .and_then(|d| d.get(..4))
            .map(str::to_string);
        Self {
            id: game.id,
            name: game.name,
            image_url: game.background_image,
            critic_score: game.metacritic.unwrap_or(0),
            release_year,
            description: String::new(),
            screenshots: game.short_screenshots.into_iter().map(|s| s.image).collect(),
        }
    }
}

/// One page of search results plus the total hit count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    pub results: Vec<CatalogEntry>,
    pub total: u64,
}

impl From<GameListResponse> for CatalogPage {
    fn from(resp: GameListResponse) -> Self {
        Self {
            total: resp.count,
            results: resp.results.into_iter().map(CatalogEntry::from).collect(),
        }
    }
}

/// Output of the per-game detail lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDetails {
    pub description: String,
    pub screenshots: Option<Vec<String>>,
}

impl From<GameDetailResponse> for CatalogDetails {
    fn from(resp: GameDetailResponse) -> Self {
        Self {
            description: resp.description_raw.unwrap_or_default(),
            screenshots: resp
                .short_screenshots
                .map(|shots| shots.into_iter().map(|s| s.image).collect()),
        }
    }
}

/// A cover candidate for the cover picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverEntry {
    pub name: String,
    pub image_url: Option<String>,
}

impl From<RawgGame> for CoverEntry {
    fn from(game: RawgGame) -> Self {
        Self {
            name: game.name,
            image_url: game.background_image,
        }
    }
}
