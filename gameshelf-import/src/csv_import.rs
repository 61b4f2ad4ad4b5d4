//! CSV collection import.
//!
//! Headers are matched case-insensitively against a declared alias table.
//! Every data row is validated on its own: bad rows land in the
//! [`ImportReport`] and the import carries on with the next one. Valid rows
//! are enriched from the metadata catalog when a lookup client is supplied.

use gameshelf_catalog::{
    Format, GameGateway, GatewayError, NewGame, PLACEHOLDER_IMAGE_URL, Platform, Status,
    validate_user_rating,
};
use gameshelf_lookup::{CatalogSearch, best_match};

use crate::progress::ImportProgress;

/// File-level import failures. Row-level problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No title column found (expected one of: {})", TITLE_ALIASES.join(", "))]
    MissingTitleColumn,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Column Aliases ──────────────────────────────────────────────────────────

pub const TITLE_ALIASES: &[&str] = &["title", "nombre", "name", "título", "titulo"];
pub const PLATFORM_ALIASES: &[&str] = &["platform", "plataforma"];
pub const STATUS_ALIASES: &[&str] = &["status", "estado"];
pub const FORMAT_ALIASES: &[&str] = &["format", "formato"];
pub const RATING_ALIASES: &[&str] = &["user_rating", "nota", "rating"];

/// Positions of the recognised columns in the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: usize,
    pub platform: Option<usize>,
    pub status: Option<usize>,
    pub format: Option<usize>,
    pub user_rating: Option<usize>,
}

impl ColumnMap {
    /// Resolve columns from a header row. The first matching header wins.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, ImportError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized: Vec<String> = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };

        Ok(Self {
            title: find(TITLE_ALIASES).ok_or(ImportError::MissingTitleColumn)?,
            platform: find(PLATFORM_ALIASES),
            status: find(STATUS_ALIASES),
            format: find(FORMAT_ALIASES),
            user_rating: find(RATING_ALIASES),
        })
    }
}

// ── Report ──────────────────────────────────────────────────────────────────

/// Why a single row was skipped.
#[derive(Debug, thiserror::Error)]
pub enum RowProblem {
    #[error("title is empty")]
    EmptyTitle,
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error("unknown format '{0}'")]
    UnknownFormat(String),
    #[error("invalid rating '{0}' (expected 0 to 10 in steps of 0.5)")]
    InvalidRating(String),
    #[error("malformed row: {0}")]
    Malformed(String),
    #[error("could not save: {0}")]
    Insert(GatewayError),
}

#[derive(Debug)]
pub struct RowError {
    /// 1-based line number in the file, header included.
    pub line: u64,
    /// Title cell as read, possibly empty.
    pub title: String,
    pub problem: RowProblem,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub errors: Vec<RowError>,
    /// Rows inserted with the placeholder cover because the lookup found
    /// nothing or failed.
    pub lookup_misses: usize,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// ── Row Parsing ─────────────────────────────────────────────────────────────

fn cell<'r>(record: &'r csv::StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a rating cell. Accepts a decimal comma.
pub fn parse_rating(raw: &str) -> Result<f32, RowProblem> {
    let rating: f32 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| RowProblem::InvalidRating(raw.to_string()))?;
    validate_user_rating(rating).map_err(|_| RowProblem::InvalidRating(raw.to_string()))?;
    Ok(rating)
}

/// Turn one data row into a new record, or the reason it cannot be one.
pub fn parse_row(record: &csv::StringRecord, columns: &ColumnMap) -> Result<NewGame, RowProblem> {
    let title = cell(record, Some(columns.title)).ok_or(RowProblem::EmptyTitle)?;

    let platform = match cell(record, columns.platform) {
        Some(raw) => raw
            .parse::<Platform>()
            .map_err(|_| RowProblem::UnknownPlatform(raw.to_string()))?,
        None => Platform::Pc,
    };

    let mut game = NewGame::new(title, platform);

    if let Some(raw) = cell(record, columns.status) {
        game.status = raw
            .parse::<Status>()
            .map_err(|_| RowProblem::UnknownStatus(raw.to_string()))?;
    }
    if let Some(raw) = cell(record, columns.format) {
        game.format = raw
            .parse::<Format>()
            .map_err(|_| RowProblem::UnknownFormat(raw.to_string()))?;
    }
    if let Some(raw) = cell(record, columns.user_rating) {
        game.user_rating = Some(parse_rating(raw)?);
    }

    Ok(game)
}

// ── Import ──────────────────────────────────────────────────────────────────

/// Import CSV `content` into `user_id`'s collection.
///
/// Each valid row is looked up in the catalog (when `lookup` is given) to
/// backfill the cover, critic score, description and screenshots, then
/// inserted on its own. A failed insert is reported against its row.
pub async fn import_csv<G, S>(
    gateway: &G,
    user_id: &str,
    lookup: Option<&S>,
    content: &str,
    progress: &dyn ImportProgress,
) -> Result<ImportReport, ImportError>
where
    G: GameGateway,
    S: CatalogSearch,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?.iter())?;
    log::debug!("CSV columns: {:?}", columns);

    let rows: Vec<(u64, Result<csv::StringRecord, csv::Error>)> = reader
        .records()
        .map(|r| {
            let line = match &r {
                Ok(record) => record.position().map(|p| p.line()).unwrap_or(0),
                Err(e) => e.position().map(|p| p.line()).unwrap_or(0),
            };
            (line, r)
        })
        .collect();

    let mut report = ImportReport {
        total_rows: rows.len(),
        ..Default::default()
    };
    progress.on_phase(&format!("Importing {} rows...", rows.len()));

    for (index, (line, row)) in rows.into_iter().enumerate() {
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping malformed CSV row at line {}: {}", line, e);
                report.errors.push(RowError {
                    line,
                    title: String::new(),
                    problem: RowProblem::Malformed(e.to_string()),
                });
                progress.on_row(index + 1, report.total_rows, "");
                continue;
            }
        };
        let title = cell(&record, Some(columns.title)).unwrap_or("").to_string();

        let mut game = match parse_row(&record, &columns) {
            Ok(game) => game,
            Err(problem) => {
                log::warn!("Skipping CSV row at line {}: {}", line, problem);
                report.errors.push(RowError {
                    line,
                    title: title.clone(),
                    problem,
                });
                progress.on_row(index + 1, report.total_rows, &title);
                continue;
            }
        };

        if !enrich(lookup, &mut game).await {
            report.lookup_misses += 1;
        }

        match gateway.insert_game(user_id, &game).await {
            Ok(_) => report.imported += 1,
            Err(e) => {
                log::warn!("Failed to import '{}': {}", title, e);
                report.errors.push(RowError {
                    line,
                    title: title.clone(),
                    problem: RowProblem::Insert(e),
                });
            }
        }
        progress.on_row(index + 1, report.total_rows, &title);
    }

    progress.on_complete(&format!(
        "Imported {} of {} rows ({} skipped)",
        report.imported,
        report.total_rows,
        report.errors.len()
    ));
    Ok(report)
}

/// Fill catalog metadata into `game`. Returns false when the placeholder
/// cover had to be used.
async fn enrich<S: CatalogSearch>(lookup: Option<&S>, game: &mut NewGame) -> bool {
    let found = match lookup {
        Some(search) => match best_match(search, &game.title).await {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Catalog lookup failed for '{}': {}", game.title, e);
                None
            }
        },
        None => None,
    };

    match found {
        Some(entry) => {
            entry.fill_new_game(game);
            true
        }
        None => {
            game.image_url = Some(PLACEHOLDER_IMAGE_URL.to_string());
            false
        }
    }
}
