//! Filtering, sorting, pagination and DLC grouping of a record set.
//!
//! Everything here is pure: the same records and query always produce the
//! same page.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use gameshelf_catalog::{Format, GameRecord, Platform, Status};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Items per collection page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

// ── Query ───────────────────────────────────────────────────────────────────

/// Format constraint. `All` accepts every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatFilter {
    #[default]
    All,
    Only(Format),
}

impl FormatFilter {
    fn accepts(&self, format: Format) -> bool {
        match self {
            Self::All => true,
            Self::Only(f) => *f == format,
        }
    }
}

impl std::str::FromStr for FormatFilter {
    type Err = gameshelf_catalog::FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl std::fmt::Display for FormatFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(format) => write!(f, "{}", format),
        }
    }
}

/// Collection sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
    /// Highest user rating first; unrated counts as 0.
    RatingDesc,
}

impl SortKey {
    pub fn key(&self) -> &'static str {
        match self {
            Self::CreatedDesc => "date_desc",
            Self::CreatedAsc => "date_asc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::RatingDesc => "rating_desc",
        }
    }

    pub fn all() -> &'static [SortKey] {
        &[
            Self::CreatedDesc,
            Self::CreatedAsc,
            Self::TitleAsc,
            Self::TitleDesc,
            Self::RatingDesc,
        ]
    }

    fn compare(&self, a: &GameRecord, b: &GameRecord) -> Ordering {
        match self {
            Self::CreatedDesc => b.created_at.cmp(&a.created_at),
            Self::CreatedAsc => a.created_at.cmp(&b.created_at),
            Self::TitleAsc => compare_titles(&a.title, &b.title),
            Self::TitleDesc => compare_titles(&b.title, &a.title),
            Self::RatingDesc => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sort key: '{0}' (expected one of date_desc, date_asc, title_asc, title_desc, rating_desc)")]
pub struct SortKeyParseError(pub String);

impl std::str::FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|k| k.key() == needle)
            .ok_or_else(|| SortKeyParseError(s.to_string()))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Filter and sort criteria. Empty sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionQuery {
    pub text: String,
    pub statuses: BTreeSet<Status>,
    pub platforms: BTreeSet<Platform>,
    pub format: FormatFilter,
    pub sort: SortKey,
}

impl CollectionQuery {
    /// True when any filter narrows the collection. Sorting alone does not.
    pub fn is_filtering(&self) -> bool {
        !self.text.trim().is_empty()
            || !self.statuses.is_empty()
            || !self.platforms.is_empty()
            || self.format != FormatFilter::All
    }

    /// Substring match on the raw text. Only [`is_filtering`](Self::is_filtering)
    /// ignores surrounding whitespace.
    pub fn matches(&self, game: &GameRecord) -> bool {
        let text = self.text.to_lowercase();
        (text.is_empty() || game.title.to_lowercase().contains(&text))
            && (self.statuses.is_empty() || self.statuses.contains(&game.status))
            && (self.platforms.is_empty() || self.platforms.contains(&game.platform))
            && self.format.accepts(game.format)
    }
}

// ── Page ────────────────────────────────────────────────────────────────────

/// One card on a collection page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageItem<'a> {
    pub game: &'a GameRecord,
    /// DLCs nested under a base game. Always empty while filtering.
    pub dlcs: Vec<&'a GameRecord>,
    /// A DLC shown as its own item because a filter is active.
    pub standalone_dlc: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage<'a> {
    pub items: Vec<PageItem<'a>>,
    /// 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Number of items across all pages.
    pub universe_len: usize,
    pub active_filtering: bool,
}

/// Records matching `query`, in `query.sort` order. Ties keep record order.
pub fn filter_and_sort<'a>(records: &'a [GameRecord], query: &CollectionQuery) -> Vec<&'a GameRecord> {
    let mut matched: Vec<&GameRecord> = records.iter().filter(|g| query.matches(g)).collect();
    matched.sort_by(|a, b| query.sort.compare(a, b));
    matched
}

/// The items a page can be drawn from: base games when not filtering,
/// every match otherwise.
fn universe<'a>(records: &'a [GameRecord], query: &CollectionQuery) -> Vec<&'a GameRecord> {
    let sorted = filter_and_sort(records, query);
    if query.is_filtering() {
        sorted
    } else {
        sorted.into_iter().filter(|g| !g.is_dlc()).collect()
    }
}

pub fn total_pages(universe_len: usize, page_size: usize) -> usize {
    universe_len.div_ceil(page_size.max(1))
}

/// Build page `page` (1-based) of the collection.
pub fn paginate<'a>(
    records: &'a [GameRecord],
    query: &CollectionQuery,
    page: usize,
    page_size: usize,
) -> CollectionPage<'a> {
    let page_size = page_size.max(1);
    let active_filtering = query.is_filtering();
    let universe = universe(records, query);
    let universe_len = universe.len();

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items = universe
        .into_iter()
        .skip(start)
        .take(page_size)
        .map(|game| {
            if active_filtering {
                PageItem {
                    game,
                    dlcs: Vec::new(),
                    standalone_dlc: game.is_dlc(),
                }
            } else {
                PageItem {
                    game,
                    dlcs: records
                        .iter()
                        .filter(|d| d.parent_id == Some(game.id))
                        .collect(),
                    standalone_dlc: false,
                }
            }
        })
        .collect();

    CollectionPage {
        items,
        page,
        total_pages: total_pages(universe_len, page_size),
        universe_len,
        active_filtering,
    }
}

/// Base games whose title contains `text`, for choosing a DLC's parent.
pub fn base_games_matching<'a>(records: &'a [GameRecord], text: &str) -> Vec<&'a GameRecord> {
    let needle = text.trim().to_lowercase();
    records
        .iter()
        .filter(|g| !g.is_dlc() && g.title.to_lowercase().contains(&needle))
        .collect()
}

// ── Title Collation ─────────────────────────────────────────────────────────

/// Locale-style title comparison. Titles are compared first with accents and
/// case removed, then accented letters sort after plain ones, then lowercase
/// before uppercase. The raw strings break any remaining tie.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.nfd().flat_map(char::to_lowercase).cmp(b.nfd().flat_map(char::to_lowercase)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

/// Lowercased title with combining marks stripped after NFD decomposition.
fn base_letters(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    for c in title.nfd().filter(|c| !is_combining_mark(*c)) {
        // Letters with a stroke or ligature have no decomposition.
        match c {
            'ł' | 'Ł' => key.push('l'),
            'ø' | 'Ø' => key.push('o'),
            'đ' | 'Đ' | 'ð' | 'Ð' => key.push('d'),
            'ħ' | 'Ħ' => key.push('h'),
            'ı' => key.push('i'),
            'ß' | 'ẞ' => key.push_str("ss"),
            'æ' | 'Æ' => key.push_str("ae"),
            'œ' | 'Œ' => key.push_str("oe"),
            'þ' | 'Þ' => key.push_str("th"),
            other => key.extend(other.to_lowercase()),
        }
    }
    key
}

// ── View State ──────────────────────────────────────────────────────────────

/// Query plus current page. Changing any criterion returns to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView {
    query: CollectionQuery,
    page: usize,
    page_size: usize,
}

impl Default for CollectionView {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionView {
    pub fn new() -> Self {
        Self::with_query(CollectionQuery::default())
    }

    pub fn with_query(query: CollectionQuery) -> Self {
        Self {
            query,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.page = 1;
    }

    pub fn set_statuses(&mut self, statuses: impl IntoIterator<Item = Status>) {
        self.query.statuses = statuses.into_iter().collect();
        self.page = 1;
    }

    /// Add the status to the filter, or remove it if already present.
    pub fn toggle_status(&mut self, status: Status) {
        if !self.query.statuses.remove(&status) {
            self.query.statuses.insert(status);
        }
        self.page = 1;
    }

    pub fn set_platforms(&mut self, platforms: impl IntoIterator<Item = Platform>) {
        self.query.platforms = platforms.into_iter().collect();
        self.page = 1;
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        if !self.query.platforms.remove(&platform) {
            self.query.platforms.insert(platform);
        }
        self.page = 1;
    }

    pub fn set_format(&mut self, format: FormatFilter) {
        self.query.format = format;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.page = 1;
    }

    /// Drop every filter, keeping the sort order.
    pub fn clear_filters(&mut self) {
        self.query = CollectionQuery {
            sort: self.query.sort,
            ..Default::default()
        };
        self.page = 1;
    }

    /// The full filtered and sorted list, ignoring pagination and grouping.
    pub fn filtered<'a>(&self, records: &'a [GameRecord]) -> Vec<&'a GameRecord> {
        filter_and_sort(records, &self.query)
    }

    pub fn total_pages(&self, records: &[GameRecord]) -> usize {
        total_pages(universe(records, &self.query).len(), self.page_size)
    }

    pub fn current_page<'a>(&self, records: &'a [GameRecord]) -> CollectionPage<'a> {
        paginate(records, &self.query, self.page, self.page_size)
    }

    /// Jump to `page`, clamped to `1..=total_pages`.
    pub fn set_page(&mut self, records: &[GameRecord], page: usize) {
        let last = self.total_pages(records).max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next_page(&mut self, records: &[GameRecord]) {
        self.set_page(records, self.page + 1);
    }

    pub fn prev_page(&mut self, records: &[GameRecord]) {
        self.set_page(records, self.page.saturating_sub(1));
    }
}
