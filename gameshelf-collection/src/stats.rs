//! Dashboard aggregates over a record set.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use gameshelf_catalog::{Format, GameRecord, Platform, STATUSES, Status};

/// How many platforms the platform chart shows.
pub const TOP_PLATFORMS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStats {
    pub total: usize,
    /// `Completado` plus `100%`.
    pub completed: usize,
    /// `Pendiente` plus `Jugando`.
    pub backlog: usize,
    /// Mean of ratings above zero; `None` when nothing is rated.
    pub average_rating: Option<f32>,
    pub physical: usize,
    pub digital: usize,
    /// Count per status, in vocabulary order. Statuses with no records are
    /// included with 0.
    pub by_status: Vec<(Status, usize)>,
    /// Most common platforms, highest count first.
    pub top_platforms: Vec<(Platform, usize)>,
    /// Index `n` counts ratings that round to `n`.
    pub rating_histogram: [usize; 11],
    /// Finished games per year of `finished_at`.
    pub finished_by_year: BTreeMap<i32, usize>,
    /// Finished games per calendar month (index 0 = January), all years.
    pub finished_by_month: [usize; 12],
}

impl CollectionStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        let mut stats = Self::default();
        let mut status_counts: HashMap<Status, usize> = HashMap::new();
        let mut platform_counts: HashMap<Platform, usize> = HashMap::new();
        let mut rating_sum = 0.0f32;
        let mut rated = 0usize;

        for game in records {
            stats.total += 1;
            *status_counts.entry(game.status).or_default() += 1;
            *platform_counts.entry(game.platform).or_default() += 1;

            if game.status.is_finished() {
                stats.completed += 1;
                if let Some(date) = game.finished_at {
                    *stats.finished_by_year.entry(date.year()).or_default() += 1;
                    stats.finished_by_month[date.month0() as usize] += 1;
                }
            }
            if matches!(game.status, Status::Pending | Status::Playing) {
                stats.backlog += 1;
            }
            match game.format {
                Format::Physical => stats.physical += 1,
                Format::Digital => stats.digital += 1,
            }
            if let Some(rating) = game.user_rating.filter(|r| *r > 0.0) {
                rating_sum += rating;
                rated += 1;
                let bucket = rating.round() as usize;
                if bucket <= 10 {
                    stats.rating_histogram[bucket] += 1;
                }
            }
        }

        if rated > 0 {
            stats.average_rating = Some(rating_sum / rated as f32);
        }
        stats.by_status = STATUSES
            .iter()
            .map(|s| (*s, status_counts.get(s).copied().unwrap_or(0)))
            .collect();

        let mut platforms: Vec<(Platform, usize)> = platform_counts.into_iter().collect();
        platforms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        platforms.truncate(TOP_PLATFORMS);
        stats.top_platforms = platforms;

        stats
    }

    /// Share of finished games, rounded to a whole percent.
    pub fn completion_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Count for one status.
    pub fn status_count(&self, status: Status) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}
