use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_collection::{CollectionStats, CollectionView};

use super::{Context, query_from};
use crate::cli_types::FilterArgs;
use crate::error::CliError;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Print dashboard figures for the filtered collection.
pub(crate) async fn run_stats(ctx: &Context, filters: &FilterArgs) -> Result<(), CliError> {
    let store = ctx.signed_in_store().await?;
    let view = CollectionView::with_query(query_from(filters));
    let stats = CollectionStats::from_records(view.filtered(store.records()));

    if stats.total == 0 {
        log::info!("No games to summarize.");
        return Ok(());
    }

    log::info!("{}", "Collection".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Games:       {}", stats.total);
    log::info!(
        "  Completed:   {} ({}%)",
        stats.completed,
        stats.completion_percent()
    );
    log::info!("  Backlog:     {}", stats.backlog);
    log::info!(
        "  Avg rating:  {}",
        stats
            .average_rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string())
    );
    log::info!(
        "  Physical:    {}  Digital: {}",
        stats.physical,
        stats.digital
    );

    log::info!("");
    log::info!("{}", "By status".if_supports_color(Stdout, |t| t.bold()));
    for (status, count) in &stats.by_status {
        log::info!("  {:<11} {:>4} {}", status.label(), count, bar(*count, stats.total));
    }

    log::info!("");
    log::info!("{}", "Top platforms".if_supports_color(Stdout, |t| t.bold()));
    for (platform, count) in &stats.top_platforms {
        log::info!(
            "  {:<12} {:>4} {}",
            platform.label(),
            count,
            bar(*count, stats.total)
        );
    }

    let rated: usize = stats.rating_histogram.iter().sum();
    if rated > 0 {
        log::info!("");
        log::info!("{}", "Ratings".if_supports_color(Stdout, |t| t.bold()));
        for (score, count) in stats.rating_histogram.iter().enumerate().rev() {
            if *count > 0 {
                log::info!("  {:>2} {:>4} {}", score, count, bar(*count, rated));
            }
        }
    }

    if !stats.finished_by_year.is_empty() {
        log::info!("");
        log::info!("{}", "Finished per year".if_supports_color(Stdout, |t| t.bold()));
        for (year, count) in &stats.finished_by_year {
            log::info!("  {} {:>4}", year, count);
        }
        log::info!("");
        log::info!("{}", "Finished per month".if_supports_color(Stdout, |t| t.bold()));
        let finished: usize = stats.finished_by_month.iter().sum();
        for (month, count) in MONTHS.iter().zip(stats.finished_by_month.iter()) {
            log::info!("  {} {:>4} {}", month, count, bar(*count, finished));
        }
    }
    Ok(())
}

/// A proportional bar, 30 cells wide at 100%.
fn bar(count: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    let width = (count * 30).div_ceil(total);
    format!(
        "{}",
        "\u{2588}"
            .repeat(width)
            .if_supports_color(Stdout, |t| t.cyan())
    )
}
