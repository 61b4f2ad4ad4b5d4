use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{GameId, GameRecord};
use gameshelf_collection::{CollectionView, DEFAULT_PAGE_SIZE};

use super::{Context, game_line, query_from, rating_label, warning};
use crate::cli_types::FilterArgs;
use crate::error::CliError;

/// Print one page of the collection.
pub(crate) async fn run_list(
    ctx: &Context,
    filters: &FilterArgs,
    page: usize,
    table: bool,
) -> Result<(), CliError> {
    let store = ctx.signed_in_store().await?;
    print_page(store.records(), filters, page, table);
    Ok(())
}

pub(crate) fn print_page(records: &[GameRecord], filters: &FilterArgs, page: usize, table: bool) {
    if records.is_empty() {
        log::info!("Your collection is empty. Add a game with `gameshelf add <title>`.");
        return;
    }

    let mut view = CollectionView::with_query(query_from(filters)).with_page_size(DEFAULT_PAGE_SIZE);
    view.set_page(records, page);
    let current = view.current_page(records);

    if current.items.is_empty() {
        log::info!("No games match these filters.");
        return;
    }

    if table {
        log::info!(
            "{}",
            format!(
                "{:>5}  {:<40} {:<12} {:<9} {:<11} {:>6}",
                "ID", "Title", "Platform", "Format", "Status", "Rating"
            )
            .if_supports_color(Stdout, |t| t.bold()),
        );
        for item in &current.items {
            log::info!("{}", table_row(item.game));
        }
    } else {
        for item in &current.items {
            let dlc_tag = if item.standalone_dlc { " (DLC)" } else { "" };
            log::info!("  {}{}", game_line(item.game), dlc_tag);
            for dlc in &item.dlcs {
                log::info!(
                    "      {} {}",
                    "\u{21B3}".if_supports_color(Stdout, |t| t.dimmed()),
                    game_line(dlc)
                );
            }
        }
    }

    log::info!("");
    log::info!(
        "Page {} of {} ({} {})",
        current.page,
        current.total_pages,
        current.universe_len,
        if current.active_filtering {
            "matching games"
        } else {
            "games"
        },
    );
}

fn table_row(game: &GameRecord) -> String {
    let title: String = game.title.chars().take(40).collect();
    format!(
        "{:>5}  {:<40} {:<12} {:<9} {:<11} {:>6}",
        game.id,
        title,
        game.platform.label(),
        game.format.label(),
        game.status.label(),
        game.user_rating.map(|r| r.to_string()).unwrap_or_default(),
    )
}

/// Print one game in full. A game that no longer exists falls back to the
/// collection listing.
pub(crate) async fn run_show(ctx: &Context, id: GameId) -> Result<(), CliError> {
    let mut store = ctx.signed_in_store().await?;

    let game = match store.load_detail(id).await {
        Ok(game) => game.clone(),
        Err(e) if e.is_not_found() => {
            warning(format!("Game {} was not found; showing your collection", id));
            print_page(store.records(), &FilterArgs::default(), 1, false);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    log::info!("{}", game.title.if_supports_color(Stdout, |t| t.bold()));
    if let Some(parent) = store.parent_of(&game) {
        log::info!("  DLC of:       {}", game_line(parent));
    }
    log::info!("  Platform:     {}", game.platform);
    log::info!("  Format:       {}", game.format);
    log::info!("  Status:       {}", game.status);
    log::info!("  Your rating:  {}", rating_label(game.user_rating));
    if game.critic_score > 0 {
        log::info!("  Metacritic:   {}", game.critic_score);
    }
    if let Some(date) = game.started_at {
        log::info!("  Started:      {}", date);
    }
    if let Some(date) = game.finished_at {
        log::info!("  Finished:     {}", date);
    }
    if let Some(order) = game.play_order {
        let hidden = if game.is_hidden_in_queue { " (hidden)" } else { "" };
        log::info!("  Queue order:  {}{}", order, hidden);
    }
    if let Some(url) = &game.image_url {
        log::info!(
            "  Cover:        {}",
            url.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    if !game.screenshots.is_empty() {
        log::info!("  Screenshots:  {}", game.screenshots.len());
    }
    log::info!("  Added:        {}", game.created_at.format("%Y-%m-%d"));

    if let Some(notes) = &game.notes {
        log::info!("");
        log::info!("{}", "Notes".if_supports_color(Stdout, |t| t.bold()));
        for line in notes.lines() {
            log::info!("  {}", line);
        }
    }
    if let Some(description) = &game.description {
        log::info!("");
        log::info!("{}", "Description".if_supports_color(Stdout, |t| t.bold()));
        for line in description.lines().filter(|l| !l.trim().is_empty()) {
            log::info!("  {}", line);
        }
    }

    let dlcs = store.dlcs_of(game.id);
    if !dlcs.is_empty() {
        log::info!("");
        log::info!("{}", "DLCs".if_supports_color(Stdout, |t| t.bold()));
        for dlc in dlcs {
            log::info!("  {}", game_line(dlc));
        }
    }
    Ok(())
}
