use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{Format, GameId, GameRecord, NewGame, Platform, Status};
use gameshelf_collection::base_games_matching;
use gameshelf_lookup::{CatalogEntry, CatalogSearch, SEARCH_PAGE_SIZE, enrich_entries};

use super::{Context, catalog_client, game_line, success};
use crate::error::CliError;
use crate::progress::spinner;

/// Search the catalog and print one page of results.
pub(crate) async fn run_search(
    ctx: &Context,
    query: &str,
    page: u32,
    details: bool,
) -> Result<(), CliError> {
    let client = catalog_client()?;
    let page = page.max(1);

    let pb = spinner(format!("Searching for \"{}\"...", query), ctx.quiet);
    let result = client.search_catalog(query, page).await;
    pb.finish_and_clear();
    let mut found = result?;

    if found.results.is_empty() {
        log::info!("No results for \"{}\".", query);
        return Ok(());
    }

    if details {
        let pb = spinner("Fetching details...", ctx.quiet);
        enrich_entries(&client, &mut found.results).await;
        pb.finish_and_clear();
    }

    let first = (page as usize - 1) * SEARCH_PAGE_SIZE as usize;
    for (i, entry) in found.results.iter().enumerate() {
        print_entry(first + i + 1, entry, details);
    }

    let total_pages = found.total.div_ceil(u64::from(SEARCH_PAGE_SIZE));
    log::info!("");
    log::info!(
        "Page {} of {} ({} results)",
        page,
        total_pages.max(1),
        found.total
    );
    Ok(())
}

fn print_entry(number: usize, entry: &CatalogEntry, details: bool) {
    let score = if entry.critic_score > 0 {
        format!(" Metacritic {}", entry.critic_score)
    } else {
        String::new()
    };
    log::info!(
        "  {:>3}. {} ({}){}",
        number,
        entry.name.if_supports_color(Stdout, |t| t.bold()),
        entry.year_label(),
        score.if_supports_color(Stdout, |t| t.green()),
    );
    if details && !entry.description.is_empty() {
        let summary: String = entry.description.chars().take(160).collect();
        log::info!(
            "       {}",
            summary.trim().if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

pub(crate) struct AddOptions {
    pub pick: usize,
    pub platform: Option<Platform>,
    pub format: Format,
    pub status: Status,
    pub dlc_of: Option<GameId>,
    pub dlc_of_title: Option<String>,
}

/// Search the catalog, take the chosen hit with its details, and add it.
pub(crate) async fn run_add(ctx: &Context, query: &str, opts: AddOptions) -> Result<(), CliError> {
    let mut store = ctx.signed_in_store().await?;
    let client = catalog_client()?;
    let parent_id = match (opts.dlc_of, &opts.dlc_of_title) {
        (Some(id), _) => Some(id),
        (None, Some(text)) => Some(resolve_parent(store.records(), text)?),
        (None, None) => None,
    };

    let pb = spinner(format!("Searching for \"{}\"...", query), ctx.quiet);
    let result = client.search_catalog(query, 1).await;
    pb.finish_and_clear();
    let found = result?;

    let index = opts.pick.max(1) - 1;
    let Some(mut entry) = found.results.into_iter().nth(index) else {
        return Err(CliError::other(format!(
            "No result #{} for \"{}\"",
            opts.pick, query
        )));
    };

    let pb = spinner(format!("Fetching details for {}...", entry.name), ctx.quiet);
    enrich_entries(&client, std::slice::from_mut(&mut entry)).await;
    pb.finish_and_clear();

    let mut game = NewGame {
        title: entry.name.clone(),
        platform: opts.platform,
        format: opts.format,
        status: opts.status,
        parent_id,
        ..Default::default()
    };
    entry.fill_new_game(&mut game);

    let added = store.add_game(game).await?;
    success(format!("Added {}", game_line(added)));
    Ok(())
}

/// Pick the base game a new DLC belongs to. An exact title wins when the
/// text matches several games.
fn resolve_parent(records: &[GameRecord], text: &str) -> Result<GameId, CliError> {
    let candidates = base_games_matching(records, text);
    match candidates.as_slice() {
        [only] => Ok(only.id),
        [] => Err(CliError::other(format!("No base game matches \"{}\"", text))),
        many => {
            let wanted = text.trim().to_lowercase();
            if let Some(exact) = many.iter().find(|g| g.title.to_lowercase() == wanted) {
                return Ok(exact.id);
            }
            let names: Vec<String> = many
                .iter()
                .map(|g| format!("#{} {}", g.id, g.title))
                .collect();
            Err(CliError::other(format!(
                "\"{}\" matches several base games ({}); use --dlc-of <ID>",
                text,
                names.join(", ")
            )))
        }
    }
}

/// Print alternative covers for a title.
pub(crate) async fn run_covers(ctx: &Context, query: &str) -> Result<(), CliError> {
    let client = catalog_client()?;
    let pb = spinner(format!("Searching covers for \"{}\"...", query), ctx.quiet);
    let result = client.search_covers(query).await;
    pb.finish_and_clear();
    let covers = result?;

    if covers.is_empty() {
        log::info!("No covers found for \"{}\".", query);
        return Ok(());
    }
    for (i, cover) in covers.iter().enumerate() {
        log::info!(
            "  {:>2}. {}",
            i + 1,
            cover.name.if_supports_color(Stdout, |t| t.bold())
        );
        match &cover.image_url {
            Some(url) => log::info!("      {}", url.if_supports_color(Stdout, |t| t.cyan())),
            None => log::info!("      {}", "(no image)".if_supports_color(Stdout, |t| t.dimmed())),
        }
    }
    log::info!("");
    log::info!("Use `gameshelf set-cover <id> <url>` to apply one.");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/add_tests.rs"]
mod tests;
