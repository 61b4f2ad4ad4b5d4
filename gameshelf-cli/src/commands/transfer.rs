use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_collection::CollectionView;
use gameshelf_import::{import_csv, write_export};
use gameshelf_lookup::RawgClient;

use super::{Context, catalog_client, query_from, success, warning};
use crate::cli_types::FilterArgs;
use crate::error::CliError;
use crate::progress::BarProgress;

/// Import a CSV file into the signed-in collection.
pub(crate) async fn run_import(ctx: &Context, file: &Path) -> Result<(), CliError> {
    let content = std::fs::read_to_string(file)?;
    let store = ctx.signed_in_store().await?;

    let client = match catalog_client() {
        Ok(client) => Some(client),
        Err(e) => {
            warning(format!("{}; games will use the placeholder cover", e));
            None
        }
    };

    log::info!(
        "{}",
        format!("Importing {}", file.display()).if_supports_color(Stdout, |t| t.bold()),
    );
    let progress = BarProgress::new(ctx.quiet);
    let report = import_csv::<_, RawgClient>(
        store.gateway(),
        store.user_id(),
        client.as_ref(),
        &content,
        &progress,
    )
    .await?;

    for err in &report.errors {
        let title = if err.title.is_empty() {
            String::new()
        } else {
            format!(" ({})", err.title)
        };
        warning(format!("Line {}{}: {}", err.line, title, err.problem));
    }
    if report.lookup_misses > 0 {
        log::info!(
            "  {} game(s) not found in the catalog use the placeholder cover",
            report.lookup_misses
        );
    }
    success(format!(
        "Imported {} of {} rows",
        report.imported, report.total_rows
    ));
    Ok(())
}

/// Export the filtered collection to a CSV file.
pub(crate) async fn run_export(
    ctx: &Context,
    file: &Path,
    filters: &FilterArgs,
) -> Result<(), CliError> {
    let store = ctx.signed_in_store().await?;
    let view = CollectionView::with_query(query_from(filters));
    let filtered = view.filtered(store.records());

    let written = write_export(file, &filtered)?;
    success(format!("Exported {} games to {}", written, file.display()));
    Ok(())
}
