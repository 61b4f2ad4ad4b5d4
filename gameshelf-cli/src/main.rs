//! gameshelf CLI
//!
//! Command-line front end for a personal video game collection: accounts,
//! catalog search, the play queue, CSV import/export and statistics.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
use commands::search::AddOptions;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }
}

/// Install `env_logger`. gameshelf crates log at the level picked by
/// `--quiet`/`--verbose`; `RUST_LOG` still overrides.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("gameshelf", level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "[{} {:<5} {}] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(buf, "{}", record.args())
            }
        });
    // Only fails if a logger is already installed.
    let _ = builder.try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context {
        db: cli.db,
        quiet: cli.quiet,
    };

    // Config commands never touch the database or the network.
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetKey { key } => commands::config::run_config_set_key(key),
        };
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(dispatch(&ctx, cli.command))
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<(), CliError> {
    use commands::{auth, game, list, queue, search, stats, transfer};

    match command {
        Commands::Signup { email, password } => auth::run_signup(ctx, &email, password).await,
        Commands::Login { email, password } => auth::run_login(ctx, &email, password).await,
        Commands::Logout => auth::run_logout(ctx).await,
        Commands::ResetPassword { email } => auth::run_reset_password(ctx, &email).await,
        Commands::SetPassword { password } => auth::run_set_password(ctx, password).await,
        Commands::Whoami => auth::run_whoami(ctx).await,
        Commands::List {
            filters,
            page,
            table,
        } => list::run_list(ctx, &filters, page, table).await,
        Commands::Show { id } => list::run_show(ctx, id).await,
        Commands::Search {
            query,
            page,
            details,
        } => search::run_search(ctx, &query, page, details).await,
        Commands::Add {
            query,
            pick,
            platform,
            format,
            status,
            dlc_of,
            dlc_of_title,
        } => {
            let opts = AddOptions {
                pick,
                platform,
                format,
                status,
                dlc_of,
                dlc_of_title,
            };
            search::run_add(ctx, &query, opts).await
        }
        Commands::Edit { id, changes } => game::run_edit(ctx, id, &changes).await,
        Commands::Notes { id, text } => game::run_notes(ctx, id, &text).await,
        Commands::Delete { id } => game::run_delete(ctx, id).await,
        Commands::Queue {
            action,
            show_hidden,
        } => queue::run_queue(ctx, action, show_hidden).await,
        Commands::Covers { query } => search::run_covers(ctx, &query).await,
        Commands::SetCover { id, url } => game::run_set_cover(ctx, id, &url).await,
        Commands::Import { file } => transfer::run_import(ctx, &file).await,
        Commands::Export { file, filters } => transfer::run_export(ctx, &file, &filters).await,
        Commands::Stats { filters } => stats::run_stats(ctx, &filters).await,
        Commands::Config { .. } => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
