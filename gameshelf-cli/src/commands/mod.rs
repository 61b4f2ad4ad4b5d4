pub(crate) mod auth;
pub(crate) mod config;
pub(crate) mod game;
pub(crate) mod list;
pub(crate) mod queue;
pub(crate) mod search;
pub(crate) mod stats;
pub(crate) mod transfer;

use std::io::Write;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{AuthError, AuthGateway, GameRecord};
use gameshelf_collection::{CollectionQuery, CollectionStore};
use gameshelf_db::LocalGateway;
use gameshelf_lookup::{ApiKey, RawgClient};

use crate::cli_types::FilterArgs;
use crate::error::CliError;
use crate::settings::Settings;

/// Options shared by every command.
pub(crate) struct Context {
    pub db: Option<PathBuf>,
    pub quiet: bool,
}

impl Context {
    /// Open the collection database named by `--db` or the settings.
    pub(crate) fn open_gateway(&self, settings: &Settings) -> Result<LocalGateway, CliError> {
        let path = settings.resolve_db(self.db.as_deref())?;
        log::debug!("Opening database at {}", path.display());
        LocalGateway::open(&path).map_err(|e| {
            CliError::database(format!("Failed to open {}: {}", path.display(), e))
        })
    }

    /// Resume the saved session and load the signed-in user's collection.
    pub(crate) async fn signed_in_store(&self) -> Result<CollectionStore<LocalGateway>, CliError> {
        let settings = Settings::load()?;
        let gateway = self.open_gateway(&settings)?;
        let token = settings
            .session_token
            .as_deref()
            .ok_or(CliError::NotSignedIn)?;
        let session = match gateway.resume(token).await {
            Ok(session) => session,
            Err(AuthError::NotSignedIn) => return Err(CliError::NotSignedIn),
            Err(e) => return Err(e.into()),
        };

        let mut store = CollectionStore::new(gateway, session.user.id);
        store.refresh().await?;
        Ok(store)
    }
}

/// A catalog client using the configured API key.
pub(crate) fn catalog_client() -> Result<RawgClient, CliError> {
    Ok(RawgClient::new(ApiKey::load()?)?)
}

pub(crate) fn query_from(filters: &FilterArgs) -> CollectionQuery {
    CollectionQuery {
        text: filters.text.clone().unwrap_or_default(),
        statuses: filters.status.iter().copied().collect(),
        platforms: filters.platform.iter().copied().collect(),
        format: filters.format,
        sort: filters.sort,
    }
}

pub(crate) fn rating_label(rating: Option<f32>) -> String {
    match rating {
        Some(r) => format!("{}/10", r),
        None => "-".to_string(),
    }
}

/// One-line summary: `#id Title [Platform] Status`.
pub(crate) fn game_line(game: &GameRecord) -> String {
    format!(
        "{} {} [{}] {}{}",
        format!("#{}", game.id).if_supports_color(Stdout, |t| t.dimmed()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
        game.platform.if_supports_color(Stdout, |t| t.cyan()),
        game.status,
        match game.user_rating {
            Some(r) => format!(" \u{2605} {}", r),
            None => String::new(),
        },
    )
}

pub(crate) fn success(msg: impl std::fmt::Display) {
    log::info!("{} {}", "\u{2714}".if_supports_color(Stdout, |t| t.green()), msg);
}

pub(crate) fn warning(msg: impl std::fmt::Display) {
    log::warn!("{} {}", "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()), msg);
}

/// Ask for a line on stdin. Returns the trimmed answer.
pub(crate) fn prompt(label: &str) -> Result<String, CliError> {
    print!("  {}: ", label);
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// The given value, or a prompt for it when absent.
pub(crate) fn value_or_prompt(value: Option<String>, label: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}
