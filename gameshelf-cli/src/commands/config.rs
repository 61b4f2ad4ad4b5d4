use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_lookup::{ApiKey, KeySource};

use super::{Context, success};
use crate::error::CliError;
use crate::settings::{Settings, settings_path};

/// Show settings, database location and where the API key comes from.
pub(crate) fn run_config_show(ctx: &Context) -> Result<(), CliError> {
    let settings = Settings::load()?;

    log::info!(
        "{}",
        "gameshelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match settings_path() {
        Some(p) if p.exists() => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  Settings file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }

    match settings.resolve_db(ctx.db.as_deref()) {
        Ok(db) => log::info!(
            "  Database:      {}",
            db.display().if_supports_color(Stdout, |t| t.cyan())
        ),
        Err(e) => log::info!("  Database:      {}", e.if_supports_color(Stdout, |t| t.red())),
    }
    log::info!(
        "  Session:       {}",
        if settings.session_token.is_some() {
            "saved"
        } else {
            "none"
        }
    );

    let source = gameshelf_lookup::key_source();
    let key_line = match source {
        KeySource::Missing => format!("{}", "not set".if_supports_color(Stdout, |t| t.red())),
        ref other => format!(
            "{} {}",
            ApiKey::load()
                .map(|k| mask_value(k.expose()))
                .unwrap_or_default(),
            format!("({})", other).if_supports_color(Stdout, |t| t.dimmed()),
        ),
    };
    log::info!("  RAWG API key:  {}", key_line);
    Ok(())
}

fn mask_value(s: &str) -> String {
    match s.get(..4) {
        Some(prefix) if s.len() > 4 => format!("{}****", prefix),
        _ => "****".to_string(),
    }
}

/// Print the settings and credentials file paths.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let settings = settings_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    log::info!("{}", settings.display());
    if let Some(credentials) = gameshelf_lookup::config_path() {
        log::info!("{}", credentials.display());
    }
    Ok(())
}

pub(crate) fn run_config_set_key(key: &str) -> Result<(), CliError> {
    let key = ApiKey::new(key);
    if key.expose().is_empty() {
        return Err(CliError::config("API key must not be empty"));
    }
    let path = gameshelf_lookup::save_to_file(&key)?;
    success(format!("Saved API key to {}", path.display()));
    Ok(())
}
