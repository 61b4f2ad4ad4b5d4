//! Persisted CLI settings: `settings.toml` in the gameshelf config dir.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    /// Database used when `--db` is not given.
    pub database: Option<PathBuf>,
    /// Token of the last signed-in session.
    pub session_token: Option<String>,
}

/// `~/.config/gameshelf/settings.toml` (platform equivalent).
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gameshelf").join("settings.toml"))
}

/// `~/.local/share/gameshelf/gameshelf.db` (platform equivalent).
pub(crate) fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("gameshelf").join("gameshelf.db"))
}

impl Settings {
    /// Load from the default location. A missing file yields defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::config(format!("Invalid {}: {}", path.display(), e)))
    }

    pub(crate) fn save(&self) -> Result<PathBuf, CliError> {
        let path = settings_path()
            .ok_or_else(|| CliError::config("Could not determine config directory"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to a sibling temp file, then rename over `path`.
    pub(crate) fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize settings: {}", e)))?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, path)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Database path: explicit flag, then saved setting, then the data dir.
    pub(crate) fn resolve_db(&self, flag: Option<&Path>) -> Result<PathBuf, CliError> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .or_else(default_db_path)
            .ok_or_else(|| CliError::config("Could not determine data directory; pass --db"))
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
