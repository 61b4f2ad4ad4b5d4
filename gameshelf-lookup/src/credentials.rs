use std::path::{Path, PathBuf};

use crate::error::LookupError;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "RAWG_API_KEY";

/// A RAWG API key. `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Load the key. Priority: env var > config file.
    pub fn load() -> Result<Self, LookupError> {
        let file = config_path().and_then(|p| load_config_file(&p));
        resolve(std::env::var(API_KEY_ENV).ok(), file).ok_or_else(|| {
            LookupError::Config(format!(
                "Missing RAWG API key. Set {} or run `gameshelf config set-key`",
                API_KEY_ENV
            ))
        })
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

/// Where the API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    rawg: Option<RawgConfig>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct RawgConfig {
    api_key: Option<String>,
}

/// Pick the first non-blank key from the environment value and the file value.
pub(crate) fn resolve(env: Option<String>, file: Option<String>) -> Option<ApiKey> {
    env.into_iter()
        .chain(file)
        .map(ApiKey::new)
        .find(|k| !k.0.is_empty())
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gameshelf").join("credentials.toml"))
}

/// Save the key to the default config file. Returns the path written.
pub fn save_to_file(key: &ApiKey) -> Result<PathBuf, LookupError> {
    let path = config_path()
        .ok_or_else(|| LookupError::Config("Could not determine config directory".to_string()))?;
    save_to_path(key, &path)?;
    Ok(path)
}

/// Save the key to `path`, creating parent directories as needed.
pub fn save_to_path(key: &ApiKey, path: &Path) -> Result<(), LookupError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        rawg: Some(RawgConfig {
            api_key: Some(key.expose().to_string()),
        }),
    };
    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| LookupError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where the API key is coming from.
pub fn key_source() -> KeySource {
    if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        KeySource::EnvVar(API_KEY_ENV)
    } else if config_path().and_then(|p| load_config_file(&p)).is_some() {
        KeySource::ConfigFile
    } else {
        KeySource::Missing
    }
}

/// Read the `[rawg] api_key` entry from a credentials file.
pub fn load_config_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    config.rawg?.api_key.filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
