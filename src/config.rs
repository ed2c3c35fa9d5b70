// Configuration loading and parsing (creatorscope.toml).
//
// The config file is optional: every field has a default, so a missing file
// yields a fully usable configuration pointed at a local backend. Lookup
// order is `config/creatorscope.toml` in the working directory, then the
// per-user config directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working directory and the user config dir.
pub const CONFIG_FILE: &str = "creatorscope.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub ui: UiConfig,
}

/// `[backend]` section: where the analysis service lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the analysis backend. The client appends `/analyze`.
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: "http://localhost:8000".to_string(),
        }
    }
}

/// `[ui]` section: render loop tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Render tick interval in milliseconds (~30 fps by default).
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { tick_ms: 33 }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate the config file at `path`.
pub(crate) fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// Search order: `config/creatorscope.toml` under the working directory,
/// then `creatorscope.toml` in the platform config directory. A file that
/// exists but fails to parse or validate is an error, not a fallback.
pub fn load_config() -> Result<Config, ConfigError> {
    let local = Path::new("config").join(CONFIG_FILE);
    if local.exists() {
        return load_config_from(&local);
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "creatorscope") {
        let user = dirs.config_dir().join(CONFIG_FILE);
        if user.exists() {
            return load_config_from(&user);
        }
    }

    Ok(Config::default())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.backend.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Validation {
            field: "backend.url".into(),
            message: format!("must be an http(s) origin, got `{url}`"),
        });
    }

    if config.ui.tick_ms == 0 {
        return Err(ConfigError::Validation {
            field: "ui.tick_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
