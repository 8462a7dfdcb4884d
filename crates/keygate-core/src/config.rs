//! Configuration management for keygate.
//!
//! Loads configuration from ${KEYGATE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api;
use crate::forms::FormSettings;

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are kept while the user's
/// values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for keygate configuration and data.
    //!
    //! KEYGATE_HOME resolution order:
    //! 1. KEYGATE_HOME environment variable (if set)
    //! 2. ~/.config/keygate (default)
    //! 3. ./.keygate when no home directory can be determined

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "KEYGATE_HOME";

    /// Returns the keygate home directory.
    pub fn keygate_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV)
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".keygate"),
            |h| h.join(".config").join("keygate"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        keygate_home().join("config.toml")
    }

    /// Returns the path to the persisted auth token.
    pub fn token_path() -> PathBuf {
        keygate_home().join("token.json")
    }

    /// Returns the log directory used by the TUI.
    pub fn logs_dir() -> PathBuf {
        keygate_home().join("logs")
    }
}

/// Auth service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the auth service (env override: `KEYGATE_API_BASE_URL`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: Config::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL opened after a successful login.
    pub redirect_url: String,

    /// Lifetime of a status message, in milliseconds.
    pub message_ttl_ms: u64,

    /// Delay before the post-login redirect, in milliseconds.
    pub redirect_delay_ms: u64,

    /// Auth service settings.
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redirect_url: Self::DEFAULT_REDIRECT_URL.to_string(),
            message_ttl_ms: Self::DEFAULT_MESSAGE_TTL_MS,
            redirect_delay_ms: Self::DEFAULT_REDIRECT_DELAY_MS,
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_REDIRECT_URL: &str = "https://example.com/dashboard";
    const DEFAULT_MESSAGE_TTL_MS: u64 = 5000;
    const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
    const DEFAULT_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Used by `xtask update-default-config` to keep `default_config.toml`
    /// in sync with the values above.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        let generated =
            toml::to_string(&Config::default()).context("Failed to serialize default config")?;
        merge_with_template(&generated)
    }

    /// Saves only `api.base_url` to the given config file.
    ///
    /// Creates the file from the template if missing; otherwise merges the
    /// user's values into the latest template first.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        url::Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["api"]["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolved auth service base URL (env > config > default).
    ///
    /// # Errors
    /// Returns an error if the resolved URL is malformed.
    pub fn base_url(&self) -> Result<String> {
        api::resolve_base_url(self.api.base_url.as_deref())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.api.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.api.timeout_secs)))
        }
    }

    /// Builds an auth client from the resolved settings.
    ///
    /// # Errors
    /// Returns an error if the base URL is malformed or the client fails to build.
    pub fn auth_client(&self) -> Result<api::AuthClient> {
        api::AuthClient::new(&self.base_url()?, self.request_timeout())
    }

    /// Timing and redirect settings for the forms.
    pub fn form_settings(&self) -> FormSettings {
        FormSettings {
            message_ttl: Duration::from_millis(self.message_ttl_ms),
            redirect_url: self.redirect_url.clone(),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
        }
    }
}
