//! Application configuration for Bulletin.
//!
//! User config lives at `~/.bulletin/bulletin.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BulletinError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "bulletin.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".bulletin";

// ---------------------------------------------------------------------------
// Config structs (matching bulletin.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which content source to serve from.
    #[serde(default)]
    pub mode: DataMode,

    /// CMS REST API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Request tuning.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Content source selector, fixed for the life of the process.
///
/// Modeled as explicit configuration injected at client construction,
/// never as mutable global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Fetch from the remote CMS, falling back to fixtures on failure.
    #[default]
    Live,
    /// Serve the bundled fixture data without touching the network.
    Fixture,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// CMS REST base URL, e.g. `https://cms.example.org/wp-json/wp/v2`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Route of the announcements collection under the base URL.
    #[serde(default = "default_news_route")]
    pub news_route: String,

    /// Route of the members collection under the base URL.
    #[serde(default = "default_members_route")]
    pub members_route: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            news_route: default_news_route(),
            members_route: default_members_route(),
        }
    }
}

fn default_base_url() -> String {
    "https://cms.example.org/wp-json/wp/v2".into()
}
fn default_news_route() -> String {
    "news".into()
}
fn default_members_route() -> String {
    "members".into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Records requested per call. There is no pagination protocol; this
    /// must be large enough to cover the full collection in one request.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Wall-clock bound per request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_per_page() -> u32 {
    100
}
fn default_timeout_secs() -> u64 {
    10
}

// ---------------------------------------------------------------------------
// Fetch options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetch options — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Maximum records to request per call.
    pub per_page: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl From<&AppConfig> for FetchOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            per_page: config.fetch.per_page,
            timeout: Duration::from_secs(config.fetch.timeout_secs),
        }
    }
}

impl ApiConfig {
    /// Absolute URL of the announcements collection.
    pub fn news_endpoint(&self) -> Result<url::Url> {
        join_route(&self.base_url, &self.news_route)
    }

    /// Absolute URL of the members collection.
    pub fn members_endpoint(&self) -> Result<url::Url> {
        join_route(&self.base_url, &self.members_route)
    }
}

/// Append a collection route to the configured base URL.
fn join_route(base: &str, route: &str) -> Result<url::Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), route);
    url::Url::parse(&joined)
        .map_err(|e| BulletinError::config(format!("invalid endpoint '{joined}': {e}")))
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.bulletin/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BulletinError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.bulletin/bulletin.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BulletinError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| BulletinError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| BulletinError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| BulletinError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BulletinError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("per_page"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.mode, DataMode::Live);
        assert_eq!(parsed.fetch.per_page, 100);
        assert_eq!(parsed.fetch.timeout_secs, 10);
    }

    #[test]
    fn fixture_mode_parses() {
        let toml_str = r#"
mode = "fixture"

[api]
base_url = "https://cms.association.example/wp-json/wp/v2"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.mode, DataMode::Fixture);
        assert_eq!(config.api.news_route, "news");
    }

    #[test]
    fn fetch_options_from_app_config() {
        let app = AppConfig::default();
        let opts = FetchOptions::from(&app);
        assert_eq!(opts.per_page, 100);
        assert_eq!(opts.timeout, Duration::from_secs(10));
    }

    #[test]
    fn endpoints_join_without_double_slash() {
        let mut api = ApiConfig::default();
        api.base_url = "https://cms.example.org/wp-json/wp/v2/".into();
        let news = api.news_endpoint().expect("news endpoint");
        assert_eq!(news.as_str(), "https://cms.example.org/wp-json/wp/v2/news");

        let members = api.members_endpoint().expect("members endpoint");
        assert!(members.as_str().ends_with("/members"));
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        let mut api = ApiConfig::default();
        api.base_url = "not a url".into();
        let err = api.news_endpoint().unwrap_err();
        assert!(err.to_string().contains("config error"));
    }
}
