//! Runtime configuration.
//!
//! Layering (later wins): built-in defaults, YAML file, environment, CLI flags.
//! The YAML file is `--config PATH`, else `LIRI_CONFIG`, else `liri.yaml` in the
//! working directory when it exists.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "liri.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_file: PathBuf,
    pub batch_file: PathBuf,
    pub http_timeout_secs: u64,
    pub twitter: TwitterConfig,
    pub spotify: SpotifyConfig,
    pub omdb: OmdbConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("log.txt"),
            batch_file: PathBuf::from("random.txt"),
            http_timeout_secs: 30,
            twitter: TwitterConfig::default(),
            spotify: SpotifyConfig::default(),
            omdb: OmdbConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    /// App-only bearer token; skips the token exchange when set.
    pub bearer_token: Option<String>,
    pub user_id: String,
    pub count: u32,
    pub api_base: String,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            consumer_key: None,
            consumer_secret: None,
            bearer_token: None,
            user_id: "80820758".into(),
            count: 20,
            api_base: "https://api.twitter.com".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub api_base: String,
    pub accounts_base: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_base: "https://api.spotify.com".into(),
            accounts_base: "https://accounts.spotify.com".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: "trilogy".into(),
            base_url: "http://www.omdbapi.com".into(),
        }
    }
}

impl Config {
    /// Load defaults + YAML + environment. An explicitly requested file must
    /// exist; the implicit `liri.yaml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("LIRI_CONFIG")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Override fields from environment variables. `lookup` is injectable so
    /// tests do not touch the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TWITTER_CONSUMER_KEY") {
            self.twitter.consumer_key = Some(v);
        }
        if let Some(v) = get("TWITTER_CONSUMER_SECRET") {
            self.twitter.consumer_secret = Some(v);
        }
        if let Some(v) = get("TWITTER_BEARER_TOKEN") {
            self.twitter.bearer_token = Some(v);
        }
        if let Some(v) = get("SPOTIFY_ID") {
            self.spotify.client_id = Some(v);
        }
        if let Some(v) = get("SPOTIFY_SECRET") {
            self.spotify.client_secret = Some(v);
        }
        if let Some(v) = get("OMDB_API_KEY") {
            self.omdb.api_key = v;
        }
        if let Some(v) = get("LIRI_LOG_FILE") {
            self.log_file = PathBuf::from(v);
        }
        if let Some(v) = get("LIRI_BATCH_FILE") {
            self.batch_file = PathBuf::from(v);
        }
    }
}
