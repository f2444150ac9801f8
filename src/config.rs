use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

/// How the API key travels to the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// `?api_key=...` (TMDB v3 keys).
    #[default]
    Query,
    /// `Authorization: Bearer ...` (TMDB v4 read access tokens).
    Bearer,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(alias = "baseurl", rename = "baseurl")]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthMode,
    #[serde(alias = "apikeyfile", rename = "apikeyfile")]
    #[serde(default = "default_api_key_file")]
    pub api_key_file: String,
    #[serde(alias = "watchregion", rename = "watchregion")]
    #[serde(default = "default_watch_region")]
    pub watch_region: String,
    #[serde(alias = "timeout", rename = "timeout")]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(alias = "fetchdetails", rename = "fetchdetails")]
    #[serde(default)]
    pub fetch_details: bool,
    #[serde(alias = "maxdetaillookups", rename = "maxdetaillookups")]
    #[serde(default = "default_max_detail_lookups")]
    pub max_detail_lookups: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: AuthMode::default(),
            api_key_file: default_api_key_file(),
            watch_region: default_watch_region(),
            timeout_secs: default_timeout_secs(),
            fetch_details: false,
            max_detail_lookups: default_max_detail_lookups(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default = "default_candidates")]
    pub candidates: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> String {
    "5001".to_string()
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_api_key_file() -> String {
    ".tmdb_api_key".to_string()
}

fn default_watch_region() -> String {
    "US".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_detail_lookups() -> usize {
    20
}

fn default_candidates() -> usize {
    8
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Load `path` if given, otherwise run on defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.listen.address, self.listen.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidAddress(addr.clone()))
    }

    pub fn api_key_path(&self) -> &Path {
        Path::new(&self.upstream.api_key_file)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No API key: set {0} or put the key in {1}")]
    MissingCredential(&'static str, String),
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
}
