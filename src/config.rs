use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API read access token (bearer credential)
    #[serde(default)]
    pub tmdb_token: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language passed to every search request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Whether adult titles are included in search results
    #[serde(default)]
    pub tmdb_include_adult: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Returns the API token, failing when it is missing or blank
    pub fn require_token(&self) -> AppResult<&str> {
        match self.tmdb_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::Configuration(
                "TMDB_TOKEN is not defined in environment variables".to_string(),
            )),
        }
    }

    /// Socket address the presentation API binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
