use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    /// Apps Script endpoint receiving the review-sheet rows. Unset disables mirroring.
    pub sheet_webapp_url: Option<String>,
    pub sheet_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            sheet_webapp_url: std::env::var("GOOGLE_SHEET_WEBAPP_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            sheet_timeout: Duration::from_secs(
                std::env::var("SHEET_TIMEOUT_SECS")
                    .ok()
                    .map(|secs| secs.parse().context("SHEET_TIMEOUT_SECS must be a number"))
                    .transpose()?
                    .unwrap_or(10),
            ),
        })
    }
}
