use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub x_bearer_token: String,
    pub pushbullet_token: String,
    pub username: String,
    pub check_interval: Duration,
    pub state_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let check_interval_secs: u64 = env::var("CHECK_INTERVAL")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("CHECK_INTERVAL must be a valid number of seconds")?;

        Ok(Self {
            x_bearer_token: env::var("X_BEARER_TOKEN")
                .context("X_BEARER_TOKEN must be set")?,
            pushbullet_token: env::var("PUSHBULLET_TOKEN")
                .context("PUSHBULLET_TOKEN must be set")?,
            username: env::var("X_USERNAME")
                .unwrap_or_else(|_| "PokemonDealsTCG".to_string()),
            check_interval: Duration::from_secs(check_interval_secs),
            state_file: env::var("STATE_FILE")
                .unwrap_or_else(|_| "data/last_post_id.json".to_string())
                .into(),
        })
    }
}
