//! Environment configuration for the binary.

use std::time::Duration;

use anyhow::Context;

const DEFAULT_POLL_SECS: u64 = 5;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the hosted backend (REST and auth live under it).
    pub store_url: String,
    /// Application api key, sent with every request.
    pub store_key: String,
    /// Session bearer token.
    pub access_token: String,
    /// Interval of the change-feed poll.
    pub poll_interval: Duration,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `FIESTA_STORE_URL` and `FIESTA_STORE_KEY` are required.
    /// `FIESTA_ACCESS_TOKEN` falls back to the store key (anonymous role)
    /// and `FIESTA_POLL_SECS` to 5 seconds.
    pub fn from_env() -> anyhow::Result<Self> {
        let store_url =
            std::env::var("FIESTA_STORE_URL").context("FIESTA_STORE_URL is not set")?;
        let store_key =
            std::env::var("FIESTA_STORE_KEY").context("FIESTA_STORE_KEY is not set")?;

        let access_token = std::env::var("FIESTA_ACCESS_TOKEN").unwrap_or_else(|_| {
            tracing::warn!("FIESTA_ACCESS_TOKEN not set; using the store key");
            store_key.clone()
        });

        let poll_interval = std::env::var("FIESTA_POLL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_SECS));

        Ok(Self {
            store_url,
            store_key,
            access_token,
            poll_interval,
        })
    }
}
