use std::{ffi::OsString, time::Duration};

use anyhow::Result;

use crate::{
    config::Config, consts::DEFAULT_CONFIG_PATH, database::Database, rate_limiter::RateLimiter,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub async fn try_new(config_path: Option<OsString>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(|| OsString::from(DEFAULT_CONFIG_PATH));
        let path = std::path::PathBuf::from(config_path);

        let config = Config::read_or_create(&path).await?;
        let database = Database::try_new(&config.database).await?;
        let rate_limiter = RateLimiter::new(
            config.server.rate_limit_max_requests,
            Duration::from_secs(config.server.rate_limit_window_seconds),
        );

        Ok(Self {
            config,
            database,
            rate_limiter,
        })
    }
}
