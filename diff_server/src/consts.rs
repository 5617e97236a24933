use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

pub const DEFAULT_SQLITE_URL: &str = "sqlite://saved_diffs.sqlite?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 12;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_BODY_SIZE_MB: usize = 16;

pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 120;
pub const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

pub const SHARE_TOKEN_LENGTH: usize = 22;
