use standboard_core::slot::DEFAULT_STAND_COUNT;
use standboard_core::types::StandId;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Number of physical stands in the slot grid (default: `6`).
    pub stand_count: StandId,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STAND_COUNT`          | `6`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let stand_count = std::env::var("STAND_COUNT")
            .map(|v| parse_stand_count(&v).unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or(DEFAULT_STAND_COUNT);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            stand_count,
        }
    }
}

/// Parse `STAND_COUNT`. Stand ids are `SMALLINT`, so the count must fit in
/// `1..=i16::MAX`.
pub fn parse_stand_count(raw: &str) -> Result<StandId, String> {
    match raw.trim().parse::<StandId>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(format!(
            "STAND_COUNT must be between 1 and {}, got '{raw}'",
            StandId::MAX
        )),
    }
}
