use std::str::FromStr;

/// Which [`TrackStore`](trackshare_db::TrackStore) implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "Unknown track store '{other}'. Must be one of: postgres, memory"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the API key have defaults suitable for local
/// development. Without an API key every write request is refused.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared secret required in the `X-API-Key` header for uploads and deletes.
    pub api_key: Option<String>,
    /// Storage engine (default: postgres).
    pub store_backend: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3000`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `API_KEY`              | unset      |
    /// | `TRACK_STORE`          | `postgres` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let api_key = std::env::var("API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let store_backend = std::env::var("TRACK_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .parse::<StoreBackend>()
            .unwrap_or_else(|e| panic!("TRACK_STORE is invalid: {e}"));

        Self {
            host,
            port,
            request_timeout_secs,
            api_key,
            store_backend,
        }
    }
}
