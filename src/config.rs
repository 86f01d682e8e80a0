use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl Config {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://loans.db";
    pub const DEFAULT_LISTEN_ADDR: &'static str = "0.0.0.0:3000";
    pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

    /// Reads configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.to_string());

        let listen_raw =
            lookup("LISTEN_ADDR").unwrap_or_else(|| Self::DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                name: "LISTEN_ADDR",
                value: listen_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => Self::DEFAULT_DB_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        name: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    })
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Config {
            database_url,
            listen_addr,
            db_max_connections,
        })
    }
}
