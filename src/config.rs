use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .field("log_level", &self.log_level)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_url: "sqlite://users.db".to_string(),
            database_max_connections: 5,
            log_level: "info".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Reads settings from the process environment, after loading `.env` if present.
    /// Unset or unparsable values fall back to [`Config::default`].
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            request_timeout: parsed("REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
