use std::str::FromStr;

use merch_core::metrics::{validate_window_days, DEFAULT_WINDOW_DAYS};

use crate::auth::jwt::JwtConfig;

/// Server settings, read once at startup.
///
/// | Env Var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
/// | `METRICS_WINDOW_DAYS`  | `60`                    |
///
/// JWT settings are documented on [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Days before today covered by the SKU detail sales series.
    pub metrics_window_days: u32,
    pub jwt: JwtConfig,
}

/// Parse `key` if set, else use `default`.
///
/// # Panics
///
/// Panics naming the variable when the value does not parse.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics on unparseable values or a metrics window outside `1..=366`.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let metrics_window_days = env_or("METRICS_WINDOW_DAYS", DEFAULT_WINDOW_DAYS);
        if let Err(msg) = validate_window_days(metrics_window_days) {
            panic!("METRICS_WINDOW_DAYS is invalid: {msg}");
        }

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            metrics_window_days,
            jwt: JwtConfig::from_env(),
        }
    }
}
