//! Server Configuration
//!
//! Everything comes from environment variables with logged fallbacks, so
//! a bare `cargo run` serves a working dev instance.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    pub media_root: PathBuf,
    /// Debug mode echoes OTP codes in registration responses
    pub debug: bool,
    /// Origin allowed by CORS and used in password-reset links
    pub frontend_origin: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("STUDYHALL_PORT", "8000"),
            database_path: PathBuf::from(try_load::<String>("STUDYHALL_DB", "studyhall.db")),
            media_root: PathBuf::from(try_load::<String>("STUDYHALL_MEDIA_ROOT", "media")),
            debug: try_load("STUDYHALL_DEBUG", "true"),
            frontend_origin: try_load("STUDYHALL_FRONTEND_URL", "http://localhost:5173"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
