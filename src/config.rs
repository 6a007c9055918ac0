use std::env;

use crate::ai::config::AiConfig;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Process-wide settings assembled once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Browser origin allowed to call the API; `*` allows any origin.
    pub cors_allowed_origin: String,
    pub ai: AiConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL.to_string());
        let address = lookup("ADDRESS").unwrap_or(DEFAULT_ADDRESS.to_string());
        let port = lookup("PORT")
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .unwrap_or(DEFAULT_CORS_ALLOWED_ORIGIN.to_string());
        let ai = AiConfig::from_lookup(&lookup);

        Self {
            database_url,
            address,
            port,
            cors_allowed_origin,
            ai,
        }
    }
}
