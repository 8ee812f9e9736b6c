use std::env;
use std::time::Duration;

use crate::{DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_PROTOCOL, DEFAULT_USER_AGENT};

/// Client configuration, loadable from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Endpoint
    pub protocol: String,
    pub host: String,
    pub base_path: String,

    // HTTP
    pub timeout_ms: u64,
    pub user_agent: String,

    // Credentials (optional, used for login at startup)
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            // Endpoint
            protocol: env::var("FUNIMATION_PROTOCOL").unwrap_or(defaults.protocol),
            host: env::var("FUNIMATION_HOST").unwrap_or(defaults.host),
            base_path: env::var("FUNIMATION_BASE_PATH").unwrap_or(defaults.base_path),

            // HTTP
            timeout_ms: env::var("FUNIMATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            user_agent: env::var("FUNIMATION_USER_AGENT").unwrap_or(defaults.user_agent),

            // Credentials
            username: env::var("FUNIMATION_USERNAME")
                .ok()
                .filter(|v| !v.is_empty()),
            password: env::var("FUNIMATION_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// `protocol://host/base_path`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}/{}",
            self.protocol,
            self.host.trim_end_matches('/'),
            self.base_path.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: DEFAULT_HOST.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout_ms: 30_000, // 30 seconds
            user_agent: DEFAULT_USER_AGENT.to_string(),
            username: None,
            password: None,
        }
    }
}
