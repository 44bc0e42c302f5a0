use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Loads `.env` (if any) before reading the environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("DASHBOARD_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("DASHBOARD_API_URL not set, using empty value");
                    String::new()
                }),
            api_token: env::var("DASHBOARD_API_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
            request_timeout_secs: match env::var("DASHBOARD_API_TIMEOUT_SECS") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("DASHBOARD_API_TIMEOUT_SECS is not a number ({}), using default", raw);
                    DEFAULT_TIMEOUT_SECS
                }),
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        };

        if !config.is_configured() {
            warn!("Dashboard API not configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            api_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
