use std::collections::HashMap;
use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub system_info: SystemInfoConfig,
    /// Credential table: username → password hash
    pub users: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    /// Mark the session cookie `Secure`. Must be on when served over TLS.
    pub secure_cookie: bool,
    /// Interval of the expired-session sweep; 0 disables it
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SystemInfoConfig {
    pub cache_ttl_secs: u64,
    pub connectivity_url: String,
    pub connectivity_timeout_secs: u64,
}

impl SystemInfoConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn connectivity_timeout(&self) -> Duration {
        Duration::from_secs(self.connectivity_timeout_secs)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DASHBOARD__SERVER__HTTP_PORT, DASHBOARD__SESSION__SECURE_COOKIE, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DASHBOARD__SERVER__HTTP_PORT=9000 overrides server.http_port
            .add_source(
                Environment::with_prefix("DASHBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
