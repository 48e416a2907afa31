use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://services.leadconnectorhq.com";
pub const DEFAULT_API_VERSION: &str = "2021-07-28";

/// Environment variables and the config keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("GHL_API_KEY", "ghl.api_key"),
    ("GHL_LOCATION_ID", "ghl.location_id"),
    ("GHL_CALENDAR_ID", "ghl.calendar_id"),
    ("GHL_API_BASE", "ghl.api_base"),
    ("GHL_API_VERSION", "ghl.api_version"),
    ("HTTP_ADDRESS", "http.address"),
    ("PORT", "http.port"),
    ("LOG_DIR", "log_dir"),
];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    pub address: String,
    pub port: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GhlConfig {
    pub api_key: String,
    pub location_id: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
    pub api_base: String,
    pub api_version: String,
}

impl GhlConfig {
    /// Calendar used by appointment operations when the caller names none.
    pub fn default_calendar(&self) -> Option<&str> {
        self.calendar_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub ghl: GhlConfig,
    pub log_dir: String,
}

impl AppConfig {
    /// Loads the configuration from an optional file given as the first
    /// CLI argument, overridden by the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = env::args().nth(1);
        Self::load(config_path.as_deref(), |name| env::var(name).ok())
    }

    pub fn load<F>(config_path: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .set_default("http.address", "0.0.0.0")?
            .set_default("http.port", "8000")?
            .set_default("ghl.api_base", DEFAULT_API_BASE)?
            .set_default("ghl.api_version", DEFAULT_API_VERSION)?
            .set_default("log_dir", "app/logs")?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        for &(var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.ghl.api_key.trim().is_empty() || self.ghl.location_id.trim().is_empty() {
            return Err(ConfigError::Message(
                "GHL_API_KEY and GHL_LOCATION_ID must be set with your credentials".to_string(),
            ));
        }
        self.ghl.api_base = self.ghl.api_base.trim_end_matches('/').to_string();
        Ok(())
    }
}
