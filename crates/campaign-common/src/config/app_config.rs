//! Application configuration structs
//!
//! Loads configuration from environment variables, or from an optional file
//! layered under prefixed environment variables.

use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub reactions: ReactionsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret the backend signs access tokens with
    pub jwt_secret: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Lifetime of tokens issued locally, in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl: i64,
}

/// Reaction store tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionsConfig {
    /// Debounce before the reconciling refresh that follows a successful write
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    /// Upper bound on any single backend call
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Recount from raw rows when the grouped queries fail
    #[serde(default = "default_fallback_scan")]
    pub fallback_scan: bool,
}

impl ReactionsConfig {
    #[must_use]
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ReactionsConfig {
    fn default() -> Self {
        Self {
            refresh_delay_ms: default_refresh_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            fallback_scan: default_fallback_scan(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "campaign-reactions".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_token_ttl() -> i64 {
    3600 // 1 hour
}

fn default_refresh_delay_ms() -> u64 {
    500
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_fallback_scan() -> bool {
    true
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections()),
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections()),
            },
            auth: AuthConfig {
                jwt_secret: env::var("AUTH_JWT_SECRET")
                    .map_err(|_| ConfigError::MissingVar("AUTH_JWT_SECRET"))?,
                audience: env::var("AUTH_AUDIENCE").unwrap_or_else(|_| default_audience()),
                token_ttl: parsed_or("AUTH_TOKEN_TTL", default_token_ttl()),
            },
            reactions: ReactionsConfig {
                refresh_delay_ms: parsed_or("REACTIONS_REFRESH_DELAY_MS", default_refresh_delay_ms()),
                request_timeout_ms: parsed_or(
                    "REACTIONS_REQUEST_TIMEOUT_MS",
                    default_request_timeout_ms(),
                ),
                fallback_scan: parsed_or("REACTIONS_FALLBACK_SCAN", default_fallback_scan()),
            },
        }
        .validated()
    }

    /// Load configuration from an optional file, overridden by `CAMPAIGN__*`
    /// environment variables (e.g. `CAMPAIGN__DATABASE__URL`)
    ///
    /// # Errors
    /// Returns an error if the sources cannot be read or required keys are missing
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder
            .add_source(
                config::Environment::with_prefix("CAMPAIGN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.reactions.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "REACTIONS_REQUEST_TIMEOUT_MS",
                "must be greater than zero".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MIN_CONNECTIONS",
                format!(
                    "{} exceeds max connections {}",
                    self.database.min_connections, self.database.max_connections
                ),
            ));
        }
        Ok(self)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to load configuration: {0}")]
    Load(String),
}
