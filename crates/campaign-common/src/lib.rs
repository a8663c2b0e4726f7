//! # campaign-common
//!
//! Shared utilities including configuration, error handling, session tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, SessionTokenService, TokenSession};
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, DatabaseConfig, Environment,
    ReactionsConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
