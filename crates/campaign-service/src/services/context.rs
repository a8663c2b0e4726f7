//! Service context - dependency container for the reaction store
//!
//! Holds the backend ports and the store tuning the store needs.

use std::sync::Arc;
use std::time::Duration;

use campaign_common::{AppConfig, AppError, AppResult, ReactionsConfig, SessionTokenService, TokenSession};
use campaign_core::traits::{ReactionRepository, SessionProvider};
use campaign_db::{apply_schema, create_pool, DatabaseConfig, PgReactionRepository};

/// Reaction store tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Debounce before the reconciling refresh after a confirmed write
    pub refresh_delay: Duration,
    /// Upper bound on each backend call
    pub request_timeout: Duration,
    /// Recount from raw rows when the grouped queries fail
    pub fallback_scan: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::from(&ReactionsConfig::default())
    }
}

impl From<&ReactionsConfig> for StoreSettings {
    fn from(config: &ReactionsConfig) -> Self {
        Self {
            refresh_delay: config.refresh_delay(),
            request_timeout: config.request_timeout(),
            fallback_scan: config.fallback_scan,
        }
    }
}

/// Service context containing all dependencies
///
/// Cloning is cheap; the ports are shared behind `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    reaction_repo: Arc<dyn ReactionRepository>,
    session: Arc<dyn SessionProvider>,
    settings: StoreSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        session: Arc<dyn SessionProvider>,
        settings: StoreSettings,
    ) -> Self {
        Self {
            reaction_repo,
            session,
            settings,
        }
    }

    /// Wire the PostgreSQL repository and a token session from configuration
    ///
    /// Returns the session handle too, so the caller can sign users in and out.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the pool cannot connect or the schema
    /// cannot be applied
    pub async fn connect(config: &AppConfig) -> AppResult<(Self, Arc<TokenSession>)> {
        let pool = create_pool(&DatabaseConfig::from(&config.database))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        apply_schema(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let session = Arc::new(TokenSession::new(SessionTokenService::from_config(&config.auth)));
        let ctx = Self::new(
            Arc::new(PgReactionRepository::new(pool)),
            session.clone(),
            StoreSettings::from(&config.reactions),
        );
        Ok((ctx, session))
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the session provider
    pub fn session(&self) -> &dyn SessionProvider {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("reaction_repo", &"dyn ReactionRepository")
            .field("session", &"dyn SessionProvider")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    session: Option<Arc<dyn SessionProvider>>,
    settings: StoreSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn refresh_delay(mut self, delay: Duration) -> Self {
        self.settings.refresh_delay = delay;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.settings.request_timeout = timeout;
        self
    }

    pub fn fallback_scan(mut self, enabled: bool) -> Self {
        self.settings.fallback_scan = enabled;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `AppError::Validation` if any required dependency is missing
    pub fn build(self) -> AppResult<ServiceContext> {
        if self.settings.request_timeout.is_zero() {
            return Err(AppError::validation("request_timeout must be greater than zero"));
        }
        Ok(ServiceContext::new(
            self.reaction_repo
                .ok_or_else(|| AppError::validation("reaction_repo is required"))?,
            self.session
                .ok_or_else(|| AppError::validation("session is required"))?,
            self.settings,
        ))
    }
}
