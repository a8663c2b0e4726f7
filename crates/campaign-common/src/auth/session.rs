//! Token-backed session
//!
//! Holds the verified claims of the signed-in user and answers
//! "who is the current user" for the reaction store.

use campaign_core::{SessionProvider, UserId};
use parking_lot::RwLock;
use tracing::{debug, info};

use super::jwt::{Claims, SessionTokenService};
use crate::error::AppResult;

/// Session built from a backend access token
#[derive(Debug)]
pub struct TokenSession {
    tokens: SessionTokenService,
    claims: RwLock<Option<Claims>>,
}

impl TokenSession {
    /// Create a signed-out session
    #[must_use]
    pub fn new(tokens: SessionTokenService) -> Self {
        Self {
            tokens,
            claims: RwLock::new(None),
        }
    }

    /// Verify `token` and make its subject the current user
    ///
    /// On failure the previous session, if any, is kept.
    pub fn sign_in(&self, token: &str) -> AppResult<UserId> {
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id()?;
        *self.claims.write() = Some(claims);
        info!(user_id = %user_id, "Signed in");
        Ok(user_id)
    }

    pub fn sign_out(&self) {
        if self.claims.write().take().is_some() {
            info!("Signed out");
        }
    }

    /// Email of the signed-in user, when the token carries one
    pub fn email(&self) -> Option<String> {
        self.claims.read().as_ref().and_then(|c| c.email.clone())
    }
}

impl SessionProvider for TokenSession {
    fn current_user(&self) -> Option<UserId> {
        let guard = self.claims.read();
        let claims = guard.as_ref()?;
        if claims.is_expired() {
            debug!("Session token expired");
            return None;
        }
        claims.user_id().ok()
    }
}
