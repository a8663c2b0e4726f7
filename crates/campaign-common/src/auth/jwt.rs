//! JWT utilities for backend session tokens
//!
//! The hosted backend signs access tokens with a shared secret; the subject is
//! the user's UUID. Verification uses the `jsonwebtoken` crate.

use campaign_core::UserId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    /// Audience, `authenticated` for signed-in users
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a UUID
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: String,
    token_ttl: i64,
}

impl SessionTokenService {
    /// Create a new service with the given secret, audience and token lifetime (seconds)
    #[must_use]
    pub fn new(secret: &str, audience: impl Into<String>, token_ttl: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience: audience.into(),
            token_ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.audience.clone(), config.token_ttl)
    }

    /// Issue a token for a user (local development and tests)
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: UserId, email: Option<String>) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_ttl)).timestamp(),
            email,
            role: Some(self.audience.clone()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or for another audience
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.set_audience(&[self.audience.as_str()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        // Reject early: a token whose subject is not a user id is useless
        token_data.claims.user_id()?;
        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("audience", &self.audience)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
