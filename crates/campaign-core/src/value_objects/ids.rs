//! Opaque identifiers for campaigns and users
//!
//! Both are UUIDs assigned by the backend. They serialize as plain UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a campaign record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(Uuid);

/// Identifier of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

/// Error when parsing an identifier from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0}")]
pub struct IdParseError(pub String);

impl CampaignId {
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random identifier (tests and seeding)
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl UserId {
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random identifier (tests and seeding)
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CampaignId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError(s.to_string()))
    }
}

impl FromStr for UserId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError(s.to_string()))
    }
}

impl From<Uuid> for CampaignId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
