//! Reaction kinds - the fixed set of sentiment markers a user can put on a campaign

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the six supported reactions
///
/// The lowercase name is the value stored in the `reaction_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Fire,
    Clap,
    Thinking,
    Wow,
}

impl ReactionKind {
    /// All kinds, in display order
    pub const ALL: [ReactionKind; 6] = [
        Self::Like,
        Self::Love,
        Self::Fire,
        Self::Clap,
        Self::Thinking,
        Self::Wow,
    ];

    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Fire => "fire",
            Self::Clap => "clap",
            Self::Thinking => "thinking",
            Self::Wow => "wow",
        }
    }

    /// Emoji shown on the reaction button
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Like => "👍",
            Self::Love => "❤️",
            Self::Fire => "🔥",
            Self::Clap => "👏",
            Self::Thinking => "🤔",
            Self::Wow => "😮",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidReactionKind(s.to_string()))
    }
}
