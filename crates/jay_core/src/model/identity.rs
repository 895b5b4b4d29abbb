//! Entity identity.
//!
//! # Responsibility
//! - Generate globally unique ids for containers and items.
//! - Recognize the canonical textual id form typed by users.
//! - Split a user token into an id lookup or a name lookup exactly once.
//!
//! # Invariants
//! - Only the 36-char hyphenated UUID v4 shape parses. Braced, simple and
//!   URN forms are treated as names.
//! - `Display` and `to_bytes` are inverse to `parse` and `from_bytes`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

static CANONICAL_V4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid uuid v4 regex")
});

/// Rejected identifier text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a canonical entity id")]
pub struct IdentityError(pub String);

/// Stable identifier shared by containers and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generates a fresh random (v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the canonical hyphenated v4 form, case-insensitively.
    pub fn parse(text: &str) -> Result<Self, IdentityError> {
        if !is_canonical(text) {
            return Err(IdentityError(text.to_string()));
        }
        Uuid::parse_str(text)
            .map(Self)
            .map_err(|_| IdentityError(text.to_string()))
    }

    /// Rebuilds an id from its 16-byte big-endian form.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    pub fn to_bytes(self) -> [u8; 16] {
        self.0.into_bytes()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for EntityId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns whether `text` has the canonical id shape.
pub fn is_canonical(text: &str) -> bool {
    CANONICAL_V4_RE.is_match(text)
}

/// A user-supplied token classified as an id lookup or a name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ById(EntityId),
    ByName(String),
}

impl Lookup {
    /// Classifies `token`. Anything that is not id-shaped is a name.
    ///
    /// Surrounding whitespace is dropped, matching how names are stored.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match EntityId::parse(token) {
            Ok(id) => Self::ById(id),
            Err(_) => Self::ByName(token.to_string()),
        }
    }
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ById(id) => write!(f, "with id {id}"),
            Self::ByName(name) => write!(f, "named \"{name}\""),
        }
    }
}
