//! Entity identifiers and the local-id recognizer.
//!
//! Every entity in the model is keyed by an [`Id`]: an opaque, non-empty
//! string assigned by the backing store. Entities created on the client
//! before the store has confirmed them carry a *local* identifier instead,
//! recognizable by the `local:` prefix. View projections expose this as the
//! `is_persisted` annotation (`is_persisted == !id.is_local()`), so the
//! rendering layer can grey out rows that are still in flight.
//!
//! Local ids are minted from a client-side sequence and are never sent to
//! the store; once the store acks an entity, the upstream sync layer
//! replaces the local id with the persisted one wholesale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix marking a client-generated identifier pending persistence.
pub const LOCAL_ID_PREFIX: &str = "local:";

// ---------------------------------------------------------------------------
// Id
// ---------------------------------------------------------------------------

/// An opaque entity identifier.
///
/// Ordering and hashing delegate to the underlying string, so ids can key
/// maps and act as deterministic sort tie-breakers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Create an id from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError`] if the input is empty or all whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ParseIdError);
        }
        Ok(Self(value))
    }

    /// Mint a local identifier from a client-side sequence number.
    #[must_use]
    pub fn local(seq: u64) -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{seq}"))
    }

    /// Returns `true` if this id was client-generated and is not yet
    /// confirmed by the backing store.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    /// Returns `true` if this id was assigned by the backing store.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.is_local()
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Error returned when parsing an identifier from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must not be empty")]
pub struct ParseIdError;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
