//! Record identifiers
//!
//! Documents in the store are keyed by opaque strings. Records created by
//! Saldo get a random UUID; imported documents keep whatever key the source
//! store gave them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a transaction document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the full identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for compact listings
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Error returned when parsing an empty identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record id cannot be empty")]
pub struct EmptyRecordId;

impl FromStr for RecordId {
    type Err = EmptyRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmptyRecordId);
        }
        Ok(Self(s.to_string()))
    }
}
