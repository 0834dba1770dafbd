//! Domain identifier types with validation
//!
//! History entries are keyed by a locally generated identifier. Older records
//! written by earlier releases used millisecond timestamps as ids, so any
//! non-empty string is accepted when reading; new ids are UUID v4 text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// History entry identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use glossa::domain::ids::EntryId;
/// use std::str::FromStr;
///
/// let id = EntryId::from_str("1718000000000").unwrap();
/// assert_eq!(id.as_str(), "1718000000000");
///
/// let fresh = EntryId::generate();
/// assert_ne!(fresh, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(String);

impl EntryId {
    /// Creates a new EntryId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(EntryId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Entry ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the entry ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntryId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entry_id_valid() {
        let id = EntryId::new("abc-123").unwrap();
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn test_entry_id_blank_rejected() {
        assert!(EntryId::new("").is_err());
        assert!(EntryId::new("   ").is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<EntryId> = (0..1000).map(|_| EntryId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_entry_id_serde_is_plain_string() {
        let id = EntryId::new("1718000000000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1718000000000\"");

        let back: EntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<EntryId>("\"\"").is_err());
    }
}
