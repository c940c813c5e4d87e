//! Identity normalization
//!
//! Usernames and challenge answers are compared after trimming surrounding
//! whitespace and lowercasing. An identity that is empty after
//! normalization never matches anything.

use std::fmt;

/// Trim surrounding whitespace and lowercase
///
/// # Examples
///
/// ```
/// use casedesk_core::normalize;
///
/// assert_eq!(normalize("  Alice \n"), "alice");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized, non-empty lookup key for a case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Normalize `raw`, returning None when nothing is left
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Identity(normalized))
        }
    }

    /// The normalized key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a stored username against this identity
    pub fn matches(&self, candidate: &str) -> bool {
        normalize(candidate) == self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
