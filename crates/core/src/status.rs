//! Case status vocabulary
//!
//! Status is an open set: the four well-known values below are what the
//! verification flow writes, but any caller-supplied string is stored
//! verbatim and reads back as [`CaseStatus::Other`].

use std::fmt;

/// Typed view of a case's `status` field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    /// Awaiting a call
    Pending,
    /// Customer could not answer the challenge question
    VerificationFailed,
    /// Customer confirmed the transaction is theirs
    ConfirmedSafe,
    /// Customer disowned the transaction
    ConfirmedFraud,
    /// Any other caller-defined status, stored as given
    Other(String),
}

impl CaseStatus {
    /// The exact string persisted for this status
    pub fn as_str(&self) -> &str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::VerificationFailed => "verification_failed",
            CaseStatus::ConfirmedSafe => "confirmed_safe",
            CaseStatus::ConfirmedFraud => "confirmed_fraud",
            CaseStatus::Other(s) => s,
        }
    }

    /// Whether a call that wrote this status is finished with the case
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            CaseStatus::VerificationFailed | CaseStatus::ConfirmedSafe | CaseStatus::ConfirmedFraud
        )
    }
}

impl From<&str> for CaseStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => CaseStatus::Pending,
            "verification_failed" => CaseStatus::VerificationFailed,
            "confirmed_safe" => CaseStatus::ConfirmedSafe,
            "confirmed_fraud" => CaseStatus::ConfirmedFraud,
            other => CaseStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for CaseStatus {
    fn from(s: String) -> Self {
        CaseStatus::from(s.as_str())
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
