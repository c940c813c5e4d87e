//! Public types for the casedesk API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Case model
// ============================================================================

pub use casedesk_core::Case;
pub use casedesk_core::HistoryEntry;
pub use casedesk_core::Transaction;
pub use casedesk_core::HISTORY_TIMESTAMP_FORMAT;

// Status vocabulary (open set)
pub use casedesk_core::CaseStatus;

// Identity normalization
pub use casedesk_core::{normalize, Identity};

// ============================================================================
// Store configuration
// ============================================================================

pub use casedesk_storage::{AccessMode, DocumentFormat, StoreConfig, DEFAULT_STORE_FILE};

// ============================================================================
// Call flow
// ============================================================================

pub use casedesk_workflow::{CallAction, CallError, CallStage, UpdateOutcome};
pub use casedesk_workflow::{CONFIRMED_FRAUD_NOTE, CONFIRMED_SAFE_NOTE, VERIFICATION_FAILED_NOTE};
