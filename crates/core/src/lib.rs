//! Core types for casedesk
//!
//! This crate defines the types shared by the store and the workflow:
//! - Case: one fraud verification case, unknown fields preserved
//! - HistoryEntry: one line of a case's append-only audit trail
//! - CaseStatus: the open status vocabulary
//! - Identity: a normalized lookup key
//! - StoreError: errors raised by the storage layer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod error;
pub mod identity;
pub mod status;

pub use case::{Case, HistoryEntry, Transaction, HISTORY_TIMESTAMP_FORMAT};
pub use error::{Result, StoreError};
pub use identity::{normalize, Identity};
pub use status::CaseStatus;
