//! Verification workflow for casedesk
//!
//! This crate implements the three operations a call driver uses:
//! - load: find a case by identity
//! - verify: check the challenge answer
//! - update: record the outcome (status + history entry)
//!
//! plus [`VerificationCall`], a per-conversation driver that enforces the
//! order load → verify → update.
//!
//! All operations are stateless facades over [`CaseStore`](casedesk_storage::CaseStore).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call;
pub mod workflow;

pub use call::{
    CallAction, CallError, CallStage, VerificationCall, CONFIRMED_FRAUD_NOTE,
    CONFIRMED_SAFE_NOTE, VERIFICATION_FAILED_NOTE,
};
pub use workflow::{CaseWorkflow, UpdateOutcome};
