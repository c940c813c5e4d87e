//! Casedesk: fraud verification case store
//!
//! A durable queue of fraud verification cases and the three operations a
//! call driver (voice agent, test harness, batch job) needs:
//!
//! - [`CaseWorkflow::load`]: find a case by customer name
//! - [`CaseWorkflow::verify`]: check the non-sensitive challenge answer
//! - [`CaseWorkflow::update`]: record the outcome and append to the audit trail
//!
//! Cases live in one JSON document. Reads never fail (a broken document
//! reads as empty), writes are atomic, and concurrent updates are
//! serialized so none is lost.
//!
//! # Example
//!
//! ```no_run
//! use casedesk::{CaseWorkflow, StoreConfig, VerificationCall};
//!
//! # fn main() -> casedesk::Result<()> {
//! let workflow = CaseWorkflow::open(StoreConfig::new("fraud_cases.json"))?;
//!
//! let mut call = VerificationCall::new(workflow);
//! if let Ok(Some(case)) = call.identify("Alice") {
//!     println!("ask: {}", case.security_question().unwrap_or("security question"));
//!     if call.answer("blue") == Ok(true) {
//!         let outcome = call.confirm_legitimate();
//!         println!("{:?}", outcome);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod types;

pub use types::*;

pub use casedesk_core::{Result, StoreError};
pub use casedesk_storage::CaseStore;
pub use casedesk_workflow::{CaseWorkflow, VerificationCall};
