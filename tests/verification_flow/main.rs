//! Verification Flow Test Suite
//!
//! Exercises the public `casedesk` facade the way a call driver would.
//!
//! ## Modules
//!
//! - **call_flow**: full conversations through `VerificationCall`
//! - **store_recovery**: broken, missing and interrupted documents
//! - **logging**: conditions the store reports instead of returning
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test verification_flow
//! ```

mod test_utils;

mod call_flow;
mod logging;
mod store_recovery;
