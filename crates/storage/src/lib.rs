//! Storage layer for casedesk
//!
//! This crate owns the durable case document:
//! - CaseStore: fail-open reads, atomic replace-all writes, serialized read-modify-write
//! - StoreConfig: path, access mode, output format and sync options (TOML-loadable)
//!
//! There is one logical document per path. Everything above this crate is
//! stateless and goes through [`CaseStore`] for every call.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod lock;
pub mod store;

pub use config::{AccessMode, DocumentFormat, StoreConfig, DEFAULT_STORE_FILE};
pub use store::CaseStore;
