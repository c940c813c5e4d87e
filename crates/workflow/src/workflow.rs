//! Case workflow operations
//!
//! Stateless facade over CaseStore.
//!
//! # Design
//!
//! CaseWorkflow holds only an `Arc<CaseStore>`. Every operation reads the
//! document fresh, so a case renamed or removed between `load` and a later
//! `verify`/`update` is seen as not found, never as a stale copy.
//! Clone is cheap (just Arc clone).
//!
//! No operation returns an error. Store failures degrade to "not found"
//! (reads) or [`UpdateOutcome::NotSaved`] (writes) so a live call can always
//! produce its next utterance.
//!
//! # Example
//!
//! ```ignore
//! let workflow = CaseWorkflow::open(StoreConfig::new("fraud_cases.json"))?;
//!
//! if let Some(case) = workflow.load("Alice ") {
//!     if workflow.verify("alice", "Blue") {
//!         workflow.update("alice", "confirmed_safe", "Customer confirmed legitimate transaction.");
//!     }
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use casedesk_core::{Case, HistoryEntry, Identity};
use casedesk_storage::{CaseStore, StoreConfig};
use tracing::{debug, info, warn};

/// Result of [`CaseWorkflow::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Case updated and the document written at this location
    Saved(PathBuf),
    /// No case matches the identity; nothing was written
    NotFound,
    /// A case matched but the document could not be written
    NotSaved,
}

impl UpdateOutcome {
    /// Whether the update reached the store
    pub fn is_saved(&self) -> bool {
        matches!(self, UpdateOutcome::Saved(_))
    }

    /// Document location, for saved outcomes
    pub fn location(&self) -> Option<&Path> {
        match self {
            UpdateOutcome::Saved(path) => Some(path),
            _ => None,
        }
    }
}

/// Tool-result tag: `saved:<path>`, `error:not_found` or `error:not_saved`
impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Saved(path) => write!(f, "saved:{}", path.display()),
            UpdateOutcome::NotFound => f.write_str("error:not_found"),
            UpdateOutcome::NotSaved => f.write_str("error:not_saved"),
        }
    }
}

/// Verification workflow
///
/// # Thread Safety
///
/// CaseWorkflow is Clone and Send + Sync. Concurrent `update` calls are
/// serialized by the store, so none of them is lost.
#[derive(Debug, Clone)]
pub struct CaseWorkflow {
    store: Arc<CaseStore>,
}

impl CaseWorkflow {
    /// Create a workflow over a shared store
    pub fn new(store: Arc<CaseStore>) -> Self {
        Self { store }
    }

    /// Open a store and wrap it
    pub fn open(config: StoreConfig) -> casedesk_core::Result<Self> {
        Ok(Self::new(Arc::new(CaseStore::open(config)?)))
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<CaseStore> {
        &self.store
    }

    /// Find the case for `user_name`
    ///
    /// The name is trimmed and lowercased; a blank name returns None
    /// without reading the store. The first case in document order whose
    /// normalized `userName` matches wins.
    pub fn load(&self, user_name: &str) -> Option<Case> {
        let identity = Identity::parse(user_name)?;
        let found = self
            .store
            .read_all()
            .into_iter()
            .find(|case| case.matches(&identity));
        if found.is_none() {
            debug!(target: "casedesk::workflow", identity = %identity, "no case for identity");
        }
        found
    }

    /// Check the challenge answer for `user_name`
    ///
    /// False for unknown identities. Never mutates the case; recording a
    /// failed verification is the caller's decision.
    pub fn verify(&self, user_name: &str, answer: &str) -> bool {
        match self.load(user_name) {
            Some(case) => case.answer_matches(answer),
            None => false,
        }
    }

    /// Set the case status and append a history entry
    ///
    /// `status` is stored exactly as given. The read-modify-write runs in
    /// the store's critical section. Repeated calls append repeated
    /// entries.
    pub fn update(&self, user_name: &str, status: &str, note: &str) -> UpdateOutcome {
        let Some(identity) = Identity::parse(user_name) else {
            return UpdateOutcome::NotFound;
        };

        let result = self.store.update_with(|cases| {
            let case = cases.iter_mut().find(|case| case.matches(&identity))?;
            case.set_status(status);
            case.push_history(HistoryEntry::now(note));
            Some(())
        });

        match result {
            Ok(Some(())) => {
                info!(
                    target: "casedesk::workflow",
                    identity = %identity,
                    status,
                    "case updated"
                );
                UpdateOutcome::Saved(self.store.path().to_path_buf())
            }
            Ok(None) => {
                debug!(target: "casedesk::workflow", identity = %identity, "no case to update");
                UpdateOutcome::NotFound
            }
            Err(e) => {
                warn!(
                    target: "casedesk::workflow",
                    identity = %identity,
                    error = %e,
                    "case update was not saved"
                );
                UpdateOutcome::NotSaved
            }
        }
    }
}
