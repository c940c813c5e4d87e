//! Per-call state machine
//!
//! ```text
//!  [Unverified] --identify(found)--> [Loaded] --answer(ok)--> [Verified] --confirm/report--> [Closed]
//!       |                              |--answer(wrong)--> [Failed] --record_failed--> [Closed]
//!       --identify(not found)--> [NoCase]
//! ```
//!
//! A VerificationCall belongs to one conversation and is owned by the
//! caller; the workflow itself stays stateless. Each step still goes
//! through [`CaseWorkflow`], which re-reads the store, so the call never
//! acts on a stale case.

use std::fmt;

use casedesk_core::{Case, CaseStatus};
use thiserror::Error;

use crate::workflow::{CaseWorkflow, UpdateOutcome};

/// Note recorded when the customer owns the transaction
pub const CONFIRMED_SAFE_NOTE: &str = "Customer confirmed legitimate transaction.";

/// Note recorded when the customer disowns the transaction
pub const CONFIRMED_FRAUD_NOTE: &str =
    "Customer reports fraudulent transaction; card blocked & dispute opened.";

/// Note recorded when the challenge answer was wrong
pub const VERIFICATION_FAILED_NOTE: &str = "Customer failed identity verification.";

/// Where a call is in the verification flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStage {
    /// Nobody identified yet
    Unverified,
    /// Case found, waiting for the challenge answer
    Loaded,
    /// Answer matched; transaction may be reviewed
    Verified,
    /// Answer did not match
    Failed,
    /// No case for this caller (terminal)
    NoCase,
    /// Outcome recorded (terminal)
    Closed,
}

impl CallStage {
    /// Whether no further action is accepted
    pub fn is_terminal(self) -> bool {
        matches!(self, CallStage::NoCase | CallStage::Closed)
    }
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallStage::Unverified => "unverified",
            CallStage::Loaded => "loaded",
            CallStage::Verified => "verified",
            CallStage::Failed => "failed",
            CallStage::NoCase => "no_case",
            CallStage::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Steps a driver can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallAction {
    /// Look up the caller's case
    Identify,
    /// Check the challenge answer
    Answer,
    /// Record `confirmed_safe`
    ConfirmLegitimate,
    /// Record `confirmed_fraud`
    ReportFraud,
    /// Record `verification_failed`
    RecordFailedVerification,
}

impl fmt::Display for CallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallAction::Identify => "identify",
            CallAction::Answer => "answer",
            CallAction::ConfirmLegitimate => "confirm_legitimate",
            CallAction::ReportFraud => "report_fraud",
            CallAction::RecordFailedVerification => "record_failed_verification",
        };
        f.write_str(s)
    }
}

/// Errors from driving a call out of order
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// `action` is not allowed in `stage`; nothing was read or written
    #[error("cannot {action} while call is {stage}")]
    InvalidTransition {
        /// Stage the call was in
        stage: CallStage,
        /// Rejected action
        action: CallAction,
    },
}

/// One conversation's walk through the verification flow
#[derive(Debug, Clone)]
pub struct VerificationCall {
    workflow: CaseWorkflow,
    stage: CallStage,
    user_name: Option<String>,
}

impl VerificationCall {
    /// Start a call in [`CallStage::Unverified`]
    pub fn new(workflow: CaseWorkflow) -> Self {
        Self {
            workflow,
            stage: CallStage::Unverified,
            user_name: None,
        }
    }

    /// Current stage
    pub fn stage(&self) -> CallStage {
        self.stage
    }

    /// Name the caller gave, once a case was found for it
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Look up the caller's case
    ///
    /// Moves to Loaded when found, NoCase otherwise.
    pub fn identify(&mut self, user_name: &str) -> Result<Option<Case>, CallError> {
        self.require(CallAction::Identify, CallStage::Unverified)?;

        let case = self.workflow.load(user_name);
        if case.is_some() {
            self.user_name = Some(user_name.to_string());
            self.stage = CallStage::Loaded;
        } else {
            self.stage = CallStage::NoCase;
        }
        Ok(case)
    }

    /// Check the challenge answer
    ///
    /// Moves to Verified or Failed. A case that disappeared since
    /// `identify` fails verification.
    pub fn answer(&mut self, answer: &str) -> Result<bool, CallError> {
        self.require(CallAction::Answer, CallStage::Loaded)?;

        let verified = self.workflow.verify(self.name(), answer);
        self.stage = if verified {
            CallStage::Verified
        } else {
            CallStage::Failed
        };
        Ok(verified)
    }

    /// Customer made the transaction: record `confirmed_safe`
    pub fn confirm_legitimate(&mut self) -> Result<UpdateOutcome, CallError> {
        self.close(
            CallAction::ConfirmLegitimate,
            CallStage::Verified,
            CaseStatus::ConfirmedSafe,
            CONFIRMED_SAFE_NOTE,
        )
    }

    /// Customer did not make the transaction: record `confirmed_fraud`
    pub fn report_fraud(&mut self) -> Result<UpdateOutcome, CallError> {
        self.close(
            CallAction::ReportFraud,
            CallStage::Verified,
            CaseStatus::ConfirmedFraud,
            CONFIRMED_FRAUD_NOTE,
        )
    }

    /// Record `verification_failed` after a wrong answer
    pub fn record_failed_verification(&mut self) -> Result<UpdateOutcome, CallError> {
        self.close(
            CallAction::RecordFailedVerification,
            CallStage::Failed,
            CaseStatus::VerificationFailed,
            VERIFICATION_FAILED_NOTE,
        )
    }

    /// Saved -> Closed, NotFound -> NoCase, NotSaved keeps the stage for a retry
    fn close(
        &mut self,
        action: CallAction,
        required: CallStage,
        status: CaseStatus,
        note: &str,
    ) -> Result<UpdateOutcome, CallError> {
        self.require(action, required)?;

        let outcome = self.workflow.update(self.name(), status.as_str(), note);
        match outcome {
            UpdateOutcome::Saved(_) => self.stage = CallStage::Closed,
            UpdateOutcome::NotFound => self.stage = CallStage::NoCase,
            UpdateOutcome::NotSaved => {}
        }
        Ok(outcome)
    }

    fn require(&self, action: CallAction, required: CallStage) -> Result<(), CallError> {
        if self.stage == required {
            Ok(())
        } else {
            Err(CallError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    fn name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("")
    }
}
