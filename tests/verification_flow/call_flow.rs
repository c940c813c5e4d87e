//! Full conversations through the call driver

use crate::test_utils::{queue, Fixture};
use casedesk::{
    CallAction, CallError, CallStage, CaseStatus, UpdateOutcome, VerificationCall,
    CONFIRMED_FRAUD_NOTE, CONFIRMED_SAFE_NOTE,
};

#[test]
fn test_legitimate_transaction_call() {
    let fx = Fixture::new();
    let mut call = VerificationCall::new(fx.workflow.clone());

    let case = call.identify("john").unwrap().unwrap();
    assert_eq!(case.security_question(), Some("What is your favorite color?"));

    let tx = case.transaction();
    assert_eq!(tx.merchant.as_deref(), Some("ABC Industry"));
    assert_eq!(tx.card_ending.as_deref(), Some("4242"));

    assert_eq!(call.answer(" Blue"), Ok(true));
    let outcome = call.confirm_legitimate().unwrap();
    assert_eq!(outcome.to_string(), format!("saved:{}", fx.path().display()));

    let case = fx.workflow.load("JOHN").unwrap();
    assert_eq!(case.case_status(), Some(CaseStatus::ConfirmedSafe));
    assert_eq!(case.history().len(), 1);
    assert_eq!(case.history()[0].note, CONFIRMED_SAFE_NOTE);
    // Transaction details are untouched
    assert_eq!(case.transaction(), queue()[0].transaction());
}

#[test]
fn test_fraud_call_leaves_other_cases_alone() {
    let fx = Fixture::new();
    let mut call = VerificationCall::new(fx.workflow.clone());

    call.identify("Priya").unwrap();
    call.answer("MUMBAI").unwrap();
    assert!(call.report_fraud().unwrap().is_saved());

    let cases = fx.workflow.store().read_all();
    let expected = queue();
    assert_eq!(cases.len(), 3);
    assert_eq!(cases[0], expected[0]);
    assert_eq!(cases[2], expected[2]);
    assert_eq!(cases[1].status(), Some("confirmed_fraud"));
    assert_eq!(cases[1].history()[0].note, CONFIRMED_FRAUD_NOTE);
    assert_eq!(cases[1].field("amount"), expected[1].field("amount"));
}

#[test]
fn test_wrong_answer_call() {
    let fx = Fixture::new();
    let mut call = VerificationCall::new(fx.workflow.clone());

    call.identify("marco").unwrap();
    assert_eq!(call.answer("rex"), Ok(false));
    assert_eq!(
        call.report_fraud(),
        Err(CallError::InvalidTransition {
            stage: CallStage::Failed,
            action: CallAction::ReportFraud,
        })
    );
    assert!(call.record_failed_verification().unwrap().is_saved());

    let case = fx.workflow.load("marco").unwrap();
    assert_eq!(case.case_status(), Some(CaseStatus::VerificationFailed));
    assert!(case.case_status().unwrap().is_closed());
}

#[test]
fn test_unknown_caller() {
    let fx = Fixture::new();
    let mut call = VerificationCall::new(fx.workflow.clone());

    assert_eq!(call.identify("bob"), Ok(None));
    assert_eq!(call.stage(), CallStage::NoCase);
    assert_eq!(fx.workflow.update("bob", "x", "y"), UpdateOutcome::NotFound);
    assert_eq!(fx.workflow.store().read_all(), queue());
}

#[test]
fn test_repeat_calls_accumulate_history() {
    let fx = Fixture::new();

    for _ in 0..3 {
        let mut call = VerificationCall::new(fx.workflow.clone());
        call.identify("john").unwrap();
        call.answer("blue").unwrap();
        call.report_fraud().unwrap();
    }

    let case = fx.workflow.load("john").unwrap();
    assert_eq!(case.status(), Some("confirmed_fraud"));
    assert_eq!(case.history().len(), 3);
}
