//! Broken, missing and interrupted documents

use crate::test_utils::{queue, Fixture};
use casedesk::{CaseStore, CaseWorkflow, StoreConfig, UpdateOutcome};
use std::fs;

#[test]
fn test_corrupt_document_reads_as_empty_queue() {
    let fx = Fixture::new();
    fs::write(fx.path(), "[{\"userName\": \"John\", ").unwrap();

    assert!(fx.workflow.load("john").is_none());
    assert!(!fx.workflow.verify("john", "blue"));
    assert_eq!(
        fx.workflow.update("john", "confirmed_safe", "ok"),
        UpdateOutcome::NotFound
    );
    // The corrupt bytes are not overwritten by a not-found update
    assert_eq!(
        fs::read_to_string(fx.path()).unwrap(),
        "[{\"userName\": \"John\", "
    );
}

#[test]
fn test_interrupted_write_keeps_committed_document() {
    let fx = Fixture::new();
    let committed = fs::read(fx.path()).unwrap();

    // Occupy the temporary path so the next write aborts before the rename
    let tmp = fx.dir.path().join("fraud_cases.json.tmp");
    fs::create_dir(&tmp).unwrap();

    assert_eq!(
        fx.workflow.update("john", "confirmed_safe", "ok"),
        UpdateOutcome::NotSaved
    );
    assert_eq!(fs::read(fx.path()).unwrap(), committed);
    assert_eq!(fx.workflow.load("john").unwrap().status(), Some("pending"));

    // Once the obstruction is gone, the same update lands
    fs::remove_dir(&tmp).unwrap();
    assert!(fx.workflow.update("john", "confirmed_safe", "ok").is_saved());
    assert_eq!(
        fx.workflow.load("john").unwrap().status(),
        Some("confirmed_safe")
    );
}

#[test]
fn test_store_recreated_after_deletion() {
    let fx = Fixture::new();
    fs::remove_file(fx.path()).unwrap();

    assert!(fx.workflow.load("john").is_none());
    fx.workflow.store().write_all(&queue()).unwrap();
    assert!(fx.workflow.load("john").is_some());
}

#[test]
fn test_config_file_drives_store() {
    let fx = Fixture::new();
    let config_path = fx.dir.path().join("casedesk.toml");
    fs::write(
        &config_path,
        format!(
            "path = {:?}\naccess_mode = \"read_only\"\n",
            fx.path().display().to_string()
        ),
    )
    .unwrap();

    let config = StoreConfig::load(&config_path).unwrap();
    let readonly = CaseWorkflow::new(std::sync::Arc::new(CaseStore::open(config).unwrap()));
    assert!(readonly.verify("priya", "Mumbai"));
    assert_eq!(
        readonly.update("priya", "confirmed_safe", "ok"),
        UpdateOutcome::NotSaved
    );
}
