//! Shared fixtures

use casedesk::{Case, CaseWorkflow, StoreConfig};
use std::path::PathBuf;
use tempfile::TempDir;

/// A seeded queue in a fresh directory
pub struct Fixture {
    pub dir: TempDir,
    pub workflow: CaseWorkflow,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_cases(&queue())
    }

    pub fn with_cases(cases: &[Case]) -> Self {
        let dir = TempDir::new().unwrap();
        let workflow =
            CaseWorkflow::open(StoreConfig::new(dir.path().join("fraud_cases.json"))).unwrap();
        workflow.store().write_all(cases).unwrap();
        Fixture { dir, workflow }
    }

    pub fn path(&self) -> PathBuf {
        self.workflow.store().path().to_path_buf()
    }
}

/// Three pending cases with transaction details
pub fn queue() -> Vec<Case> {
    vec![
        Case::new("John", "blue")
            .with_question("What is your favorite color?")
            .with_field("cardEnding", "4242")
            .with_field("merchant", "ABC Industry")
            .with_field("amount", "$1,249.00")
            .with_field("transactionTime", "2025-11-20 14:22")
            .with_field("category", "e-commerce")
            .with_field("source", "alibaba.com"),
        Case::new("Priya", "mumbai")
            .with_question("In which city were you born?")
            .with_field("cardEnding", "1881")
            .with_field("merchant", "Skyline Travel")
            .with_field("amount", 842.1),
        Case::new("Marco", "pepper")
            .with_question("What was your first pet's name?")
            .with_field("cardEnding", "0007"),
    ]
}
