//! Conditions the store logs instead of returning

use crate::test_utils::Fixture;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

#[test]
fn test_malformed_document_is_logged() {
    let fx = Fixture::new();
    fs::write(fx.path(), "{\"cases\": []}").unwrap();

    let logs = capture(|| {
        assert!(fx.workflow.load("john").is_none());
    });
    assert!(logs.contains("WARN"));
    assert!(logs.contains("casedesk::store"));
    assert!(logs.contains("case document is malformed"));
}

#[test]
fn test_failed_write_is_logged() {
    let fx = Fixture::new();
    fs::create_dir(fx.dir.path().join("fraud_cases.json.tmp")).unwrap();

    let logs = capture(|| {
        assert!(!fx.workflow.update("john", "confirmed_safe", "ok").is_saved());
    });
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("failed to write case document"));
    assert!(logs.contains("case update was not saved"));
}

#[test]
fn test_saved_update_is_logged() {
    let fx = Fixture::new();

    let logs = capture(|| {
        assert!(fx.workflow.update("marco", "confirmed_safe", "ok").is_saved());
    });
    assert!(logs.contains("INFO"));
    assert!(logs.contains("case updated"));
    assert!(logs.contains("identity=marco"));
}
