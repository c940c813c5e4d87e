//! Case records
//!
//! A [`Case`] is one entry of the persisted case document. The fields the
//! workflow reads or writes have typed accessors; every other key on the
//! record (transaction details, seeding metadata, anything a future tool
//! adds) is carried along untouched.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "userName": "alice",
//!   "securityQuestion": "Favourite colour?",
//!   "securityAnswer": "blue",
//!   "status": "pending",
//!   "history": [{ "timestamp": "2025-01-01T10:00:00", "note": "seeded" }],
//!   "merchant": "ACME Electronics",
//!   "amount": "$1,249.00",
//!   "cardEnding": "4242"
//! }
//! ```
//!
//! A record is kept as the ordered JSON object it was read as. Updating a
//! case only replaces `status` and appends to `history`; every other key,
//! including explicit `null`s and history entries written by other tools,
//! is written back exactly as read, in its original position.
//!
//! A typed field holding an unexpected JSON type reads as absent, so a
//! record whose `userName` is not a string never matches an identity.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::{normalize, Identity};
use crate::status::CaseStatus;

/// Format of history timestamps: UTC, second precision, no offset suffix
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const USER_NAME: &str = "userName";
const SECURITY_QUESTION: &str = "securityQuestion";
const SECURITY_ANSWER: &str = "securityAnswer";
const STATUS: &str = "status";
const HISTORY: &str = "history";

/// One entry of a case's audit trail
///
/// Read entries are a view: `timestamp` and `note` are empty when the
/// stored entry lacks them, but the stored entry itself is not rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// When the entry was recorded, see [`HISTORY_TIMESTAMP_FORMAT`]
    pub timestamp: String,
    /// Free-form outcome note
    pub note: String,
    /// Keys written by other tools
    pub extra: Map<String, Value>,
}

impl HistoryEntry {
    /// Entry stamped with the current UTC time
    pub fn now(note: impl Into<String>) -> Self {
        Self::at(Utc::now().naive_utc(), note)
    }

    /// Entry stamped with `when`, truncated to seconds
    pub fn at(when: NaiveDateTime, note: impl Into<String>) -> Self {
        HistoryEntry {
            timestamp: when.format(HISTORY_TIMESTAMP_FORMAT).to_string(),
            note: note.into(),
            extra: Map::new(),
        }
    }

    /// Parse the timestamp back, if it is in the standard format
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, HISTORY_TIMESTAMP_FORMAT).ok()
    }

    /// View of a stored entry; None unless it is a JSON object
    fn from_stored(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let extra = object
            .iter()
            .filter(|(key, _)| *key != "timestamp" && *key != "note")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(HistoryEntry {
            timestamp: text("timestamp"),
            note: text("note"),
            extra,
        })
    }
}

impl From<HistoryEntry> for Value {
    fn from(entry: HistoryEntry) -> Self {
        let mut object = Map::with_capacity(entry.extra.len() + 2);
        object.insert("timestamp".to_string(), Value::String(entry.timestamp));
        object.insert("note".to_string(), Value::String(entry.note));
        object.extend(entry.extra);
        Value::Object(object)
    }
}

/// A fraud verification case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Case {
    fields: Map<String, Value>,
}

impl Case {
    /// New pending case with an empty history
    pub fn new(user_name: impl Into<String>, security_answer: impl Into<String>) -> Self {
        Case::default()
            .with_field(USER_NAME, user_name.into())
            .with_field(SECURITY_ANSWER, security_answer.into())
            .with_field(STATUS, CaseStatus::Pending.as_str())
            .with_field(HISTORY, Vec::<Value>::new())
    }

    /// Set the challenge question
    pub fn with_question(self, question: impl Into<String>) -> Self {
        self.with_field(SECURITY_QUESTION, question.into())
    }

    /// Set a field, e.g. a transaction detail
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Stored username, empty when the record has none
    pub fn user_name(&self) -> &str {
        self.str_field(USER_NAME).unwrap_or_default()
    }

    /// The challenge question, if the record carries one
    pub fn security_question(&self) -> Option<&str> {
        self.str_field(SECURITY_QUESTION)
    }

    /// Stored challenge answer, empty when the record has none
    pub fn security_answer(&self) -> &str {
        self.str_field(SECURITY_ANSWER).unwrap_or_default()
    }

    /// Raw status string
    pub fn status(&self) -> Option<&str> {
        self.str_field(STATUS)
    }

    /// Status as a [`CaseStatus`]
    pub fn case_status(&self) -> Option<CaseStatus> {
        self.status().map(CaseStatus::from)
    }

    /// Audit trail, oldest first
    ///
    /// Stored entries that are not objects are skipped.
    pub fn history(&self) -> Vec<HistoryEntry> {
        match self.fields.get(HISTORY) {
            Some(Value::Array(entries)) => {
                entries.iter().filter_map(HistoryEntry::from_stored).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Any field by JSON key
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The whole record, in document order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Read-only view of the disputed transaction
    pub fn transaction(&self) -> Transaction {
        Transaction {
            merchant: self.text_field("merchant"),
            amount: self.text_field("amount"),
            card_ending: self.text_field("cardEnding"),
            transaction_time: self.text_field("transactionTime"),
            category: self.text_field("category"),
            source: self.text_field("source"),
        }
    }

    /// Whether this record belongs to `identity`
    pub fn matches(&self, identity: &Identity) -> bool {
        self.str_field(USER_NAME)
            .is_some_and(|name| identity.matches(name))
    }

    /// Compare a spoken answer against the stored one
    pub fn answer_matches(&self, answer: &str) -> bool {
        normalize(answer) == normalize(self.security_answer())
    }

    /// Replace the status, verbatim
    ///
    /// An existing `status` key keeps its position in the record.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.fields
            .insert(STATUS.to_string(), Value::String(status.into()));
    }

    /// Append to the audit trail
    ///
    /// Creates the trail if the record had none, or if the stored value is
    /// not an array.
    pub fn push_history(&mut self, entry: HistoryEntry) {
        match self.fields.get_mut(HISTORY) {
            Some(Value::Array(entries)) => entries.push(entry.into()),
            _ => {
                self.fields
                    .insert(HISTORY.to_string(), Value::Array(vec![entry.into()]));
            }
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn text_field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Details of the disputed transaction
///
/// Numbers in the document are rendered as text so the caller can read
/// them out as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    /// Merchant name
    pub merchant: Option<String>,
    /// Amount, as written in the document
    pub amount: Option<String>,
    /// Last digits of the card
    pub card_ending: Option<String>,
    /// When the transaction happened
    pub transaction_time: Option<String>,
    /// Merchant category
    pub category: Option<String>,
    /// Website or app the transaction came from
    pub source: Option<String>,
}
