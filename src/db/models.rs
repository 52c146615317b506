// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::tone::rules::BlockedPhraseRule;
use crate::tone::scorer::Issue;

/// A blocked-phrase rule as stored, with its row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRule {
    pub id: i64,
    pub rule: BlockedPhraseRule,
    pub created_at: String,
}

/// One recorded run of the tone scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneCheck {
    pub id: i64,
    pub account: String,
    /// The first part of the checked text, for recognising it later
    pub text_preview: String,
    /// Platform the post was written for, when given
    pub platform: Option<String>,
    pub score: u32,
    /// The issues found (JSON-encoded in the DB)
    pub issues: Vec<Issue>,
    pub checked_at: String,
}

/// Aggregate tone numbers for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account: String,
    pub checks: u32,
    pub average_score: f64,
}
