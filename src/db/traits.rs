// Database trait — async interface for all DB operations.
//
// Implementor: SqliteDatabase (wraps rusqlite). The methods are async so the
// CLI can hold an `Arc<dyn Database>` and a natively async backend could slot
// in later without touching callers.
//
// The trait mirrors the queries.rs function signatures.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{AccountSummary, StoredRule, ToneCheck};
use crate::tone::rules::BlockedPhraseRule;
use crate::tone::scorer::ScoreResult;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Blocked-phrase rules ---

    /// Store a new rule and return its id.
    async fn insert_rule(&self, rule: &BlockedPhraseRule) -> Result<i64>;

    /// Store a batch of rules atomically. Returns how many were added.
    async fn import_rules(&self, rules: &[BlockedPhraseRule]) -> Result<usize>;

    /// All rules in evaluation order.
    async fn list_rules(&self) -> Result<Vec<StoredRule>>;

    /// Rules that apply to one account, in evaluation order.
    async fn rules_for_account(&self, account: &str) -> Result<Vec<BlockedPhraseRule>>;

    /// Delete a rule by id. Returns false if it didn't exist.
    async fn delete_rule(&self, id: i64) -> Result<bool>;

    async fn rule_count(&self) -> Result<i64>;

    // --- Tone checks ---

    /// Record a scoring run and return its id.
    async fn record_check(
        &self,
        account: &str,
        text: &str,
        platform: Option<&str>,
        result: &ScoreResult,
    ) -> Result<i64>;

    /// Most recent checks first.
    async fn recent_checks(&self, limit: u32) -> Result<Vec<ToneCheck>>;

    async fn check_count(&self) -> Result<i64>;

    /// Per-account check counts and average scores.
    async fn account_summaries(&self) -> Result<Vec<AccountSummary>>;

    // --- App state ---

    /// Get a state value by key (e.g., "last_import_at").
    async fn get_state(&self, key: &str) -> Result<Option<String>>;

    /// Set a state value (upsert).
    async fn set_state(&self, key: &str, value: &str) -> Result<()>;
}
