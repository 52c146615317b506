// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{AccountSummary, StoredRule, ToneCheck};
use super::traits::Database;
use crate::tone::rules::BlockedPhraseRule;
use crate::tone::scorer::ScoreResult;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_rule(&self, rule: &BlockedPhraseRule) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_rule(&conn, rule)
    }

    async fn import_rules(&self, rules: &[BlockedPhraseRule]) -> Result<usize> {
        let conn = self.conn.lock().await;
        super::queries::import_rules(&conn, rules)
    }

    async fn list_rules(&self) -> Result<Vec<StoredRule>> {
        let conn = self.conn.lock().await;
        super::queries::list_rules(&conn)
    }

    async fn rules_for_account(&self, account: &str) -> Result<Vec<BlockedPhraseRule>> {
        let conn = self.conn.lock().await;
        super::queries::rules_for_account(&conn, account)
    }

    async fn delete_rule(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_rule(&conn, id)
    }

    async fn rule_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::rule_count(&conn)
    }

    async fn record_check(
        &self,
        account: &str,
        text: &str,
        platform: Option<&str>,
        result: &ScoreResult,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::record_check(&conn, account, text, platform, result)
    }

    async fn recent_checks(&self, limit: u32) -> Result<Vec<ToneCheck>> {
        let conn = self.conn.lock().await;
        super::queries::recent_checks(&conn, limit)
    }

    async fn check_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::check_count(&conn)
    }

    async fn account_summaries(&self) -> Result<Vec<AccountSummary>> {
        let conn = self.conn.lock().await;
        super::queries::account_summaries(&conn)
    }

    async fn get_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_state(&conn, key)
    }

    async fn set_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_state(&conn, key, value)
    }
}
