// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{AccountSummary, StoredRule, ToneCheck};
use crate::output::truncate_chars;
use crate::tone::rules::{self, BlockedPhraseRule, Severity};
use crate::tone::scorer::{Issue, ScoreResult};

/// How much of a checked post we keep in history.
const PREVIEW_CHARS: usize = 80;

// --- Blocked-phrase rules ---

/// Store a new rule and return its id.
pub fn insert_rule(conn: &Connection, rule: &BlockedPhraseRule) -> Result<i64> {
    let applies_to_json = serde_json::to_string(&rule.applies_to)?;
    conn.execute(
        "INSERT INTO blocked_phrases (phrase, suggestion, severity, applies_to)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            rule.phrase,
            rule.suggestion,
            rule.severity.as_str(),
            applies_to_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Store a batch of rules in one transaction. Returns how many were added.
pub fn import_rules(conn: &Connection, rules: &[BlockedPhraseRule]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for rule in rules {
        insert_rule(&tx, rule)
            .with_context(|| format!("Failed to import rule '{}'", rule.phrase))?;
    }
    tx.commit()?;
    Ok(rules.len())
}

/// All rules, in the order they were added.
pub fn list_rules(conn: &Connection) -> Result<Vec<StoredRule>> {
    let mut stmt = conn.prepare(
        "SELECT id, phrase, suggestion, severity, applies_to, created_at
         FROM blocked_phrases
         ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut stored = Vec::new();
    for row in rows {
        let (id, phrase, suggestion, severity, applies_to_json, created_at) = row?;
        let severity: Severity = severity
            .parse()
            .with_context(|| format!("Rule {id} has an invalid severity"))?;
        let applies_to: Vec<String> = serde_json::from_str(&applies_to_json)
            .with_context(|| format!("Rule {id} has an invalid applies_to list"))?;
        stored.push(StoredRule {
            id,
            rule: BlockedPhraseRule {
                phrase,
                suggestion,
                severity,
                applies_to,
            },
            created_at,
        });
    }
    Ok(stored)
}

/// Rules that apply to one account, in evaluation order.
pub fn rules_for_account(conn: &Connection, account: &str) -> Result<Vec<BlockedPhraseRule>> {
    Ok(list_rules(conn)?
        .into_iter()
        .map(|s| s.rule)
        .filter(|r| rules::applies_to_account(r, account))
        .collect())
}

/// Delete a rule by id. Returns false if no such rule existed.
pub fn delete_rule(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM blocked_phrases WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

pub fn rule_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM blocked_phrases", [], |row| row.get(0))?;
    Ok(count)
}

// --- Tone checks ---

/// Record a scoring run and return its id.
pub fn record_check(
    conn: &Connection,
    account: &str,
    text: &str,
    platform: Option<&str>,
    result: &ScoreResult,
) -> Result<i64> {
    let issues_json = serde_json::to_string(&result.issues)?;
    let preview = truncate_chars(text.trim(), PREVIEW_CHARS);
    conn.execute(
        "INSERT INTO tone_checks (account, text_preview, score, issues, platform)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![account, preview, result.score, issues_json, platform],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent checks first.
pub fn recent_checks(conn: &Connection, limit: u32) -> Result<Vec<ToneCheck>> {
    let mut stmt = conn.prepare(
        "SELECT id, account, text_preview, platform, score, issues, checked_at
         FROM tone_checks
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        let issues_json: String = row.get(5)?;
        let issues: Vec<Issue> = serde_json::from_str(&issues_json).unwrap_or_default();
        Ok(ToneCheck {
            id: row.get(0)?,
            account: row.get(1)?,
            text_preview: row.get(2)?,
            platform: row.get(3)?,
            score: row.get(4)?,
            issues,
            checked_at: row.get(6)?,
        })
    })?;

    let mut checks = Vec::new();
    for row in rows {
        checks.push(row?);
    }
    Ok(checks)
}

pub fn check_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM tone_checks", [], |row| row.get(0))?;
    Ok(count)
}

/// Check count and average score per account, lowest average first.
pub fn account_summaries(conn: &Connection) -> Result<Vec<AccountSummary>> {
    let mut stmt = conn.prepare(
        "SELECT account, COUNT(*), AVG(score)
         FROM tone_checks
         GROUP BY lower(account)
         ORDER BY AVG(score) ASC, account ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(AccountSummary {
            account: row.get(0)?,
            checks: row.get(1)?,
            average_score: row.get(2)?,
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

// --- App state ---

/// Get a state value by key (e.g., "last_import_at").
pub fn get_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM app_state WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a state value (upsert).
pub fn set_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}
