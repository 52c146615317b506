// System status display — shows DB stats, rule count, and tone history.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_path: &str, min_score: u32) -> Result<()> {
    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let rule_count = db.rule_count().await?;
    if rule_count == 0 {
        println!("Blocked phrases: none configured");
        println!("  Run `tonecheck rules add` or `tonecheck rules import` to add some");
    } else {
        println!("Blocked phrases: {rule_count}");
    }
    if let Some(imported) = db.get_state("last_import_at").await? {
        println!("Last rule import: {imported}");
    }

    println!("Approval threshold: {min_score}");

    let check_count = db.check_count().await?;
    if check_count == 0 {
        println!("Tone checks: none recorded yet");
        return Ok(());
    }
    println!("Tone checks: {check_count}");
    if let Some(last) = db.get_state("last_check_at").await? {
        println!("Last check: {last}");
    }

    let summaries = db.account_summaries().await?;
    if !summaries.is_empty() {
        println!("\nBy account:");
        crate::output::terminal::display_account_summaries(&summaries);
    }

    Ok(())
}

/// Human-readable size, for the database file line.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
