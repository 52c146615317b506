// Colored terminal output for tone checks, rule lists and posting times.
//
// main.rs display calls delegate here so formatting stays in one place.

use chrono::NaiveDateTime;
use colored::Colorize;

use crate::db::models::{AccountSummary, StoredRule, ToneCheck};
use crate::schedule::tables::Platform;
use crate::tone::rules::Severity;
use crate::tone::scorer::ScoreResult;

/// Display a tone check result and the approval verdict.
pub fn display_score_result(account: &str, result: &ScoreResult, blockers: &[String]) {
    println!(
        "\n{}",
        format!("=== Tone check for {account} ===").bold()
    );
    println!("  Score: {}/100", colorize_score(result.score));

    if result.issues.is_empty() {
        println!("  {}", "No issues found.".green());
    } else {
        println!("\n  {} issue(s):", result.issues.len());
        for (i, issue) in result.issues.iter().enumerate() {
            println!(
                "    {}. [{}] {}",
                i + 1,
                colorize_severity(issue.severity),
                issue.phrase.bold()
            );
            if !issue.suggestion.is_empty() {
                println!("       {}", issue.suggestion.dimmed());
            }
        }
    }

    println!();
    if blockers.is_empty() {
        println!("  Approval gate: {}", "pass".green().bold());
    } else {
        println!("  Approval gate: {}", "blocked".red().bold());
        for blocker in blockers {
            println!("    {} {}", "-".red(), blocker);
        }
    }
}

/// Display the stored rule list.
pub fn display_rules(rules: &[StoredRule]) {
    if rules.is_empty() {
        println!("No blocked phrases configured. Add one with `tonecheck rules add`.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Blocked phrases ({} rules) ===", rules.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<28} {:<9} {}",
        "ID".dimmed(),
        "Phrase".dimmed(),
        "Severity".dimmed(),
        "Accounts".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());

    for stored in rules {
        let rule = &stored.rule;
        // Pad before coloring so escape codes don't skew the columns
        let severity = format!("{:<9}", rule.severity.as_str());
        println!(
            "  {:>4}  {:<28} {} {}",
            stored.id,
            super::truncate_chars(&rule.phrase, 25),
            colorize_severity_text(rule.severity, &severity),
            rule.applies_to.join(", "),
        );
        if !rule.suggestion.is_empty() {
            println!("        {}", rule.suggestion.dimmed());
        }
    }
}

/// Display upcoming recommended posting slots for a platform.
pub fn display_recommendations(platform: Platform, slots: &[NaiveDateTime]) {
    println!(
        "\n{}",
        format!("=== Best times to post on {platform} ===").bold()
    );

    let days: Vec<String> = platform
        .best_days()
        .iter()
        .map(|d| d.to_string())
        .collect();
    let hours: Vec<String> = platform
        .best_hours()
        .iter()
        .map(|h| format!("{h:02}:00"))
        .collect();
    println!(
        "  {}",
        format!("Days: {}  |  Hours: {}", days.join(", "), hours.join(", ")).dimmed()
    );
    println!();

    if slots.is_empty() {
        println!("  No upcoming slots found.");
        return;
    }
    for (i, slot) in slots.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, slot.format("%a %Y-%m-%d %H:%M"));
    }
}

/// Display recent tone checks.
pub fn display_history(checks: &[ToneCheck]) {
    if checks.is_empty() {
        println!("No tone checks recorded yet. Run `tonecheck check` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent tone checks ({}) ===", checks.len()).bold()
    );
    println!();

    for check in checks {
        let platform = check
            .platform
            .as_deref()
            .map(|p| format!(" [{p}]"))
            .unwrap_or_default();
        println!(
            "  {}  {:>3}  {}{}  {}",
            check.checked_at.dimmed(),
            colorize_score(check.score),
            check.account,
            platform,
            format!("({} issues)", check.issues.len()).dimmed(),
        );
        println!("       \"{}\"", super::truncate_chars(&check.text_preview, 60).dimmed());
    }
}

/// Display per-account averages.
pub fn display_account_summaries(summaries: &[AccountSummary]) {
    for summary in summaries {
        println!(
            "  {:<24} {:>4} checks  avg {}",
            summary.account,
            summary.checks,
            colorize_score(summary.average_score.round() as u32),
        );
    }
}

/// Colorize a tone score by band.
fn colorize_score(score: u32) -> colored::ColoredString {
    let text = score.to_string();
    match score {
        90..=100 => text.green().bold(),
        70..=89 => text.yellow(),
        _ => text.red().bold(),
    }
}

fn colorize_severity(severity: Severity) -> colored::ColoredString {
    colorize_severity_text(severity, severity.as_str())
}

fn colorize_severity_text(severity: Severity, text: &str) -> colored::ColoredString {
    match severity {
        Severity::Error => text.red().bold(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.blue(),
    }
}
