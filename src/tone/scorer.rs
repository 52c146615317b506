// Tone-of-voice scorer.
//
// Maps (text, account, rules) to a 0-100 score and the list of issues that
// cost points. Pure and deterministic: the same inputs always give the same
// result, nothing is mutated, and there is no failure mode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::heuristics;
use super::rules::{self, BlockedPhraseRule, Severity};

/// Score for text with nothing wrong with it.
pub const MAX_SCORE: u32 = 100;

/// A single thing the scorer flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub phrase: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// The outcome of scoring one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0 to 100, higher is more on-voice
    pub score: u32,
    /// Issues in detection order: rule matches first, then heuristics
    pub issues: Vec<Issue>,
}

impl ScoreResult {
    fn clean() -> Self {
        Self {
            score: MAX_SCORE,
            issues: Vec::new(),
        }
    }

    /// True when any issue has error severity.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Number of issues at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Score `text` as posted by `account` against the configured rules.
pub fn score_text(text: &str, account: &str, rules: &[BlockedPhraseRule]) -> ScoreResult {
    if text.trim().is_empty() {
        return ScoreResult::clean();
    }

    // Deductions are summed and subtracted once so the clamp can't underflow
    let mut deducted: u32 = 0;
    let mut issues = Vec::new();

    let lowered = text.to_lowercase();
    for rule in rules {
        if !rules::applies_to_account(rule, account) {
            continue;
        }
        if rules::matches_lowered(rule, &lowered) {
            issues.push(Issue {
                phrase: rule.phrase.clone(),
                suggestion: rule.suggestion.clone(),
                severity: rule.severity,
            });
            deducted = deducted.saturating_add(rule.severity.penalty());
        }
    }

    let checks = [
        heuristics::check_emoji_run(text),
        heuristics::check_exclamations(text),
        heuristics::check_long_sentences(text),
    ];
    for (issue, penalty) in checks.into_iter().flatten() {
        issues.push(issue);
        deducted = deducted.saturating_add(penalty);
    }

    let score = MAX_SCORE.saturating_sub(deducted);

    debug!(
        account,
        score,
        issues = issues.len(),
        rules = rules.len(),
        "Scored text"
    );

    ScoreResult { score, issues }
}
