// Blocked-phrase rules — the configured wording the team wants to avoid.
//
// Rules live in the database and are handed to the scorer as plain values.
// Matching is deliberately simple: a case-insensitive substring check, scoped
// to the accounts a rule applies to.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How serious a flagged phrase is. Each level carries a fixed score penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Points deducted from the tone score when an issue of this severity fires.
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::Error => 15,
            Severity::Warning => 8,
            Severity::Info => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => anyhow::bail!("Unknown severity '{other}' (expected error, warning or info)"),
        }
    }
}

/// A phrase to flag, what to say instead, and which accounts it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPhraseRule {
    pub phrase: String,
    pub suggestion: String,
    pub severity: Severity,
    /// Account identifiers this rule is scoped to, compared case-insensitively
    pub applies_to: Vec<String>,
}

impl BlockedPhraseRule {
    pub fn new(
        phrase: impl Into<String>,
        suggestion: impl Into<String>,
        severity: Severity,
        applies_to: &[&str],
    ) -> Self {
        Self {
            phrase: phrase.into(),
            suggestion: suggestion.into(),
            severity,
            applies_to: applies_to.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Does this rule apply to the given account?
pub fn applies_to_account(rule: &BlockedPhraseRule, account: &str) -> bool {
    let account = account.to_lowercase();
    rule.applies_to.iter().any(|a| a.to_lowercase() == account)
}

/// Does the (already lower-cased) text contain the rule's phrase?
///
/// Callers lower-case the text once per scoring run rather than once per rule.
pub fn matches_lowered(rule: &BlockedPhraseRule, lowered_text: &str) -> bool {
    lowered_text.contains(&rule.phrase.to_lowercase())
}

/// Parse a JSON array of rules (the `rules import` file format).
pub fn parse_rules_json(json: &str) -> anyhow::Result<Vec<BlockedPhraseRule>> {
    let rules: Vec<BlockedPhraseRule> = serde_json::from_str(json)?;
    for rule in &rules {
        if rule.phrase.trim().is_empty() {
            anyhow::bail!("Rule with empty phrase in import file");
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalties() {
        assert_eq!(Severity::Error.penalty(), 15);
        assert_eq!(Severity::Warning.penalty(), 8);
        assert_eq!(Severity::Info.penalty(), 3);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" info ".parse::<Severity>().unwrap(), Severity::Info);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_applies_to_is_case_insensitive() {
        let rule = BlockedPhraseRule::new("synergy", "Say what you mean", Severity::Error, &["OutLoud"]);
        assert!(applies_to_account(&rule, "outloud"));
        assert!(applies_to_account(&rule, "OUTLOUD"));
        assert!(!applies_to_account(&rule, "studio"));
    }

    #[test]
    fn test_empty_applies_to_matches_nobody() {
        let rule = BlockedPhraseRule::new("synergy", "", Severity::Info, &[]);
        assert!(!applies_to_account(&rule, "outloud"));
        assert!(!applies_to_account(&rule, ""));
    }

    #[test]
    fn test_matches_lowered_substring() {
        let rule = BlockedPhraseRule::new("Game Changer", "", Severity::Warning, &["a"]);
        assert!(matches_lowered(&rule, "this is a game changer for us"));
        assert!(matches_lowered(&rule, "game changers everywhere"));
        assert!(!matches_lowered(&rule, "game-changer"));
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn test_parse_rules_json() {
        let json = r#"[
            {"phrase": "synergy", "suggestion": "Be specific", "severity": "error", "applies_to": ["outloud"]},
            {"phrase": "just", "suggestion": "Cut it", "severity": "info", "applies_to": ["outloud", "studio"]}
        ]"#;
        let rules = parse_rules_json(json).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].severity, Severity::Error);
        assert_eq!(rules[1].applies_to, vec!["outloud", "studio"]);
    }

    #[test]
    fn test_parse_rules_json_rejects_empty_phrase() {
        let json = r#"[{"phrase": "  ", "suggestion": "", "severity": "info", "applies_to": []}]"#;
        assert!(parse_rules_json(json).is_err());
    }
}
