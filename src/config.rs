use std::env;

use anyhow::{Context, Result};

/// Tone score a post needs before it can leave final review.
pub const DEFAULT_MIN_SCORE: u32 = 70;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Account to check against when `--account` isn't given
    pub default_account: String,
    /// Tone gate threshold (TONECHECK_MIN_SCORE)
    pub min_score: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let min_score = match env::var("TONECHECK_MIN_SCORE") {
            Ok(raw) => parse_min_score(&raw)?,
            Err(_) => DEFAULT_MIN_SCORE,
        };

        Ok(Self {
            db_path: env::var("TONECHECK_DB_PATH")
                .unwrap_or_else(|_| "./tonecheck.db".to_string()),
            default_account: env::var("TONECHECK_ACCOUNT").unwrap_or_default(),
            min_score,
        })
    }

    /// Pick the account to score for: the explicit one, else the default.
    pub fn require_account(&self, explicit: Option<&str>) -> Result<String> {
        match explicit.map(str::trim).filter(|a| !a.is_empty()) {
            Some(account) => Ok(account.to_string()),
            None if !self.default_account.is_empty() => Ok(self.default_account.clone()),
            None => anyhow::bail!(
                "No account given. Pass --account or set TONECHECK_ACCOUNT in your .env file."
            ),
        }
    }
}

fn parse_min_score(raw: &str) -> Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("TONECHECK_MIN_SCORE must be a number, got '{raw}'"))?;
    if value > 100 {
        anyhow::bail!("TONECHECK_MIN_SCORE must be between 0 and 100, got {value}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(default_account: &str) -> Config {
        Config {
            db_path: ":memory:".to_string(),
            default_account: default_account.to_string(),
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    #[test]
    fn test_explicit_account_wins() {
        let cfg = config("outloud");
        assert_eq!(cfg.require_account(Some("studio")).unwrap(), "studio");
    }

    #[test]
    fn test_falls_back_to_default_account() {
        let cfg = config("outloud");
        assert_eq!(cfg.require_account(None).unwrap(), "outloud");
        assert_eq!(cfg.require_account(Some("  ")).unwrap(), "outloud");
    }

    #[test]
    fn test_missing_account_is_an_error() {
        assert!(config("").require_account(None).is_err());
    }

    #[test]
    fn test_parse_min_score() {
        assert_eq!(parse_min_score(" 80 ").unwrap(), 80);
        assert!(parse_min_score("101").is_err());
        assert!(parse_min_score("high").is_err());
    }
}
