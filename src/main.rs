use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use tonecheck::config::Config;
use tonecheck::db::Database;
use tonecheck::output::terminal;
use tonecheck::schedule::recommend;
use tonecheck::schedule::tables::Platform;
use tonecheck::tone::rules::{self, BlockedPhraseRule, Severity};
use tonecheck::tone::scorer;
use tonecheck::workflow;

/// tonecheck: keep social posts on-voice before they're approved.
///
/// Scores draft copy against the team's blocked phrases and style
/// heuristics, and suggests when to post it.
#[derive(Parser)]
#[command(name = "tonecheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Score a post's tone of voice
    Check {
        /// The post text (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the post text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<String>,

        /// Account the post is for (default: TONECHECK_ACCOUNT)
        #[arg(long)]
        account: Option<String>,

        /// Platform the post is for, to suggest a posting time
        #[arg(long)]
        platform: Option<String>,

        /// Approval threshold (default: TONECHECK_MIN_SCORE or 70)
        #[arg(long)]
        min_score: Option<u32>,

        /// Don't record this check in history
        #[arg(long)]
        no_save: bool,
    },

    /// Manage blocked phrases
    Rules {
        #[command(subcommand)]
        action: RuleCommands,
    },

    /// Show the best upcoming times to post on a platform
    BestTime {
        /// instagram, linkedin, x, facebook or tiktok
        platform: String,

        /// How many slots to show (default: 5)
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Show recent tone checks
    History {
        /// Number of checks to show (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Show system status (rule count, check history, per-account averages)
    Status,
}

#[derive(Subcommand)]
enum RuleCommands {
    /// List blocked phrases
    List {
        /// Only show rules that apply to this account
        #[arg(long)]
        account: Option<String>,
    },

    /// Add a blocked phrase
    Add {
        /// The phrase to flag (matched case-insensitively)
        phrase: String,

        /// What to write instead
        #[arg(long, default_value = "")]
        suggestion: String,

        /// error, warning or info
        #[arg(long, default_value = "warning")]
        severity: String,

        /// Comma-separated accounts the rule applies to
        #[arg(long, value_delimiter = ',', required = true)]
        accounts: Vec<String>,
    },

    /// Remove a blocked phrase by id
    Remove {
        id: i64,
    },

    /// Import blocked phrases from a JSON file
    Import {
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tonecheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing tonecheck database...");
            let config = Config::load()?;
            let db = tonecheck::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: add blocked phrases with `tonecheck rules import rules.json`");
        }

        Commands::Check {
            text,
            file,
            account,
            platform,
            min_score,
            no_save,
        } => {
            let config = Config::load()?;
            let account = config.require_account(account.as_deref())?;
            let platform = platform.map(|p| p.parse::<Platform>()).transpose()?;
            let min_score = min_score.unwrap_or(config.min_score);
            let db = tonecheck::db::open_sqlite(&config.db_path)?;

            let text = read_post_text(text, file)?;
            let rules = db.rules_for_account(&account).await?;
            if rules.is_empty() {
                warn!(account = %account, "No blocked phrases apply to this account");
            }

            let result = scorer::score_text(&text, &account, &rules);
            let blockers = workflow::approval_blockers(&result, min_score);

            info!(
                account = %account,
                score = result.score,
                issues = result.issues.len(),
                gate_passed = blockers.is_empty(),
                "Tone check complete"
            );

            terminal::display_score_result(&account, &result, &blockers);

            if let Some(platform) = platform {
                let now = chrono::Local::now().naive_local();
                if recommend::is_good_time(platform, now) {
                    println!("\n  {}", format!("Now is a good time to post on {platform}.").green());
                } else if let Some(next) = recommend::recommend(platform, now, 1).first() {
                    println!(
                        "\n  Next good time on {platform}: {}",
                        next.format("%a %Y-%m-%d %H:%M").to_string().bold()
                    );
                }
            }

            if !no_save {
                db.record_check(
                    &account,
                    &text,
                    platform.as_ref().map(Platform::as_str),
                    &result,
                )
                .await?;
                db.set_state("last_check_at", &chrono::Utc::now().to_rfc3339())
                    .await?;
            }
        }

        Commands::Rules { action } => {
            let config = Config::load()?;
            let db = tonecheck::db::open_sqlite(&config.db_path)?;
            run_rules_command(&db, action).await?;
        }

        Commands::BestTime { platform, count } => {
            let platform: Platform = platform.parse()?;
            let now = chrono::Local::now().naive_local();
            let slots = recommend::recommend(platform, now, count);
            terminal::display_recommendations(platform, &slots);
        }

        Commands::History { limit } => {
            let config = Config::load()?;
            let db = tonecheck::db::open_sqlite(&config.db_path)?;
            let checks = db.recent_checks(limit).await?;
            terminal::display_history(&checks);
        }

        Commands::Status => {
            let config = Config::load()?;
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `tonecheck init` to set up the database.");
                return Ok(());
            }
            let db = tonecheck::db::open_sqlite(&config.db_path)?;
            tonecheck::status::show(&db, &config.db_path, config.min_score).await?;
        }
    }

    Ok(())
}

async fn run_rules_command(db: &Arc<dyn Database>, action: RuleCommands) -> Result<()> {
    match action {
        RuleCommands::List { account } => {
            let mut stored = db.list_rules().await?;
            if let Some(account) = account.as_deref() {
                stored.retain(|s| rules::applies_to_account(&s.rule, account));
            }
            terminal::display_rules(&stored);
        }

        RuleCommands::Add {
            phrase,
            suggestion,
            severity,
            accounts,
        } => {
            if phrase.trim().is_empty() {
                anyhow::bail!("Phrase can't be empty");
            }
            let severity: Severity = severity.parse()?;
            let applies_to: Vec<String> = accounts
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            if applies_to.is_empty() {
                anyhow::bail!("A rule needs at least one account in --accounts");
            }

            let rule = BlockedPhraseRule {
                phrase,
                suggestion,
                severity,
                applies_to,
            };
            let id = db.insert_rule(&rule).await?;
            info!(id, phrase = %rule.phrase, severity = %rule.severity, "Added blocked phrase");
            println!("Added rule {id}: \"{}\" ({})", rule.phrase, rule.severity);
        }

        RuleCommands::Remove { id } => {
            if db.delete_rule(id).await? {
                println!("Removed rule {id}");
            } else {
                anyhow::bail!("No rule with id {id}");
            }
        }

        RuleCommands::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read rules file {path}"))?;
            let parsed = rules::parse_rules_json(&json)
                .with_context(|| format!("Failed to parse rules file {path}"))?;
            let added = db.import_rules(&parsed).await?;
            db.set_state("last_import_at", &chrono::Utc::now().to_rfc3339())
                .await?;
            info!(path = %path, added, "Imported blocked phrases");
            println!("{}", format!("Imported {added} rules from {path}").bold());
        }
    }

    Ok(())
}

/// Post text from the argument, a file, or stdin, in that order.
fn read_post_text(text: Option<String>, file: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read post text from {path}"));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read post text from stdin")?;
    Ok(buf)
}
