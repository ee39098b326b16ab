//! Score command - compute trust scores for an account document

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use console::style;
use profile_trust::config::{load_trust_config, load_trust_config_file, TrustConfig};
use profile_trust::lockout::{LockoutManager, LockoutStatus};
use profile_trust::models::load_account;
use profile_trust::scoring::{ScoreSnapshot, ScoringOrchestrator};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    account_id: String,
    #[serde(flatten)]
    scores: ScoreSnapshot,
    lockout: LockoutStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

pub fn run(
    account_path: &Path,
    config_path: Option<&Path>,
    now: Option<&str>,
    format: &str,
    explain: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let now = parse_now(now)?;

    let mut account = load_account(account_path)
        .with_context(|| format!("Failed to load account from {}", account_path.display()))?;

    let orchestrator = ScoringOrchestrator::new(config.clone());
    let explanation = explain.then(|| orchestrator.explain(&account, now));
    let scores = orchestrator.refresh(&mut account, now);
    let lockout = LockoutManager::new(config.lockout).status(&account.lockout, now);

    let report = ScoreReport {
        account_id: account.id.to_string(),
        scores,
        lockout,
        explanation,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

fn resolve_config(config_path: Option<&Path>) -> Result<TrustConfig> {
    match config_path {
        Some(path) => load_trust_config_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_trust_config(&cwd))
        }
    }
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now timestamp: {}", raw))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn print_text(report: &ScoreReport) {
    let s = &report.scores;
    println!("\n{} {}\n", style("Trust scores for").bold(), style(&report.account_id).cyan());
    println!("  Profile completeness: {}%", style(s.profile_completeness).cyan());
    println!("  Account age:          {} days", style(s.account_age_days).cyan());
    println!("  Credibility:          {}", score_style(s.credibility_score));
    println!("  Behavior index:       {}", score_style(s.behavior_index));

    match report.lockout {
        LockoutStatus::Unlocked {
            failed_attempts,
            remaining_attempts,
        } => println!(
            "  Lockout:              {} ({} failed, {} remaining)",
            style("open").green(),
            failed_attempts,
            remaining_attempts
        ),
        LockoutStatus::Locked { until } => println!(
            "  Lockout:              {} until {}",
            style("locked").red().bold(),
            until.to_rfc3339()
        ),
    }

    if let Some(explanation) = &report.explanation {
        println!("\n{}", explanation);
    }
    println!();
}

fn score_style(score: u8) -> console::StyledObject<u8> {
    match score {
        80..=100 => style(score).green(),
        50..=79 => style(score).yellow(),
        _ => style(score).red(),
    }
}
