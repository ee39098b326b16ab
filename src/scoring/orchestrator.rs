//! Scoring orchestration
//!
//! The host calls [`ScoringOrchestrator::on_account_mutated`] after any
//! profile edit, and [`ScoringOrchestrator::recompute_scores`] when it wants
//! credibility and behavior refreshed (after rating events, moderation
//! actions, security reviews). The lockout pair is never touched here.

use super::{BehaviorScorer, CompletenessCalculator, CredibilityScorer};
use crate::config::TrustConfig;
use crate::models::Account;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Derived values after a recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub profile_completeness: u8,
    pub account_age_days: u32,
    pub credibility_score: u8,
    pub behavior_index: u8,
}

impl ScoreSnapshot {
    fn of(account: &Account) -> Self {
        Self {
            profile_completeness: account.profile_completeness,
            account_age_days: account.account_age_days,
            credibility_score: account.credibility_score,
            behavior_index: account.behavior_index,
        }
    }
}

/// Sequences the scorers over an account
#[derive(Debug, Clone, Default)]
pub struct ScoringOrchestrator {
    config: TrustConfig,
}

impl ScoringOrchestrator {
    pub fn new(config: TrustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Refresh completeness and account age after a profile edit.
    ///
    /// Credibility and behavior index are left as they are.
    pub fn on_account_mutated(&self, account: &mut Account, now: DateTime<Utc>) -> ScoreSnapshot {
        let breakdown =
            CompletenessCalculator::new(&self.config.completeness).calculate(account, now);
        account.profile_completeness = breakdown.percentage;
        account.account_age_days = breakdown.account_age_days;

        debug!(
            "Account {}: completeness={}% ({}/{} pts), age={}d",
            account.id,
            breakdown.percentage,
            breakdown.points,
            breakdown.total_points,
            breakdown.account_age_days
        );

        ScoreSnapshot::of(account)
    }

    /// Refresh credibility and behavior index from current attributes.
    ///
    /// Assumes completeness and account age are already current.
    pub fn recompute_scores(&self, account: &mut Account) -> ScoreSnapshot {
        let credibility = CredibilityScorer::new(&self.config.credibility).calculate(account);
        let behavior = BehaviorScorer::new(&self.config.behavior).calculate(&account.behavior_metrics);

        debug!(
            "Account {}: credibility {} -> {}, behavior {} -> {}",
            account.id,
            account.credibility_score,
            credibility.score,
            account.behavior_index,
            behavior.index
        );

        account.credibility_score = credibility.score;
        account.behavior_index = behavior.index;

        ScoreSnapshot::of(account)
    }

    /// Refresh everything, completeness first
    pub fn refresh(&self, account: &mut Account, now: DateTime<Utc>) -> ScoreSnapshot {
        self.on_account_mutated(account, now);
        self.recompute_scores(account)
    }

    /// Generate human-readable explanation of the account's scores
    ///
    /// Computed from a scratch copy; the account itself is not modified.
    pub fn explain(&self, account: &Account, now: DateTime<Utc>) -> String {
        let completeness =
            CompletenessCalculator::new(&self.config.completeness).calculate(account, now);

        let mut current = account.clone();
        current.profile_completeness = completeness.percentage;
        current.account_age_days = completeness.account_age_days;
        let credibility = CredibilityScorer::new(&self.config.credibility).calculate(&current);
        let behavior = BehaviorScorer::new(&self.config.behavior).calculate(&account.behavior_metrics);

        let mut lines = Vec::new();

        lines.push(format!("# Trust Scores: {}\n", account.id));

        lines.push(format!(
            "## Profile Completeness: {}%\n",
            completeness.percentage
        ));
        lines.push(format!(
            "- Points: {} of {}",
            completeness.points, completeness.total_points
        ));
        for (section, points) in &completeness.earned {
            lines.push(format!("  - {}: +{}", section, points));
        }
        if !completeness.missing.is_empty() {
            lines.push(format!("- Missing: {}", completeness.missing.join(", ")));
        }
        lines.push(format!("- Account age: {} days\n", completeness.account_age_days));

        let w = &self.config.credibility.weights;
        lines.push(format!("## Credibility: {}\n", credibility.score));
        lines.push(format!(
            "- Rating: {:.1} pts (weight {:.2})",
            credibility.rating_points, w.average_rating
        ));
        lines.push(format!(
            "- Response rate: {:.1} pts (weight {:.2})",
            credibility.response_points, w.response_rate
        ));
        lines.push(format!(
            "- Completeness: {:.1} pts (weight {:.2})",
            credibility.completeness_points, w.profile_completeness
        ));
        lines.push(format!(
            "- Tenure: {:.1} pts (weight {:.2}, {:.0}% of horizon)\n",
            credibility.tenure_points, w.account_age, credibility.normalized_account_age
        ));

        lines.push(format!("## Behavior Index: {}\n", behavior.index));
        lines.push(format!("- Base: {:.1}", behavior.base_score));
        lines.push(format!(
            "- Penalties: -{:.1} (reports {:.1}, ghosting {:.1}, inappropriate {:.1})",
            behavior.total_penalty(),
            behavior.report_penalty,
            behavior.ghosting_penalty,
            behavior.inappropriate_penalty
        ));
        lines.push(format!(
            "- Rewards: +{:.1} (positive {:.1}, conversation {:.1}, matches {:.1})",
            behavior.total_reward(),
            behavior.positive_reward,
            behavior.conversation_reward,
            behavior.mutual_match_reward
        ));

        lines.join("\n")
    }
}
