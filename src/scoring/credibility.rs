//! Credibility scorer
//!
//! Weighted composite of rating, responsiveness, completeness and tenure.

use super::clamp_score;
use crate::config::CredibilityConfig;
use crate::models::Account;
use serde::Serialize;

/// Weighted contribution of each credibility component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredibilityBreakdown {
    /// Final score in [0, 100]
    pub score: u8,
    /// Unrounded, unclamped weighted sum
    pub raw: f64,
    pub rating_points: f64,
    pub response_points: f64,
    pub completeness_points: f64,
    pub tenure_points: f64,
    /// Account age mapped onto [0, 100]
    pub normalized_account_age: f64,
}

/// Credibility scorer bound to a configuration
pub struct CredibilityScorer<'a> {
    config: &'a CredibilityConfig,
}

impl<'a> CredibilityScorer<'a> {
    pub fn new(config: &'a CredibilityConfig) -> Self {
        Self { config }
    }

    /// Calculate credibility with its component breakdown.
    ///
    /// Reads `profile_completeness` and `account_age_days` as stored on the
    /// account, so both must already be current.
    pub fn calculate(&self, account: &Account) -> CredibilityBreakdown {
        let metrics = &account.behavior_metrics;
        let weights = &self.config.weights;

        let horizon = f64::from(self.config.age_horizon_days.max(1));
        let normalized_account_age =
            (f64::from(account.account_age_days) / horizon * 100.0).min(100.0);

        let rating_points = metrics.average_rating * self.config.rating_scale * weights.average_rating;
        let response_points = metrics.response_rate * weights.response_rate;
        let completeness_points =
            f64::from(account.profile_completeness) * weights.profile_completeness;
        let tenure_points = normalized_account_age * weights.account_age;

        let raw = rating_points + response_points + completeness_points + tenure_points;

        CredibilityBreakdown {
            score: clamp_score(raw),
            raw,
            rating_points,
            response_points,
            completeness_points,
            tenure_points,
            normalized_account_age,
        }
    }
}

/// Credibility score in [0, 100]
pub fn compute_credibility(account: &Account, config: &CredibilityConfig) -> u8 {
    CredibilityScorer::new(config).calculate(account).score
}
