//! Profile completeness calculator
//!
//! Awards points for populated profile sections and reports them as a
//! percentage of the attainable total. Also derives the account age,
//! which is refreshed on the same cadence.

use crate::config::CompletenessConfig;
use crate::models::Account;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Points earned per section, for transparency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletenessBreakdown {
    /// Percentage in [0, 100]
    pub percentage: u8,
    pub points: u32,
    pub total_points: u32,
    /// Sections that earned their points
    pub earned: Vec<(&'static str, u32)>,
    /// Sections still missing
    pub missing: Vec<&'static str>,
    pub account_age_days: u32,
}

/// Completeness calculator bound to a configuration
pub struct CompletenessCalculator<'a> {
    config: &'a CompletenessConfig,
}

impl<'a> CompletenessCalculator<'a> {
    pub fn new(config: &'a CompletenessConfig) -> Self {
        Self { config }
    }

    /// Calculate completeness and account age with a per-section breakdown
    pub fn calculate(&self, account: &Account, now: DateTime<Utc>) -> CompletenessBreakdown {
        let weights = &self.config.weights;
        let sections = [
            ("name", weights.name, !account.name.trim().is_empty()),
            ("age", weights.age, account.age.is_some_and(|a| a > 0)),
            ("job", weights.job, !account.job.trim().is_empty()),
            ("school", weights.school, !account.school.trim().is_empty()),
            (
                "images",
                weights.images,
                account.images.len() >= self.config.min_images,
            ),
            (
                "prompts",
                weights.prompts,
                account.prompts.len() >= self.config.min_prompts,
            ),
            (
                "questionnaire",
                weights.questionnaire,
                account.questionnaire.populated_fields()
                    > self.config.questionnaire_field_threshold,
            ),
        ];

        let mut earned = Vec::new();
        let mut missing = Vec::new();
        for (section, weight, present) in sections {
            if present {
                earned.push((section, weight));
            } else {
                missing.push(section);
            }
        }

        let points: u32 = earned.iter().map(|(_, w)| w).sum();
        let total_points = weights.total();
        let percentage = if total_points == 0 {
            0
        } else {
            super::clamp_score(f64::from(points) / f64::from(total_points) * 100.0)
        };

        CompletenessBreakdown {
            percentage,
            points,
            total_points,
            earned,
            missing,
            account_age_days: account_age_days(account.created_at, now),
        }
    }
}

/// Whole days elapsed since `created_at`
///
/// An unset creation time counts as `now` (a record that has never been
/// persisted is zero days old). Clock skew never yields a negative age.
pub fn account_age_days(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    let created = created_at.unwrap_or(now);
    let days = (now - created).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Completeness percentage and account age in days
pub fn compute_completeness(
    account: &Account,
    now: DateTime<Utc>,
    config: &CompletenessConfig,
) -> (u8, u32) {
    let breakdown = CompletenessCalculator::new(config).calculate(account, now);
    (breakdown.percentage, breakdown.account_age_days)
}
