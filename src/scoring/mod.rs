//! Profile Trust Scoring System
//!
//! This module derives three scores from a profile's current attributes.
//! All scorers are pure: they read a snapshot and return numbers, never
//! touching shared state.
//!
//! # Scoring Formulas
//!
//! ```text
//! Completeness = round(points / total_points × 100)
//!   name +1, age +1, job +1, school +1,
//!   ≥3 images +2, ≥3 prompts +2, >5 questionnaire answers +2
//!
//! Credibility  = clamp(round(
//!                  rating × 20 × 0.4
//!                + response_rate × 0.3
//!                + completeness × 0.2
//!                + min(age_days / 365 × 100, 100) × 0.1), 0, 100)
//!
//! Behavior     = clamp(round(
//!                  85 − reports × 5 − ghosting × 3 − inappropriate × 10
//!                + positive × 2 + min(conversation / 10, 5) + matches × 3), 0, 100)
//! ```
//!
//! Every constant above comes from [`TrustConfig`](crate::config::TrustConfig).
//!
//! # Ordering
//!
//! Credibility consumes completeness, so completeness must be current
//! before credibility is computed. [`ScoringOrchestrator`] sequences this.
//! Completeness is refreshed on every mutation; credibility and behavior
//! are refreshed only when the host asks for them.

mod behavior;
mod completeness;
mod credibility;
mod orchestrator;

pub use behavior::{compute_behavior_index, BehaviorBreakdown, BehaviorScorer};
pub use completeness::{
    account_age_days, compute_completeness, CompletenessBreakdown, CompletenessCalculator,
};
pub use credibility::{compute_credibility, CredibilityBreakdown, CredibilityScorer};
pub use orchestrator::{ScoreSnapshot, ScoringOrchestrator};

/// Round a raw score and clamp it into [0, 100]
///
/// NaN maps to 0 so a corrupt input can never escape the range.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
