//! Behavior index scorer

use super::clamp_score;
use crate::config::BehaviorConfig;
use crate::models::BehaviorMetrics;
use serde::Serialize;

/// Penalties and rewards applied to the base score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorBreakdown {
    /// Final index in [0, 100]
    pub index: u8,
    pub raw: f64,
    pub base_score: f64,
    pub report_penalty: f64,
    pub ghosting_penalty: f64,
    pub inappropriate_penalty: f64,
    pub positive_reward: f64,
    pub conversation_reward: f64,
    pub mutual_match_reward: f64,
}

impl BehaviorBreakdown {
    pub fn total_penalty(&self) -> f64 {
        self.report_penalty + self.ghosting_penalty + self.inappropriate_penalty
    }

    pub fn total_reward(&self) -> f64 {
        self.positive_reward + self.conversation_reward + self.mutual_match_reward
    }
}

pub struct BehaviorScorer<'a> {
    config: &'a BehaviorConfig,
}

impl<'a> BehaviorScorer<'a> {
    pub fn new(config: &'a BehaviorConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, metrics: &BehaviorMetrics) -> BehaviorBreakdown {
        let c = self.config;

        let report_penalty = f64::from(metrics.report_count) * c.report_penalty;
        let ghosting_penalty = f64::from(metrics.ghosting_incidents) * c.ghosting_penalty;
        let inappropriate_penalty =
            f64::from(metrics.inappropriate_messages) * c.inappropriate_message_penalty;

        let positive_reward = f64::from(metrics.positive_interactions) * c.positive_interaction_reward;
        let conversation_reward = (f64::from(metrics.conversation_length) / c.conversation_divisor)
            .min(c.conversation_bonus_cap);
        let mutual_match_reward = f64::from(metrics.mutual_matches) * c.mutual_match_reward;

        let raw = c.base_score - report_penalty - ghosting_penalty - inappropriate_penalty
            + positive_reward
            + conversation_reward
            + mutual_match_reward;

        BehaviorBreakdown {
            index: clamp_score(raw),
            raw,
            base_score: c.base_score,
            report_penalty,
            ghosting_penalty,
            inappropriate_penalty,
            positive_reward,
            conversation_reward,
            mutual_match_reward,
        }
    }
}

/// Behavior index in [0, 100]
pub fn compute_behavior_index(metrics: &BehaviorMetrics, config: &BehaviorConfig) -> u8 {
    BehaviorScorer::new(config).calculate(metrics).index
}
