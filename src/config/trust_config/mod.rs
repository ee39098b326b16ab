//! Trust configuration support
//!
//! Loads scoring and lockout configuration from `trust.toml` or
//! `.trustrc.json` in a given directory. Every constant the scorers and the
//! lockout state machine use lives here, so defaults can be tuned without
//! touching the algorithms.
//!
//! # Configuration Format
//!
//! ```toml
//! # trust.toml
//!
//! [completeness]
//! min_images = 3
//! min_prompts = 3
//! questionnaire_field_threshold = 5
//! weights = { name = 1, age = 1, job = 1, school = 1, images = 2, prompts = 2, questionnaire = 2 }
//!
//! [credibility]
//! rating_scale = 20.0
//! age_horizon_days = 365
//! weights = { average_rating = 0.4, response_rate = 0.3, profile_completeness = 0.2, account_age = 0.1 }
//!
//! [behavior]
//! base_score = 85.0
//! report_penalty = 5.0
//!
//! [lockout]
//! max_attempts = 5
//! lock_duration_secs = 7200
//! ```

use crate::error::{TrustError, TrustResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Commented example written by `profile-trust init`
pub const EXAMPLE_CONFIG: &str = r#"# profile-trust configuration
# Every value shown is the built-in default.

[completeness]
# Image and prompt counts needed to earn their points
min_images = 3
min_prompts = 3
# Questionnaire points need MORE than this many answered fields
questionnaire_field_threshold = 5

[completeness.weights]
name = 1
age = 1
job = 1
school = 1
images = 2
prompts = 2
questionnaire = 2

[credibility]
# Multiplier that maps a 0-5 rating onto 0-100
rating_scale = 20.0
# Account age (days) that earns the full tenure component
age_horizon_days = 365

[credibility.weights]
average_rating = 0.4
response_rate = 0.3
profile_completeness = 0.2
account_age = 0.1

[behavior]
base_score = 85.0
report_penalty = 5.0
ghosting_penalty = 3.0
inappropriate_message_penalty = 10.0
positive_interaction_reward = 2.0
conversation_divisor = 10.0
conversation_bonus_cap = 5.0
mutual_match_reward = 3.0

[lockout]
# Failed logins before the account locks
max_attempts = 5
# Lock duration in seconds (2 hours)
lock_duration_secs = 7200
# Compare-and-swap retries before a conflict is surfaced
max_conflict_retries = 16
"#;

/// Top-level trust configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrustConfig {
    /// Profile completeness weights and thresholds
    #[serde(default)]
    pub completeness: CompletenessConfig,

    /// Credibility score weights
    #[serde(default)]
    pub credibility: CredibilityConfig,

    /// Behavior index penalties and rewards
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Failed-login lockout policy
    #[serde(default)]
    pub lockout: LockoutConfig,
}

/// Completeness scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessConfig {
    /// Points per profile field
    pub weights: CompletenessWeights,
    /// Minimum image count for the image points
    pub min_images: usize,
    /// Minimum prompt count for the prompt points
    pub min_prompts: usize,
    /// Questionnaire points require strictly more answered fields than this
    pub questionnaire_field_threshold: usize,
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            weights: CompletenessWeights::default(),
            min_images: 3,
            min_prompts: 3,
            questionnaire_field_threshold: 5,
        }
    }
}

/// Points awarded per populated profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessWeights {
    pub name: u32,
    pub age: u32,
    pub job: u32,
    pub school: u32,
    pub images: u32,
    pub prompts: u32,
    pub questionnaire: u32,
}

impl Default for CompletenessWeights {
    fn default() -> Self {
        Self {
            name: 1,
            age: 1,
            job: 1,
            school: 1,
            images: 2,
            prompts: 2,
            questionnaire: 2,
        }
    }
}

impl CompletenessWeights {
    /// Maximum attainable points (the completeness denominator)
    pub fn total(&self) -> u32 {
        self.name
            + self.age
            + self.job
            + self.school
            + self.images
            + self.prompts
            + self.questionnaire
    }
}

/// Credibility scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityConfig {
    /// Component weights (should sum to 1.0)
    #[serde(default)]
    pub weights: CredibilityWeights,

    /// Maps a 0-5 average rating onto a 0-100 percentage (default: 20.0)
    #[serde(default = "default_rating_scale")]
    pub rating_scale: f64,

    /// Account age that earns the full tenure component (default: 365)
    #[serde(default = "default_age_horizon_days")]
    pub age_horizon_days: u32,
}

impl Default for CredibilityConfig {
    fn default() -> Self {
        Self {
            weights: CredibilityWeights::default(),
            rating_scale: default_rating_scale(),
            age_horizon_days: default_age_horizon_days(),
        }
    }
}

fn default_rating_scale() -> f64 {
    20.0
}

fn default_age_horizon_days() -> u32 {
    365
}

/// Weights for the four credibility components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibilityWeights {
    /// Weight for the scaled average rating (default: 0.4)
    #[serde(default = "default_rating_weight")]
    pub average_rating: f64,

    /// Weight for the response rate (default: 0.3)
    #[serde(default = "default_response_weight")]
    pub response_rate: f64,

    /// Weight for profile completeness (default: 0.2)
    #[serde(default = "default_completeness_weight")]
    pub profile_completeness: f64,

    /// Weight for normalized account age (default: 0.1)
    #[serde(default = "default_age_weight")]
    pub account_age: f64,
}

impl Default for CredibilityWeights {
    fn default() -> Self {
        Self {
            average_rating: default_rating_weight(),
            response_rate: default_response_weight(),
            profile_completeness: default_completeness_weight(),
            account_age: default_age_weight(),
        }
    }
}

fn default_rating_weight() -> f64 {
    0.4
}
fn default_response_weight() -> f64 {
    0.3
}
fn default_completeness_weight() -> f64 {
    0.2
}
fn default_age_weight() -> f64 {
    0.1
}

impl CredibilityWeights {
    fn sum(&self) -> f64 {
        self.average_rating + self.response_rate + self.profile_completeness + self.account_age
    }

    /// Validate that weights sum to 1.0 (with tolerance)
    pub fn is_valid(&self) -> bool {
        (self.sum() - 1.0).abs() < 0.001
    }

    /// Normalize weights to sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.average_rating /= sum;
            self.response_rate /= sum;
            self.profile_completeness /= sum;
            self.account_age /= sum;
        }
    }
}

/// Behavior index configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub base_score: f64,
    pub report_penalty: f64,
    pub ghosting_penalty: f64,
    pub inappropriate_message_penalty: f64,
    pub positive_interaction_reward: f64,
    /// Conversation length is divided by this before capping
    pub conversation_divisor: f64,
    pub conversation_bonus_cap: f64,
    pub mutual_match_reward: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            base_score: 85.0,
            report_penalty: 5.0,
            ghosting_penalty: 3.0,
            inappropriate_message_penalty: 10.0,
            positive_interaction_reward: 2.0,
            conversation_divisor: 10.0,
            conversation_bonus_cap: 5.0,
            mutual_match_reward: 3.0,
        }
    }
}

/// Failed-login lockout policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockoutConfig {
    /// Failed attempts that trigger a lock
    pub max_attempts: u32,
    /// Lock duration in seconds
    pub lock_duration_secs: u64,
    /// Compare-and-swap retries before a conflict is surfaced to the caller
    pub max_conflict_retries: u32,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lock_duration_secs: 2 * 60 * 60,
            max_conflict_retries: 16,
        }
    }
}

impl LockoutConfig {
    /// Lock duration as a chrono duration
    pub fn lock_duration(&self) -> chrono::Duration {
        i64::try_from(self.lock_duration_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl TrustConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> TrustResult<Self> {
        let config: TrustConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the scorers cannot use
    pub fn validate(&self) -> TrustResult<()> {
        if self.completeness.weights.total() == 0 {
            return Err(TrustError::InvalidConfig(
                "completeness weights must not all be zero".to_string(),
            ));
        }
        if self.credibility.age_horizon_days == 0 {
            return Err(TrustError::InvalidConfig(
                "credibility.age_horizon_days must be at least 1".to_string(),
            ));
        }
        if self.behavior.conversation_divisor <= 0.0 {
            return Err(TrustError::InvalidConfig(
                "behavior.conversation_divisor must be positive".to_string(),
            ));
        }
        if self.lockout.max_attempts == 0 {
            return Err(TrustError::InvalidConfig(
                "lockout.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.lockout.lock_duration_secs == 0 {
            return Err(TrustError::InvalidConfig(
                "lockout.lock_duration_secs must be at least 1".to_string(),
            ));
        }
        if !self.credibility.weights.is_valid() {
            warn!(
                "Credibility weights sum to {:.3}, not 1.0; scores may saturate",
                self.credibility.weights.sum()
            );
        }
        Ok(())
    }
}

/// Load trust configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `trust.toml`
/// 2. `.trustrc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_trust_config(dir: &Path) -> TrustConfig {
    for name in ["trust.toml", ".trustrc.json"] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_trust_config_file(&path) {
            Ok(config) => {
                debug!("Loaded trust config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No trust config found, using defaults");
    TrustConfig::default()
}

/// Load a single config file, picking the parser from its extension
pub fn load_trust_config_file(path: &Path) -> anyhow::Result<TrustConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: TrustConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        _ => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
    };

    config.validate()?;
    Ok(config)
}
