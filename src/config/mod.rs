//! Configuration module for profile-trust
//!
//! This module handles:
//! - Trust configuration files (trust.toml, .trustrc.json)
//! - Completeness weights and thresholds
//! - Credibility and behavior scoring constants
//! - Lockout threshold and lock duration

mod trust_config;

pub use trust_config::{
    BehaviorConfig,
    CompletenessConfig,
    CompletenessWeights,
    CredibilityConfig,
    CredibilityWeights,
    LockoutConfig,
    TrustConfig,
    EXAMPLE_CONFIG,
    load_trust_config,
    load_trust_config_file,
};
