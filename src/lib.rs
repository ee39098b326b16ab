//! profile-trust - trust scoring and login lockout for dating profiles
//!
//! Derives profile completeness, a credibility score and a behavior index
//! from a profile's current attributes, and runs the failed-login lockout
//! state machine with lost-update-free storage semantics.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use profile_trust::{Account, ScoringOrchestrator, TrustConfig};
//!
//! let orchestrator = ScoringOrchestrator::new(TrustConfig::default());
//! let mut account = Account::new("acct-1", Utc::now());
//! account.name = "Ada".to_string();
//!
//! orchestrator.on_account_mutated(&mut account, Utc::now());
//! let scores = orchestrator.recompute_scores(&mut account);
//! assert!(scores.credibility_score <= 100);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod lockout;
pub mod models;
pub mod scoring;

pub use auth::{CredentialHasher, LoginGuard, LoginOutcome};
pub use config::{load_trust_config, TrustConfig};
pub use error::{TrustError, TrustResult};
pub use lockout::{
    apply_login_result, is_locked, InMemoryLockoutStore, LockoutManager, LockoutStatus,
    LockoutStore,
};
pub use models::{Account, AccountId, BehaviorMetrics, LockoutState};
pub use scoring::{
    compute_behavior_index, compute_completeness, compute_credibility, ScoreSnapshot,
    ScoringOrchestrator,
};
