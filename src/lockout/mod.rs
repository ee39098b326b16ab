//! Failed-login lockout state machine
//!
//! ```text
//!              failure (attempts + 1 < max)
//!             ┌──────────┐
//!             ▼          │
//!        ┌──────────┐────┘   failure (attempts + 1 ≥ max)   ┌────────┐
//!        │ Unlocked │ ─────────────────────────────────────▶ │ Locked │
//!        └──────────┘ ◀───────────────────────────────────── └────────┘
//!          ▲      success (any state), or failure after the      │
//!          │      deadline elapsed (attempts restart at 1)       │
//!          └─────────────────────────────────────────────────────┘
//! ```
//!
//! [`apply_login_result`] is the pure transition. [`LockoutManager::record`]
//! runs it as an atomic read-modify-write against a [`LockoutStore`],
//! retrying on version conflicts so concurrent failures are never lost.

mod store;

pub use store::{InMemoryLockoutStore, LockoutStore, Versioned};

use crate::config::LockoutConfig;
use crate::error::{TrustError, TrustResult};
use crate::models::{AccountId, LockoutState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Lock status at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LockoutStatus {
    Unlocked {
        failed_attempts: u32,
        /// Failures left before the account locks
        remaining_attempts: u32,
    },
    Locked { until: DateTime<Utc> },
}

/// Whether `state` is locked at `now`
pub fn is_locked(state: &LockoutState, now: DateTime<Utc>) -> bool {
    state.is_locked(now)
}

/// Next lockout state after a login attempt
pub fn apply_login_result(
    state: &LockoutState,
    success: bool,
    now: DateTime<Utc>,
    config: &LockoutConfig,
) -> LockoutState {
    if success {
        return LockoutState::default();
    }

    // An expired lock starts a fresh window
    if state.lock_until.is_some_and(|until| until <= now) {
        return LockoutState {
            login_attempts: 1,
            lock_until: None,
        };
    }

    let login_attempts = state.login_attempts.saturating_add(1);
    let lock_until = if login_attempts >= config.max_attempts && !state.is_locked(now) {
        Some(
            now.checked_add_signed(config.lock_duration())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    } else {
        state.lock_until
    };

    LockoutState {
        login_attempts,
        lock_until,
    }
}

/// Lock status of `state` at `now`
pub fn lockout_status(
    state: &LockoutState,
    now: DateTime<Utc>,
    config: &LockoutConfig,
) -> LockoutStatus {
    match state.lock_until {
        Some(until) if until > now => LockoutStatus::Locked { until },
        Some(_) => LockoutStatus::Unlocked {
            // The next failure restarts the count
            failed_attempts: 0,
            remaining_attempts: config.max_attempts,
        },
        None => LockoutStatus::Unlocked {
            failed_attempts: state.login_attempts,
            remaining_attempts: config.max_attempts.saturating_sub(state.login_attempts),
        },
    }
}

/// Applies login outcomes to stored lockout state
#[derive(Debug, Clone, Default)]
pub struct LockoutManager {
    config: LockoutConfig,
}

impl LockoutManager {
    pub fn new(config: LockoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// Pure transition with this manager's policy
    pub fn apply(&self, state: &LockoutState, success: bool, now: DateTime<Utc>) -> LockoutState {
        apply_login_result(state, success, now, &self.config)
    }

    pub fn status(&self, state: &LockoutState, now: DateTime<Utc>) -> LockoutStatus {
        lockout_status(state, now, &self.config)
    }

    /// Record a login outcome for `id` and return the stored next state.
    ///
    /// Load, transition and compare-and-swap are retried until the swap
    /// lands or `max_conflict_retries` is exhausted, in which case the last
    /// conflict is returned to the caller.
    pub fn record<S>(
        &self,
        store: &S,
        id: &AccountId,
        success: bool,
        now: DateTime<Utc>,
    ) -> TrustResult<LockoutState>
    where
        S: LockoutStore + ?Sized,
    {
        let mut last_conflict = None;

        for attempt in 0..=self.config.max_conflict_retries {
            let current = store.load(id)?;
            let next = self.apply(&current.value, success, now);

            if next == current.value {
                return Ok(next);
            }

            match store.compare_and_swap(id, current.version, next) {
                Ok(version) => {
                    if next.is_locked(now) && !current.value.is_locked(now) {
                        info!(
                            "Account {} locked after {} failed logins (until {})",
                            id,
                            next.login_attempts,
                            next.lock_until.map(|t| t.to_rfc3339()).unwrap_or_default()
                        );
                    } else {
                        debug!(
                            "Account {}: login_attempts {} -> {} (v{})",
                            id, current.value.login_attempts, next.login_attempts, version
                        );
                    }
                    return Ok(next);
                }
                Err(e) if e.is_retryable() => {
                    debug!("Lockout update for {} conflicted (attempt {}): {}", id, attempt + 1, e);
                    last_conflict = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_conflict.unwrap_or_else(|| TrustError::Conflict {
            account: id.to_string(),
            expected: 0,
            found: 0,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 14, 20, 0, 0).unwrap()
    }

    fn fail_n(n: u32, start: LockoutState, at: DateTime<Utc>) -> LockoutState {
        let config = LockoutConfig::default();
        (0..n).fold(start, |state, _| apply_login_result(&state, false, at, &config))
    }

    #[test]
    fn test_four_failures_stay_unlocked() {
        let state = fail_n(4, LockoutState::default(), now());
        assert_eq!(state.login_attempts, 4);
        assert!(state.lock_until.is_none());
        assert!(!is_locked(&state, now()));
    }

    #[test]
    fn test_fifth_failure_locks_for_two_hours() {
        let state = fail_n(5, LockoutState::default(), now());
        assert_eq!(state.login_attempts, 5);
        assert_eq!(state.lock_until, Some(now() + Duration::hours(2)));
        assert!(is_locked(&state, now()));
        assert!(is_locked(&state, now() + Duration::minutes(119)));
        assert!(!is_locked(&state, now() + Duration::hours(2)));
    }

    #[test]
    fn test_failures_while_locked_keep_deadline() {
        let locked = fail_n(5, LockoutState::default(), now());
        let later = now() + Duration::minutes(30);
        let state = fail_n(3, locked, later);

        assert_eq!(state.login_attempts, 8);
        assert_eq!(state.lock_until, locked.lock_until);
    }

    #[test]
    fn test_success_resets_from_any_state() {
        let config = LockoutConfig::default();
        for start in [
            LockoutState::default(),
            fail_n(3, LockoutState::default(), now()),
            fail_n(5, LockoutState::default(), now()),
        ] {
            let state = apply_login_result(&start, true, now(), &config);
            assert_eq!(state, LockoutState::default());
        }
    }

    #[test]
    fn test_failure_after_expiry_restarts_at_one() {
        let config = LockoutConfig::default();
        let locked = fail_n(5, LockoutState::default(), now());
        let after = now() + Duration::hours(3);

        let state = apply_login_result(&locked, false, after, &config);
        assert_eq!(state.login_attempts, 1);
        assert!(state.lock_until.is_none());
    }

    #[test]
    fn test_failure_at_exact_deadline_restarts() {
        let config = LockoutConfig::default();
        let locked = fail_n(5, LockoutState::default(), now());
        let deadline = locked.lock_until.unwrap();

        let state = apply_login_result(&locked, false, deadline, &config);
        assert_eq!(state.login_attempts, 1);
        assert!(state.lock_until.is_none());
    }

    #[test]
    fn test_custom_threshold_and_duration() {
        let config = LockoutConfig {
            max_attempts: 2,
            lock_duration_secs: 60,
            ..Default::default()
        };
        let first = apply_login_result(&LockoutState::default(), false, now(), &config);
        assert!(first.lock_until.is_none());
        let second = apply_login_result(&first, false, now(), &config);
        assert_eq!(second.lock_until, Some(now() + Duration::seconds(60)));
    }

    #[test]
    fn test_huge_lock_duration_saturates() {
        let config = LockoutConfig {
            max_attempts: 1,
            lock_duration_secs: u64::MAX,
            ..Default::default()
        };
        let state = apply_login_result(&LockoutState::default(), false, now(), &config);
        assert_eq!(state.lock_until, Some(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_status_reports_remaining_attempts() {
        let manager = LockoutManager::default();
        let state = fail_n(3, LockoutState::default(), now());
        assert_eq!(
            manager.status(&state, now()),
            LockoutStatus::Unlocked {
                failed_attempts: 3,
                remaining_attempts: 2
            }
        );

        let locked = fail_n(5, LockoutState::default(), now());
        assert_eq!(
            manager.status(&locked, now()),
            LockoutStatus::Locked {
                until: now() + Duration::hours(2)
            }
        );
        assert_eq!(
            manager.status(&locked, now() + Duration::hours(5)),
            LockoutStatus::Unlocked {
                failed_attempts: 0,
                remaining_attempts: 5
            }
        );
    }

    #[test]
    fn test_record_persists_through_store() {
        let manager = LockoutManager::default();
        let store = InMemoryLockoutStore::new();
        let id = AccountId::from("acct-1");

        for _ in 0..4 {
            manager.record(&store, &id, false, now()).unwrap();
        }
        assert_eq!(store.get(&id).unwrap().login_attempts, 4);

        let state = manager.record(&store, &id, false, now()).unwrap();
        assert!(state.is_locked(now()));
        assert_eq!(store.get(&id), Some(state));

        let state = manager.record(&store, &id, true, now()).unwrap();
        assert_eq!(state, LockoutState::default());
        assert_eq!(store.get(&id), Some(LockoutState::default()));
    }

    #[test]
    fn test_record_success_on_fresh_account_skips_write() {
        let manager = LockoutManager::default();
        let store = InMemoryLockoutStore::new();
        let id = AccountId::from("fresh");

        let state = manager.record(&store, &id, true, now()).unwrap();
        assert_eq!(state, LockoutState::default());
        assert_eq!(store.load(&id).unwrap().version, 0);
    }

    /// Store whose swaps always lose the race
    struct AlwaysConflicting;

    impl LockoutStore for AlwaysConflicting {
        fn load(&self, _id: &AccountId) -> TrustResult<Versioned<LockoutState>> {
            Ok(Versioned::new(0, LockoutState::default()))
        }

        fn compare_and_swap(
            &self,
            id: &AccountId,
            expected_version: u64,
            _next: LockoutState,
        ) -> TrustResult<u64> {
            Err(TrustError::Conflict {
                account: id.to_string(),
                expected: expected_version,
                found: expected_version + 1,
            })
        }
    }

    #[test]
    fn test_record_surfaces_conflict_after_retry_budget() {
        let manager = LockoutManager::new(LockoutConfig {
            max_conflict_retries: 3,
            ..Default::default()
        });
        let err = manager
            .record(&AlwaysConflicting, &AccountId::from("hot"), false, now())
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, TrustError::Conflict { found: 1, .. }));
    }
}
