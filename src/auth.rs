//! Login flow with lockout enforcement
//!
//! Password hashing lives outside this crate. The host plugs its hashing
//! service in through [`CredentialHasher`]; [`LoginGuard`] only decides
//! when to ask it and records the outcome with the lockout manager.

use crate::error::TrustResult;
use crate::lockout::{LockoutManager, LockoutStatus, LockoutStore};
use crate::models::AccountId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Salted adaptive password hashing, provided by the host
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext secret into an opaque, self-describing string
    fn hash(&self, plaintext: &str) -> String;

    /// Check a plaintext secret against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Result of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    Authenticated,
    /// Wrong credentials; the account is still open
    Rejected {
        failed_attempts: u32,
        remaining_attempts: u32,
    },
    /// Locked, either already or by this failure
    Locked { until: DateTime<Utc> },
}

/// Verifies credentials for accounts subject to lockout
pub struct LoginGuard<'a, H: ?Sized, S: ?Sized> {
    hasher: &'a H,
    store: &'a S,
    manager: LockoutManager,
}

impl<'a, H, S> LoginGuard<'a, H, S>
where
    H: CredentialHasher + ?Sized,
    S: LockoutStore + ?Sized,
{
    pub fn new(hasher: &'a H, store: &'a S, manager: LockoutManager) -> Self {
        Self {
            hasher,
            store,
            manager,
        }
    }

    /// Attempt a login for `id` against its stored password hash.
    ///
    /// A locked account is refused without consulting the hasher, and the
    /// refusal is not counted as another failure.
    pub fn authenticate(
        &self,
        id: &AccountId,
        plaintext: &str,
        stored_hash: &str,
        now: DateTime<Utc>,
    ) -> TrustResult<LoginOutcome> {
        let current = self.store.load(id)?;
        if let LockoutStatus::Locked { until } = self.manager.status(&current.value, now) {
            debug!("Login for {} refused: locked until {}", id, until.to_rfc3339());
            return Ok(LoginOutcome::Locked { until });
        }

        let verified = self.hasher.verify(plaintext, stored_hash);
        let next = self.manager.record(self.store, id, verified, now)?;

        if verified {
            return Ok(LoginOutcome::Authenticated);
        }

        Ok(match self.manager.status(&next, now) {
            LockoutStatus::Locked { until } => {
                debug!("Login for {} rejected; account now locked", id);
                LoginOutcome::Locked { until }
            }
            LockoutStatus::Unlocked {
                failed_attempts,
                remaining_attempts,
            } => LoginOutcome::Rejected {
                failed_attempts,
                remaining_attempts,
            },
        })
    }
}
