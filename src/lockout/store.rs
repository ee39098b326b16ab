//! Versioned storage for lockout state
//!
//! The store contract is optimistic concurrency: every write names the
//! version it was computed from, and a write against a newer version is
//! rejected as a retryable conflict instead of silently overwriting.

use crate::error::{TrustError, TrustResult};
use crate::models::{AccountId, LockoutState};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// A value tagged with the version it was read at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Versioned<T> {
    /// 0 for a record that has never been written
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }
}

/// Persistence seam for the `(login_attempts, lock_until)` pair
///
/// Implementations backed by a database map `compare_and_swap` onto a
/// conditional update keyed on the version column.
pub trait LockoutStore: Send + Sync {
    /// Current state and version; unknown accounts read as a fresh
    /// state at version 0
    fn load(&self, id: &AccountId) -> TrustResult<Versioned<LockoutState>>;

    /// Write `next` if the stored version still equals `expected_version`.
    ///
    /// Returns the new version, or [`TrustError::Conflict`] when another
    /// writer got there first.
    fn compare_and_swap(
        &self,
        id: &AccountId,
        expected_version: u64,
        next: LockoutState,
    ) -> TrustResult<u64>;
}

/// Thread-safe in-memory lockout store
///
/// Each swap runs under the shard lock for its key, so it is atomic per
/// account while different accounts proceed in parallel.
#[derive(Clone, Default)]
pub struct InMemoryLockoutStore {
    states: Arc<DashMap<AccountId, Versioned<LockoutState>>>,
}

impl InMemoryLockoutStore {
    pub fn new() -> Self {
        Self {
            states: Arc::new(DashMap::new()),
        }
    }

    /// Current state, if the account has ever been written
    pub fn get(&self, id: &AccountId) -> Option<LockoutState> {
        self.states.get(id).map(|entry| entry.value)
    }

    /// Number of accounts with stored state
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl LockoutStore for InMemoryLockoutStore {
    fn load(&self, id: &AccountId) -> TrustResult<Versioned<LockoutState>> {
        Ok(self
            .states
            .get(id)
            .map(|entry| *entry)
            .unwrap_or_else(|| Versioned::new(0, LockoutState::default())))
    }

    fn compare_and_swap(
        &self,
        id: &AccountId,
        expected_version: u64,
        next: LockoutState,
    ) -> TrustResult<u64> {
        let conflict = |found: u64| TrustError::Conflict {
            account: id.to_string(),
            expected: expected_version,
            found,
        };

        match self.states.entry(id.clone()) {
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                if current.version != expected_version {
                    return Err(conflict(current.version));
                }
                current.version += 1;
                current.value = next;
                Ok(current.version)
            }
            Entry::Vacant(entry) => {
                if expected_version != 0 {
                    return Err(conflict(0));
                }
                entry.insert(Versioned::new(1, next));
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempts(n: u32) -> LockoutState {
        LockoutState {
            login_attempts: n,
            lock_until: None,
        }
    }

    #[test]
    fn test_unknown_account_loads_fresh() {
        let store = InMemoryLockoutStore::new();
        let loaded = store.load(&AccountId::from("ghost")).unwrap();
        assert_eq!(loaded.version, 0);
        assert_eq!(loaded.value, LockoutState::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_swap_bumps_version() {
        let store = InMemoryLockoutStore::new();
        let id = AccountId::from("acct-1");

        assert_eq!(store.compare_and_swap(&id, 0, attempts(1)).unwrap(), 1);
        assert_eq!(store.compare_and_swap(&id, 1, attempts(2)).unwrap(), 2);

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded, Versioned::new(2, attempts(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stale_swap_is_rejected() {
        let store = InMemoryLockoutStore::new();
        let id = AccountId::from("acct-1");
        store.compare_and_swap(&id, 0, attempts(1)).unwrap();

        // Two writers both read version 1
        store.compare_and_swap(&id, 1, attempts(2)).unwrap();
        let err = store.compare_and_swap(&id, 1, attempts(2)).unwrap_err();

        assert!(matches!(
            err,
            TrustError::Conflict {
                expected: 1,
                found: 2,
                ..
            }
        ));
        assert_eq!(store.get(&id), Some(attempts(2)));
    }

    #[test]
    fn test_insert_requires_version_zero() {
        let store = InMemoryLockoutStore::new();
        let err = store
            .compare_and_swap(&AccountId::from("new"), 3, attempts(1))
            .unwrap_err();
        assert!(matches!(err, TrustError::Conflict { found: 0, .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryLockoutStore::new();
        let handle = store.clone();
        let id = AccountId::from("shared");

        handle.compare_and_swap(&id, 0, attempts(1)).unwrap();
        assert_eq!(store.get(&id), Some(attempts(1)));
    }
}
