//! Per-key async mutual exclusion
//!
//! Each key gets its own `tokio::sync::Mutex`, created on first use and
//! dropped again once the last holder or waiter lets go. Distinct keys never
//! share a mutex, so they never wait on each other.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<Mutex<()>>,
    /// Holders plus waiters; the slot is evicted when this reaches zero
    claims: usize,
}

/// Registry of per-key locks
pub struct KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    slots: DashMap<K, Slot>,
}

impl<K> KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Wait for exclusive access to `key`.
    ///
    /// The claim is registered before waiting, so a wait that is cancelled
    /// (request timeout, client gone) still gives its slot back.
    pub async fn lock(&self, key: K) -> KeyGuard<'_, K> {
        let mutex = {
            let mut slot = self.slots.entry(key.clone()).or_default();
            slot.claims += 1;
            Arc::clone(&slot.mutex)
        };
        let claim = Claim { owner: self, key };
        let guard = mutex.lock_owned().await;

        KeyGuard {
            _guard: guard,
            _claim: claim,
        }
    }

    /// Number of keys currently holding a slot
    pub fn active_keys(&self) -> usize {
        self.slots.len()
    }
}

impl<K> Default for KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedLock")
            .field("active_keys", &self.slots.len())
            .finish()
    }
}

/// One holder's or waiter's stake in a slot
struct Claim<'a, K>
where
    K: Eq + Hash + Clone,
{
    owner: &'a KeyedLock<K>,
    key: K,
}

impl<K> Drop for Claim<'_, K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.owner.slots.remove_if_mut(&self.key, |_, slot| {
            slot.claims -= 1;
            slot.claims == 0
        });
    }
}

/// Held lock on one key; releases and cleans up on drop
pub struct KeyGuard<'a, K>
where
    K: Eq + Hash + Clone,
{
    // Field order matters: the mutex is released before the claim is dropped.
    _guard: OwnedMutexGuard<()>,
    _claim: Claim<'a, K>,
}
