//! In-process read/write locks keyed by value
//!
//! Writers of a key exclude everyone else on that key; readers only exclude
//! writers. Different keys never contend. Slots are weak, so a key's lock is
//! freed once its last holder is gone.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

#[derive(Debug)]
pub(crate) struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Weak<RwLock<()>>>>,
}

impl<K: Eq + Hash> KeyedLocks<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until no other holder of `key` remains, then returns the guard.
    pub(crate) async fn write(&self, key: K) -> OwnedRwLockWriteGuard<()> {
        self.slot(key).write_owned().await
    }

    /// Waits until no writer holds `key`; other readers may share it.
    pub(crate) async fn read(&self, key: K) -> OwnedRwLockReadGuard<()> {
        self.slot(key).read_owned().await
    }

    fn slot(&self, key: K) -> Arc<RwLock<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, slot| slot.strong_count() > 0);

        match slots.get(&key).and_then(Weak::upgrade) {
            Some(slot) => slot,
            None => {
                let slot = Arc::new(RwLock::new(()));
                slots.insert(key, Arc::downgrade(&slot));
                slot
            }
        }
    }

    #[cfg(test)]
    fn live_slots(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.strong_count() > 0).count()
    }
}
