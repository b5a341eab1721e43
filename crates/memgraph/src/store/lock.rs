//! Process-wide lock registry keyed by store identity.
//!
//! Every [`GraphStore`](super::GraphStore) opened on the same identity gets
//! the same mutex, so load-apply-save sequences against one store never
//! interleave even when callers hold separate store values.

use log::trace;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// The lock shared by all stores with one identity.
pub(crate) type StoreLock = Arc<Mutex<()>>;

fn registry() -> &'static Mutex<HashMap<String, StoreLock>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, StoreLock>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Fetch (or create) the lock for `identity`.
///
/// Entries no store holds any more are pruned on the way.
pub(crate) fn lock_for(identity: &str) -> StoreLock {
    let mut locks = registry().lock().unwrap_or_else(|e| e.into_inner());
    locks.retain(|key, lock| key == identity || Arc::strong_count(lock) > 1);

    let lock = Arc::clone(locks.entry(identity.to_string()).or_default());
    trace!("Lock registry holds {} stores", locks.len());
    lock
}

/// Acquire `lock`, recovering from poisoning.
///
/// The mutex guards no data (each operation loads its own graph), so a
/// panic in another holder leaves nothing inconsistent behind.
pub(crate) fn acquire(lock: &StoreLock) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(|e| e.into_inner())
}
