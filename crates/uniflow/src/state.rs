//! Shared handles to store-owned state
//!
//! The store is the only writer of the published state. Effect bodies running
//! off the owning context read it through a [`SharedState`] snapshot handle.
//! Internal state has no such protection: it sits behind a plain mutex and
//! concurrent access from background work is the caller's responsibility.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Latest published state, replaced as a whole after every reduce
pub type SharedState<S> = Arc<RwLock<Arc<S>>>;

/// Internal state shared between the store and effect bodies
pub type SharedInternalState<I> = Arc<Mutex<I>>;

pub(crate) fn new_shared_state<S>(state: Arc<S>) -> SharedState<S> {
    Arc::new(RwLock::new(state))
}

/// Read the current snapshot
pub(crate) fn read_snapshot<S>(shared: &SharedState<S>) -> Arc<S> {
    let guard = shared.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

pub(crate) fn publish_snapshot<S>(shared: &SharedState<S>, state: Arc<S>) {
    *shared.write().unwrap_or_else(PoisonError::into_inner) = state;
}

/// Lock internal state, recovering it if a previous holder panicked
pub(crate) fn lock_internal<I>(shared: &SharedInternalState<I>) -> MutexGuard<'_, I> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
