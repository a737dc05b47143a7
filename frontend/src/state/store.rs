//! # Store
//!
//! An explicit application-state container. Components receive a store
//! (usually behind an `Arc`) instead of reaching for a global.
//!
//! ## Semantics
//! - `dispatch` runs a synchronous transition under the lock, so transitions
//!   never interleave.
//! - Every dispatch bumps a revision that subscribers observe through a
//!   `tokio::sync::watch` channel.
//! - The lock is never held across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

pub struct Store<S> {
    state: Mutex<S>,
    revision: watch::Sender<u64>,
}

impl<S> Store<S> {
    pub fn new(initial: S) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(initial),
            revision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // Poison is ignored: readers see whatever a panicking transition left
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a transition and notify subscribers
    pub fn dispatch<T>(&self, transition: impl FnOnce(&mut S) -> T) -> T {
        let out = {
            let mut state = self.lock();
            transition(&mut state)
        };
        self.revision.send_modify(|rev| *rev += 1);
        out
    }

    /// Read from the current state without notifying anyone
    pub fn select<T>(&self, selector: impl FnOnce(&S) -> T) -> T {
        selector(&self.lock())
    }

    /// Receiver that changes after every dispatch
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

impl<S: Clone> Store<S> {
    pub fn snapshot(&self) -> S {
        self.lock().clone()
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_dispatch_returns_transition_output() {
        let store = Store::new(vec![1, 2, 3]);
        let popped = store.dispatch(|v| v.pop());
        assert_eq!(popped, Some(3));
        assert_eq!(store.select(|v| v.len()), 2);
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = Arc::new(Store::new(0u32));
        let mut rx = store.subscribe();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.dispatch(|n| *n = 42);
        });

        rx.changed().await.unwrap();
        assert_eq!(store.snapshot(), 42);
    }

    #[test]
    fn test_select_does_not_bump_revision() {
        let store = Store::new(String::from("abc"));
        let _ = store.select(|s| s.len());
        assert_eq!(store.revision(), 0);
    }
}
