//! Dispatcher for marshalling actions onto the owning context
//!
//! Effect bodies that schedule work off the store's owning context (spawned
//! tasks, timers) must not touch the store directly. They hold a Dispatcher
//! instead: every dispatched action is queued and applied, in FIFO order,
//! when the owner calls [`Store::process_pending`](crate::Store::process_pending),
//! [`Store::process_next`](crate::Store::process_next) or while it awaits
//! [`Store::send_async`](crate::Store::send_async).

use crate::action::Transition;
use crate::feature::Feature;
use tokio::sync::{mpsc, oneshot};

/// One plain action waiting for the owning context
pub(crate) struct QueuedAction<F: Feature> {
    pub action: F::Action,
    pub transition: Option<Transition>,
    /// Resolved once the action has been reduced
    pub applied: Option<oneshot::Sender<()>>,
}

/// Sender side of a store's action queue
pub struct Dispatcher<F: Feature> {
    tx: mpsc::UnboundedSender<QueuedAction<F>>,
}

impl<F: Feature> Clone for Dispatcher<F> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<F: Feature> Dispatcher<F> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<QueuedAction<F>>) -> Self {
        Self { tx }
    }

    /// Queue a plain action for the owning context
    pub fn dispatch(&self, action: F::Action) {
        self.enqueue(action, None, None);
    }

    /// Queue a plain action together with transition metadata
    pub fn dispatch_with(&self, action: F::Action, transition: Option<Transition>) {
        self.enqueue(action, transition, None);
    }

    /// Queue a plain action and wait until the store has applied it
    ///
    /// Resolves immediately if the store is gone.
    pub async fn dispatch_and_wait(&self, action: F::Action, transition: Option<Transition>) {
        let (applied_tx, applied_rx) = oneshot::channel();
        if self.enqueue(action, transition, Some(applied_tx)) {
            // Err means the store dropped the action unapplied
            let _ = applied_rx.await;
        }
    }

    /// Whether the receiving store has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn enqueue(
        &self,
        action: F::Action,
        transition: Option<Transition>,
        applied: Option<oneshot::Sender<()>>,
    ) -> bool {
        let queued = QueuedAction {
            action,
            transition,
            applied,
        };
        if let Err(e) = self.tx.send(queued) {
            log::error!("Dispatcher: failed to send action {:?}: store is gone", e.0.action);
            return false;
        }
        true
    }
}
