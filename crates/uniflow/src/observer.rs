//! State-changed notification
//!
//! Observers are called after every reduce with the new state and the
//! transition metadata of that dispatch. Internal state changes never reach
//! them.

use crate::action::Transition;

pub type Observer<S> = Box<dyn Fn(&S, Option<&Transition>) + Send>;

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) struct Observers<S> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer<S>)>,
}

impl<S> Observers<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Observer<S>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns false if the id was unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&self, state: &S, transition: Option<&Transition>) {
        for (_, observer) in &self.entries {
            observer(state, transition);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
