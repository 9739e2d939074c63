//! Test harness for reducers
//!
//! [`TestStore`] applies a feature's reducer directly, without middleware or
//! effects, and fails fast when a step does not produce the expected state.

use crate::feature::Feature;
use crate::reducer::Reducer;

/// Reducer-only store that records every action it receives
///
/// # Example
/// ```rust,ignore
/// let mut store = TestStore::<Counter>::new();
/// store.send(CounterAction::Increment, |state| state.count == 1);
/// store.verify_actions(&[CounterAction::Increment]);
/// ```
pub struct TestStore<F: Feature> {
    reducer: F::Reducer,
    state: F::State,
    received_actions: Vec<F::Action>,
}

impl<F: Feature> TestStore<F> {
    pub fn new() -> Self {
        Self::with_state(F::initial_state())
    }

    pub fn with_state(initial_state: F::State) -> Self {
        Self {
            reducer: F::create_reducer(),
            state: initial_state,
            received_actions: Vec::new(),
        }
    }

    pub fn state(&self) -> &F::State {
        &self.state
    }

    /// Reduce `action` and assert that `expected` holds for the new state
    ///
    /// # Panics
    /// If `expected` returns false.
    pub fn send(&mut self, action: F::Action, expected: impl FnOnce(&F::State) -> bool) {
        self.received_actions.push(action.clone());
        self.state = self.reducer.reduce(self.state.clone(), &action);

        assert!(
            expected(&self.state),
            "Expected state change for action {:?} did not occur, state is {:?}",
            action,
            self.state
        );
    }

    /// Assert that exactly `expected` was sent, in order
    ///
    /// # Panics
    /// If the recorded actions differ.
    pub fn verify_actions(&self, expected: &[F::Action])
    where
        F::Action: PartialEq,
    {
        assert!(
            self.received_actions == expected,
            "Actions received by the store do not match: got {:?}, expected {:?}",
            self.received_actions,
            expected
        );
    }
}

impl<F: Feature> Default for TestStore<F> {
    fn default() -> Self {
        Self::new()
    }
}
