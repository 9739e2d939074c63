//! Feature - the wiring contract a store is built from
//!
//! A feature names its state, plain action, reducer and internal state types
//! and supplies the factories the store calls at construction.

use crate::middleware::MiddlewareRef;
use crate::reducer::Reducer;
use std::fmt::Debug;

/// Static description of one store's types and default wiring
///
/// # Example
///
/// ```rust
/// use uniflow::{Feature, MiddlewareRef, ThunkMiddleware};
/// use std::sync::Arc;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct CounterState {
///     count: i64,
/// }
///
/// #[derive(Debug, Clone)]
/// enum CounterAction {
///     Increment,
///     Decrement,
/// }
///
/// fn reduce(mut state: CounterState, action: &CounterAction) -> CounterState {
///     match action {
///         CounterAction::Increment => state.count += 1,
///         CounterAction::Decrement => state.count -= 1,
///     }
///     state
/// }
///
/// struct Counter;
///
/// impl Feature for Counter {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Reducer = fn(CounterState, &CounterAction) -> CounterState;
///     type InternalState = ();
///
///     fn initial_state() -> CounterState {
///         CounterState::default()
///     }
///
///     fn create_reducer() -> Self::Reducer {
///         reduce
///     }
///
///     fn middlewares() -> Vec<MiddlewareRef<Self>> {
///         vec![Arc::new(ThunkMiddleware::new())]
///     }
/// }
/// ```
pub trait Feature: Sized + 'static {
    type State: Clone + Debug + Send + Sync + 'static;
    type Action: Clone + Debug + Send + 'static;
    type Reducer: Reducer<Self::State, Self::Action>;
    /// Secondary state outside the pipeline; `()` when the feature has none
    type InternalState: Clone + Default + Send + 'static;

    fn initial_state() -> Self::State;

    fn create_reducer() -> Self::Reducer;

    /// Default middleware, in chain order
    fn middlewares() -> Vec<MiddlewareRef<Self>> {
        Vec::new()
    }

    fn create_internal_state() -> Self::InternalState {
        Self::InternalState::default()
    }
}
