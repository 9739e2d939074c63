//! Middleware system
//!
//! Middleware sits around every dispatch, allowing side effects, effect
//! execution, logging and other cross-cutting concerns to be handled in a
//! composable way.
//!
//! ## Dispatch protocol
//!
//! ```text
//! before hooks (all, in order) → process (all, in order) → reducer (plain only) → after hooks (all, in order)
//! ```
//!
//! The traversal is flat: every middleware sees every envelope, and hooks run
//! in registration order in both phases. A middleware cannot stop later nodes
//! from seeing an action; it can only choose not to act on it.

pub mod action_publisher;
pub mod hook;
pub mod logging;
pub mod thunk;

pub use thunk::ThunkMiddleware;

use crate::action::{ReduxAction, Transition};
use crate::feature::Feature;
use crate::store::Store;
use std::sync::Arc;

/// Shared middleware handle as stored in the chain
pub type MiddlewareRef<F> = Arc<dyn Middleware<F>>;

/// Middleware trait - intercepts every envelope sent to a store
///
/// # Example
///
/// ```rust,ignore
/// struct AuditMiddleware;
///
/// impl Middleware<Counter> for AuditMiddleware {
///     fn before_process(&self, action: &ReduxAction<Counter>, state: &CounterState) {
///         log::info!("{:?} at count {}", action, state.count);
///     }
///
///     fn process(&self, store: &mut Store<Counter>, action: &ReduxAction<Counter>) {
///         if let ReduxAction::Plain(CounterAction::Reset) = action {
///             store.set_internal_state(Default::default());
///         }
///     }
/// }
/// ```
pub trait Middleware<F: Feature>: Send + Sync {
    /// Runs before any core step, with the pre-dispatch state
    fn before_process(&self, _action: &ReduxAction<F>, _state: &F::State) {}

    /// Core step
    ///
    /// - `store`: the dispatching store; re-entering `send` starts a nested cycle
    /// - `action`: the envelope being dispatched
    fn process(&self, store: &mut Store<F>, action: &ReduxAction<F>);

    /// Runs after the reducer, with the post-dispatch state
    fn after_process(&self, _action: &ReduxAction<F>, _state: &F::State) {}
}

impl<F: Feature, M: Middleware<F> + ?Sized> Middleware<F> for Arc<M> {
    fn before_process(&self, action: &ReduxAction<F>, state: &F::State) {
        (**self).before_process(action, state)
    }

    fn process(&self, store: &mut Store<F>, action: &ReduxAction<F>) {
        (**self).process(store, action)
    }

    fn after_process(&self, action: &ReduxAction<F>, state: &F::State) {
        (**self).after_process(action, state)
    }
}

/// Steps of one dispatch, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Received,
    BeforeHooksRun,
    ChainTraversed,
    Reduced,
    AfterHooksRun,
    Done,
}

/// Ordered, immutable middleware list
///
/// Appending builds a new list, so a traversal in progress keeps the list it
/// started with even if a middleware appends to the store mid-dispatch.
pub struct MiddlewareChain<F: Feature> {
    middlewares: Arc<[MiddlewareRef<F>]>,
}

impl<F: Feature> Clone for MiddlewareChain<F> {
    fn clone(&self) -> Self {
        Self {
            middlewares: Arc::clone(&self.middlewares),
        }
    }
}

impl<F: Feature> Default for MiddlewareChain<F> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<F: Feature> MiddlewareChain<F> {
    pub fn new(middlewares: Vec<MiddlewareRef<F>>) -> Self {
        Self {
            middlewares: middlewares.into(),
        }
    }

    /// Add a middleware at the end of the chain
    pub fn append(&mut self, middleware: MiddlewareRef<F>) {
        let mut middlewares = self.middlewares.to_vec();
        middlewares.push(middleware);
        self.middlewares = middlewares.into();
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run one full dispatch of `action` against `store`
    pub(crate) fn process(
        &self,
        store: &mut Store<F>,
        action: &ReduxAction<F>,
        transition: Option<Transition>,
    ) {
        trace_phase(DispatchPhase::Received, action);

        for middleware in self.middlewares.iter() {
            middleware.before_process(action, store.state());
        }
        trace_phase(DispatchPhase::BeforeHooksRun, action);

        for middleware in self.middlewares.iter() {
            middleware.process(store, action);
        }
        trace_phase(DispatchPhase::ChainTraversed, action);

        if let Some(plain) = action.as_plain() {
            store.reduce(plain, transition.as_ref());
            trace_phase(DispatchPhase::Reduced, action);
        }

        for middleware in self.middlewares.iter() {
            middleware.after_process(action, store.state());
        }
        trace_phase(DispatchPhase::AfterHooksRun, action);
        trace_phase(DispatchPhase::Done, action);
    }
}

fn trace_phase<F: Feature>(phase: DispatchPhase, action: &ReduxAction<F>) {
    log::trace!("{:?}: {:?}", phase, action);
}
