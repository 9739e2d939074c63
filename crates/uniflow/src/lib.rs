//! Unidirectional state container
//!
//! A typed [`Store`] accepts actions, runs them through an ordered chain of
//! [`Middleware`], applies a pure [`Reducer`] and exposes the resulting state
//! to observers.
//!
//! ```text
//! send(action) → before hooks → middleware chain → reducer (plain only) → after hooks
//! ```
//!
//! Actions come in two shapes (see [`ReduxAction`]):
//! - **Plain** actions are consumed by the reducer
//! - **Effect** actions ([`EffectAction`]) carry deferred or asynchronous work.
//!   They are executed by [`ThunkMiddleware`] and can only change state by
//!   dispatching plain actions back into the store.
//!
//! Each store also carries an optional internal state that is read and
//! written outside the pipeline and never notifies observers.

pub mod action;
pub mod dispatcher;
pub mod effect;
pub mod feature;
pub mod middleware;
pub mod observer;
pub mod reducer;
pub mod state;
pub mod store;
pub mod testing;

pub use action::{ReduxAction, Transition};
pub use dispatcher::Dispatcher;
pub use effect::{
    AsyncInternalStateThunkContext, AsyncThunkContext, AsyncTransitionThunkContext, BoxFuture,
    EffectAction, InternalStateThunkContext, ThunkContext, TransitionThunkContext,
};
pub use feature::Feature;
pub use middleware::{
    action_publisher::ActionPublisherMiddleware, hook::HookMiddleware,
    logging::LoggingMiddleware, thunk::ThunkMiddleware, DispatchPhase, Middleware,
    MiddlewareChain, MiddlewareRef,
};
pub use observer::SubscriptionId;
pub use reducer::Reducer;
pub use store::Store;
pub use testing::TestStore;
pub use uniflow_config::RuntimeConfig;
