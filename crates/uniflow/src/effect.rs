//! Effect actions
//!
//! An effect encapsulates deferred or asynchronous work. It is never seen by
//! the reducer: the only way an effect changes published state is by
//! dispatching plain actions back into the store.
//!
//! The variants form a closed set:
//!
//! | variant                  | form      | capabilities                                  |
//! |--------------------------|-----------|-----------------------------------------------|
//! | `Thunk`                  | sync      | dispatch, state                               |
//! | `ThunkWithTransition`    | sync      | dispatch with transition, state               |
//! | `ThunkWithInternalState` | sync      | dispatch, state, internal state get/set       |
//! | `Async`                  | awaitable | dispatch, state                               |
//! | `AsyncWithTransition`    | awaitable | dispatch with transition, state               |
//! | `AsyncWithInternalState` | awaitable | dispatch, state, internal state get/set       |
//! | `Custom`                 | -         | opaque payload for user middleware            |
//!
//! Sync bodies run to completion inside the middleware chain and borrow the
//! store; their `dispatch` re-enters [`Store::dispatch`] immediately. Work they
//! schedule elsewhere must go through [`ThunkContext::dispatcher`].
//!
//! Awaitable bodies get `'static` contexts built on the store's [`Dispatcher`];
//! their `dispatch(..).await` resolves once the store has applied the action.
//!
//! Name the feature when building an effect, so the context type is known
//! while the closure body is checked:
//!
//! ```rust,ignore
//! let load = EffectAction::<Counter>::async_thunk(|ctx| async move {
//!     ctx.dispatch(CounterAction::StartLoading).await;
//!     let current = ctx.state().count;
//!     ctx.dispatch(CounterAction::Set(current + 1)).await;
//! });
//! store.send_effect_async(load).await;
//! ```

use crate::action::Transition;
use crate::dispatcher::Dispatcher;
use crate::feature::Feature;
use crate::state::{lock_internal, read_snapshot, SharedInternalState, SharedState};
use crate::store::Store;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// BoxFuture type alias for awaitable effect bodies
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type AsyncThunkFn<C> = Arc<dyn Fn(C) -> BoxFuture<'static, ()> + Send + Sync>;

/// Closed set of effect variants
pub enum EffectAction<F: Feature> {
    Thunk(Arc<dyn for<'a> Fn(&mut ThunkContext<'a, F>) + Send + Sync>),
    ThunkWithTransition(
        Arc<dyn for<'a> Fn(&mut TransitionThunkContext<'a, F>) + Send + Sync>,
    ),
    ThunkWithInternalState(
        Arc<dyn for<'a> Fn(&mut InternalStateThunkContext<'a, F>) + Send + Sync>,
    ),
    Async(AsyncThunkFn<AsyncThunkContext<F>>),
    AsyncWithTransition(AsyncThunkFn<AsyncTransitionThunkContext<F>>),
    AsyncWithInternalState(AsyncThunkFn<AsyncInternalStateThunkContext<F>>),
    /// Not recognized by the built-in effect dispatcher
    Custom(Arc<dyn Any + Send + Sync>),
}

impl<F: Feature> EffectAction<F> {
    pub fn thunk(body: impl Fn(&mut ThunkContext<'_, F>) + Send + Sync + 'static) -> Self {
        Self::Thunk(Arc::new(body))
    }

    pub fn thunk_with_transition(
        body: impl Fn(&mut TransitionThunkContext<'_, F>) + Send + Sync + 'static,
    ) -> Self {
        Self::ThunkWithTransition(Arc::new(body))
    }

    pub fn thunk_with_internal_state(
        body: impl Fn(&mut InternalStateThunkContext<'_, F>) + Send + Sync + 'static,
    ) -> Self {
        Self::ThunkWithInternalState(Arc::new(body))
    }

    pub fn async_thunk<Fut>(
        body: impl Fn(AsyncThunkContext<F>) -> Fut + Send + Sync + 'static,
    ) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::Async(Arc::new(move |ctx| Box::pin(body(ctx))))
    }

    pub fn async_thunk_with_transition<Fut>(
        body: impl Fn(AsyncTransitionThunkContext<F>) -> Fut + Send + Sync + 'static,
    ) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::AsyncWithTransition(Arc::new(move |ctx| Box::pin(body(ctx))))
    }

    pub fn async_thunk_with_internal_state<Fut>(
        body: impl Fn(AsyncInternalStateThunkContext<F>) -> Fut + Send + Sync + 'static,
    ) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::AsyncWithInternalState(Arc::new(move |ctx| Box::pin(body(ctx))))
    }

    /// Wrap a payload for a user-defined middleware to downcast
    pub fn custom<T: Any + Send + Sync>(payload: T) -> Self {
        Self::Custom(Arc::new(payload))
    }

    pub fn is_awaitable(&self) -> bool {
        matches!(
            self,
            Self::Async(_) | Self::AsyncWithTransition(_) | Self::AsyncWithInternalState(_)
        )
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Thunk(_) => "Thunk",
            Self::ThunkWithTransition(_) => "ThunkWithTransition",
            Self::ThunkWithInternalState(_) => "ThunkWithInternalState",
            Self::Async(_) => "Async",
            Self::AsyncWithTransition(_) => "AsyncWithTransition",
            Self::AsyncWithInternalState(_) => "AsyncWithInternalState",
            Self::Custom(_) => "Custom",
        }
    }
}

impl<F: Feature> Clone for EffectAction<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Thunk(body) => Self::Thunk(Arc::clone(body)),
            Self::ThunkWithTransition(body) => Self::ThunkWithTransition(Arc::clone(body)),
            Self::ThunkWithInternalState(body) => Self::ThunkWithInternalState(Arc::clone(body)),
            Self::Async(body) => Self::Async(Arc::clone(body)),
            Self::AsyncWithTransition(body) => Self::AsyncWithTransition(Arc::clone(body)),
            Self::AsyncWithInternalState(body) => Self::AsyncWithInternalState(Arc::clone(body)),
            Self::Custom(payload) => Self::Custom(Arc::clone(payload)),
        }
    }
}

impl<F: Feature> fmt::Debug for EffectAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Run an effect with the capability set matching its variant
///
/// Sync bodies run to completion before this returns. Awaitable bodies are
/// registered on the store for the current dispatch cycle; the store either
/// drives them (`send_async`) or spawns them detached (`send`).
pub fn execute<F: Feature>(store: &mut Store<F>, effect: &EffectAction<F>) {
    match effect {
        EffectAction::Thunk(body) => body(&mut ThunkContext { store }),
        EffectAction::ThunkWithTransition(body) => body(&mut TransitionThunkContext { store }),
        EffectAction::ThunkWithInternalState(body) => {
            body(&mut InternalStateThunkContext { store })
        }
        EffectAction::Async(body) => {
            let running = body(AsyncThunkContext {
                dispatcher: store.dispatcher(),
                state: store.shared_state(),
            });
            store.register_effect(running);
        }
        EffectAction::AsyncWithTransition(body) => {
            let running = body(AsyncTransitionThunkContext {
                dispatcher: store.dispatcher(),
                state: store.shared_state(),
            });
            store.register_effect(running);
        }
        EffectAction::AsyncWithInternalState(body) => {
            let running = body(AsyncInternalStateThunkContext {
                dispatcher: store.dispatcher(),
                state: store.shared_state(),
                internal: store.shared_internal_state(),
            });
            store.register_effect(running);
        }
        EffectAction::Custom(_) => {
            log::debug!("Ignoring unrecognized effect action {:?}", effect);
        }
    }
}

/// Capabilities of a [`EffectAction::Thunk`] body
pub struct ThunkContext<'a, F: Feature> {
    store: &'a mut Store<F>,
}

impl<F: Feature> ThunkContext<'_, F> {
    /// Run a full dispatch cycle for a plain action right now
    pub fn dispatch(&mut self, action: F::Action) {
        self.store.dispatch(action);
    }

    /// State as of this call
    pub fn state(&self) -> &F::State {
        self.store.state()
    }

    /// Handle for work scheduled off the owning context
    pub fn dispatcher(&self) -> Dispatcher<F> {
        self.store.dispatcher()
    }
}

/// Capabilities of a [`EffectAction::ThunkWithTransition`] body
pub struct TransitionThunkContext<'a, F: Feature> {
    store: &'a mut Store<F>,
}

impl<F: Feature> TransitionThunkContext<'_, F> {
    pub fn dispatch(&mut self, action: F::Action, transition: Option<Transition>) {
        self.store.dispatch_with(action, transition);
    }

    pub fn state(&self) -> &F::State {
        self.store.state()
    }

    pub fn dispatcher(&self) -> Dispatcher<F> {
        self.store.dispatcher()
    }
}

/// Capabilities of a [`EffectAction::ThunkWithInternalState`] body
pub struct InternalStateThunkContext<'a, F: Feature> {
    store: &'a mut Store<F>,
}

impl<F: Feature> InternalStateThunkContext<'_, F> {
    pub fn dispatch(&mut self, action: F::Action) {
        self.store.dispatch(action);
    }

    pub fn state(&self) -> &F::State {
        self.store.state()
    }

    /// Copy of the internal state as of this call
    pub fn internal_state(&self) -> F::InternalState {
        (*self.store.internal_state()).clone()
    }

    pub fn set_internal_state(&mut self, internal_state: F::InternalState) {
        self.store.set_internal_state(internal_state);
    }

    pub fn dispatcher(&self) -> Dispatcher<F> {
        self.store.dispatcher()
    }
}

/// Capabilities of an [`EffectAction::Async`] body
pub struct AsyncThunkContext<F: Feature> {
    dispatcher: Dispatcher<F>,
    state: SharedState<F::State>,
}

impl<F: Feature> AsyncThunkContext<F> {
    /// Dispatch a plain action and wait until the store has applied it
    pub async fn dispatch(&self, action: F::Action) {
        self.dispatcher.dispatch_and_wait(action, None).await;
    }

    /// Latest published state
    pub fn state(&self) -> Arc<F::State> {
        read_snapshot(&self.state)
    }

    pub fn dispatcher(&self) -> Dispatcher<F> {
        self.dispatcher.clone()
    }
}

/// Capabilities of an [`EffectAction::AsyncWithTransition`] body
pub struct AsyncTransitionThunkContext<F: Feature> {
    dispatcher: Dispatcher<F>,
    state: SharedState<F::State>,
}

impl<F: Feature> AsyncTransitionThunkContext<F> {
    pub async fn dispatch(&self, action: F::Action, transition: Option<Transition>) {
        self.dispatcher.dispatch_and_wait(action, transition).await;
    }

    pub fn state(&self) -> Arc<F::State> {
        read_snapshot(&self.state)
    }

    pub fn dispatcher(&self) -> Dispatcher<F> {
        self.dispatcher.clone()
    }
}

/// Capabilities of an [`EffectAction::AsyncWithInternalState`] body
///
/// Internal state is shared with the store without any ordering guarantee
/// relative to dispatched actions.
pub struct AsyncInternalStateThunkContext<F: Feature> {
    dispatcher: Dispatcher<F>,
    state: SharedState<F::State>,
    internal: SharedInternalState<F::InternalState>,
}

impl<F: Feature> AsyncInternalStateThunkContext<F> {
    pub async fn dispatch(&self, action: F::Action) {
        self.dispatcher.dispatch_and_wait(action, None).await;
    }

    pub fn state(&self) -> Arc<F::State> {
        read_snapshot(&self.state)
    }

    pub fn internal_state(&self) -> F::InternalState {
        (*lock_internal(&self.internal)).clone()
    }

    pub fn set_internal_state(&self, internal_state: F::InternalState) {
        *lock_internal(&self.internal) = internal_state;
    }

    pub fn dispatcher(&self) -> Dispatcher<F> {
        self.dispatcher.clone()
    }
}
