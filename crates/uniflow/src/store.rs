use crate::action::{ReduxAction, Transition};
use crate::dispatcher::{Dispatcher, QueuedAction};
use crate::effect::{BoxFuture, EffectAction};
use crate::feature::Feature;
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareRef};
use crate::observer::{Observers, SubscriptionId};
use crate::reducer::Reducer;
use crate::state::{
    lock_internal, new_shared_state, publish_snapshot, SharedInternalState, SharedState,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Store - holds feature state and runs the dispatch loop
///
/// The store follows the Redux pattern:
/// - Centralized state, replaced as a whole by the reducer
/// - Every action passes the middleware chain before the reducer
/// - Effects run inside the chain and feed plain actions back in
///
/// Whoever owns the store (`&mut self`) is the single writer. Work running
/// elsewhere talks to it through a [`Dispatcher`]; queued actions are applied
/// by [`Store::process_pending`], [`Store::process_next`] or while awaiting
/// [`Store::send_async`].
///
/// # Example
/// ```rust,ignore
/// let mut store = Store::<Counter>::new();
/// store.dispatch(CounterAction::Increment);
/// assert_eq!(store.state().count, 1);
///
/// store.send_effect_async(fetch_number()).await;
/// ```
pub struct Store<F: Feature> {
    state: Arc<F::State>,
    /// Mirror of `state` readable from awaitable effect bodies
    snapshot: SharedState<F::State>,
    internal_state: SharedInternalState<F::InternalState>,
    reducer: F::Reducer,
    chain: MiddlewareChain<F>,
    observers: Observers<F::State>,
    queue_tx: mpsc::UnboundedSender<QueuedAction<F>>,
    queue_rx: mpsc::UnboundedReceiver<QueuedAction<F>>,
    /// Awaitable effect bodies started by the cycles currently on the stack
    in_flight: Vec<BoxFuture<'static, ()>>,
}

impl<F: Feature> Store<F> {
    /// Create a store from the feature's defaults
    pub fn new() -> Self {
        Self::with_middlewares(Vec::new())
    }

    /// Create a store from the feature's defaults followed by extra middleware
    pub fn with_middlewares(extra: Vec<MiddlewareRef<F>>) -> Self {
        let mut middlewares = F::middlewares();
        middlewares.extend(extra);
        Self::from_parts(
            F::initial_state(),
            F::create_reducer(),
            middlewares,
            F::create_internal_state(),
        )
    }

    /// Create a store with explicit wiring
    pub fn from_parts(
        initial_state: F::State,
        reducer: F::Reducer,
        middlewares: Vec<MiddlewareRef<F>>,
        internal_state: F::InternalState,
    ) -> Self {
        let state = Arc::new(initial_state);
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Self {
            snapshot: new_shared_state(Arc::clone(&state)),
            state,
            internal_state: Arc::new(Mutex::new(internal_state)),
            reducer,
            chain: MiddlewareChain::new(middlewares),
            observers: Observers::new(),
            queue_tx,
            queue_rx,
            in_flight: Vec::new(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> &F::State {
        &self.state
    }

    /// Lock the internal state for reading or writing
    ///
    /// Changes made through the guard are not observed by anyone.
    pub fn internal_state(&self) -> MutexGuard<'_, F::InternalState> {
        lock_internal(&self.internal_state)
    }

    pub fn with_internal_state<R>(
        &self,
        transform: impl FnOnce(&mut F::InternalState) -> R,
    ) -> R {
        transform(&mut self.internal_state())
    }

    pub fn set_internal_state(&self, internal_state: F::InternalState) {
        *self.internal_state() = internal_state;
    }

    /// Add middleware to the end of the chain
    ///
    /// Takes effect for the next dispatch; a dispatch already in progress
    /// keeps the chain it started with.
    pub fn add_middleware<M: Middleware<F> + 'static>(&mut self, middleware: M) {
        self.chain.append(Arc::new(middleware));
    }

    pub fn middleware_count(&self) -> usize {
        self.chain.len()
    }

    /// Get a dispatcher for work running off the owning context
    pub fn dispatcher(&self) -> Dispatcher<F> {
        Dispatcher::new(self.queue_tx.clone())
    }

    /// Call `observer` after every state change
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&F::State, Option<&Transition>) + Send + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns false if the subscription was already removed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Send a plain action through the middleware chain and reducer
    pub fn dispatch(&mut self, action: F::Action) {
        self.send_with(ReduxAction::Plain(action), None);
    }

    /// Like [`Store::dispatch`], handing `transition` to observers
    pub fn dispatch_with(&mut self, action: F::Action, transition: Option<Transition>) {
        self.send_with(ReduxAction::Plain(action), transition);
    }

    /// Send an effect through the middleware chain
    ///
    /// Sync effect bodies have finished when this returns. Awaitable bodies
    /// are spawned on the current tokio runtime and run detached.
    pub fn send_effect(&mut self, effect: EffectAction<F>) {
        self.send_with(ReduxAction::Effect(effect), None);
    }

    pub fn send(&mut self, action: ReduxAction<F>) {
        self.send_with(action, None);
    }

    /// Run one complete dispatch cycle
    pub fn send_with(&mut self, action: ReduxAction<F>, transition: Option<Transition>) {
        for running in self.run_cycle(action, transition) {
            spawn_detached(running);
        }
    }

    /// Awaitable form of [`Store::send_effect`]
    pub async fn send_effect_async(&mut self, effect: EffectAction<F>) {
        self.send_async_with(ReduxAction::Effect(effect), None).await;
    }

    pub async fn send_async(&mut self, action: ReduxAction<F>) {
        self.send_async_with(action, None).await;
    }

    /// Run one dispatch cycle and wait for the effect bodies it started
    ///
    /// While waiting, actions arriving on the queue are applied, so the
    /// bodies' own `dispatch(..).await` calls make progress. The queue and
    /// body completion are polled fairly, so a steady stream of queued
    /// actions does not starve the completion check. Resolves when every
    /// body has completed and the queue is drained.
    pub async fn send_async_with(
        &mut self,
        action: ReduxAction<F>,
        transition: Option<Transition>,
    ) {
        let started = self.run_cycle(action, transition);
        if started.is_empty() {
            return;
        }

        let mut running = JoinSet::new();
        for effect in started {
            running.spawn(effect);
        }

        loop {
            tokio::select! {
                Some(queued) = self.queue_rx.recv() => self.apply_queued(queued),
                joined = running.join_next() => match joined {
                    Some(Ok(())) => {}
                    Some(Err(e)) => log::error!("Effect task failed: {}", e),
                    None => break,
                },
            }
        }

        self.process_pending();
    }

    /// Apply every queued action without waiting
    ///
    /// Returns the number of actions applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(queued) = self.queue_rx.try_recv() {
            self.apply_queued(queued);
            applied += 1;
        }
        applied
    }

    /// Wait for the next queued action and apply it
    pub async fn process_next(&mut self) {
        // The store holds a sender itself, so the queue never closes
        if let Some(queued) = self.queue_rx.recv().await {
            self.apply_queued(queued);
        }
    }

    /// Replace state with the reducer's result and notify observers
    ///
    /// Only called by the chain, once per plain dispatch.
    pub(crate) fn reduce(&mut self, action: &F::Action, transition: Option<&Transition>) {
        let next = self.reducer.reduce(F::State::clone(&self.state), action);
        self.state = Arc::new(next);
        publish_snapshot(&self.snapshot, Arc::clone(&self.state));
        self.observers.notify(&self.state, transition);
    }

    pub(crate) fn register_effect(&mut self, running: BoxFuture<'static, ()>) {
        self.in_flight.push(running);
    }

    pub(crate) fn shared_state(&self) -> SharedState<F::State> {
        Arc::clone(&self.snapshot)
    }

    pub(crate) fn shared_internal_state(&self) -> SharedInternalState<F::InternalState> {
        Arc::clone(&self.internal_state)
    }

    /// Returns the awaitable effect bodies this cycle started
    fn run_cycle(
        &mut self,
        action: ReduxAction<F>,
        transition: Option<Transition>,
    ) -> Vec<BoxFuture<'static, ()>> {
        let mark = self.in_flight.len();
        let chain = self.chain.clone();
        chain.process(self, &action, transition);
        self.in_flight.split_off(mark)
    }

    fn apply_queued(&mut self, queued: QueuedAction<F>) {
        let QueuedAction {
            action,
            transition,
            applied,
        } = queued;
        self.dispatch_with(action, transition);
        if let Some(applied) = applied {
            // The waiting effect may have been dropped
            let _ = applied.send(());
        }
    }
}

impl<F: Feature> Default for Store<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_detached(running: BoxFuture<'static, ()>) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(running);
        }
        Err(_) => log::warn!("No tokio runtime available, dropping awaitable effect"),
    }
}
