//! End-to-end dispatch scenarios

use std::sync::{Arc, Mutex};
use std::time::Duration;
use uniflow::{
    ActionPublisherMiddleware, EffectAction, Feature, HookMiddleware, LoggingMiddleware,
    MiddlewareRef, ReduxAction, RuntimeConfig, Store, TestStore, ThunkMiddleware, Transition,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Collects every state the store publishes
fn record_states<F: Feature>(store: &mut Store<F>) -> Arc<Mutex<Vec<F::State>>> {
    let states = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&states);
    store.subscribe(move |state, _| recorder.lock().unwrap().push(state.clone()));
    states
}

// Counter

#[derive(Debug, Clone, Default, PartialEq)]
struct CounterState {
    count: i32,
}

#[derive(Debug, Clone, PartialEq)]
enum CounterAction {
    Increment,
    Decrement,
}

fn reduce_counter(mut state: CounterState, action: &CounterAction) -> CounterState {
    match action {
        CounterAction::Increment => state.count += 1,
        CounterAction::Decrement => state.count -= 1,
    }
    state
}

struct BasicCounter;

impl Feature for BasicCounter {
    type State = CounterState;
    type Action = CounterAction;
    type Reducer = fn(CounterState, &CounterAction) -> CounterState;
    type InternalState = ();

    fn initial_state() -> CounterState {
        CounterState::default()
    }

    fn create_reducer() -> Self::Reducer {
        reduce_counter
    }

    fn middlewares() -> Vec<MiddlewareRef<Self>> {
        vec![Arc::new(LoggingMiddleware::new())]
    }
}

#[test]
fn test_counter_scenario() {
    init_logger();
    let mut store = Store::<BasicCounter>::new();

    store.dispatch(CounterAction::Increment);
    assert_eq!(*store.state(), CounterState { count: 1 });

    store.dispatch(CounterAction::Decrement);
    store.dispatch(CounterAction::Decrement);
    assert_eq!(*store.state(), CounterState { count: -1 });
}

#[test]
fn test_sequential_dispatch_matches_fold() {
    let actions = [
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Decrement,
        CounterAction::Increment,
    ];
    let mut store = Store::<BasicCounter>::new();
    for action in &actions {
        store.dispatch(action.clone());
    }

    let folded = actions
        .iter()
        .fold(BasicCounter::initial_state(), reduce_counter);
    assert_eq!(*store.state(), folded);
}

#[test]
fn test_hooks_see_state_around_the_reducer() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let before = Arc::clone(&seen);
    let after = Arc::clone(&seen);
    let hooks = HookMiddleware::<BasicCounter>::new()
        .before_send(move |_, state| before.lock().unwrap().push(("before", state.count)))
        .after_send(move |_, state| after.lock().unwrap().push(("after", state.count)));

    let mut store = Store::<BasicCounter>::with_middlewares(vec![Arc::new(hooks)]);
    store.dispatch(CounterAction::Increment);
    store.dispatch(CounterAction::Increment);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![("before", 0), ("after", 1), ("before", 1), ("after", 2)]
    );
}

#[test]
fn test_effects_without_thunk_middleware_are_ignored() {
    let mut store = Store::<BasicCounter>::new();
    let states = record_states(&mut store);

    let increment = EffectAction::<BasicCounter>::thunk(|ctx| {
        ctx.dispatch(CounterAction::Increment);
    });
    store.send_effect(increment);

    assert_eq!(store.state().count, 0);
    assert!(states.lock().unwrap().is_empty());
}

#[test]
fn test_transition_reaches_observers() {
    let mut store = Store::<BasicCounter>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    store.subscribe(move |state, transition| {
        let millis = transition.and_then(|t| t.downcast_ref::<Duration>().copied());
        recorder.lock().unwrap().push((state.count, millis));
    });

    store.dispatch_with(
        CounterAction::Increment,
        Some(Transition::new(Duration::from_millis(350))),
    );
    store.dispatch(CounterAction::Increment);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(1, Some(Duration::from_millis(350))), (2, None)]
    );
}

#[tokio::test]
async fn test_action_publisher() {
    let config = RuntimeConfig {
        publisher_capacity: 4,
        ..RuntimeConfig::default()
    };
    let publisher = Arc::new(ActionPublisherMiddleware::<BasicCounter>::from_config(&config));
    let mut actions = publisher.subscribe();

    let mut store = Store::<BasicCounter>::new();
    store.add_middleware(Arc::clone(&publisher));

    store.dispatch(CounterAction::Increment);
    store.dispatch(CounterAction::Decrement);

    assert_eq!(actions.recv().await.unwrap(), CounterAction::Increment);
    assert_eq!(actions.recv().await.unwrap(), CounterAction::Decrement);
}

#[test]
fn test_test_store_counter() {
    let mut store = TestStore::<BasicCounter>::new();
    store.send(CounterAction::Increment, |state| state.count == 1);
    store.send(CounterAction::Decrement, |state| state.count == 0);
    store.verify_actions(&[CounterAction::Increment, CounterAction::Decrement]);
}

// Async effect

#[derive(Debug, Clone, Default, PartialEq)]
struct EffectState {
    is_loading: bool,
    random_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
enum EffectCounterAction {
    StartLoading,
    EndLoading,
    SetNumber(u32),
}

fn reduce_effect(mut state: EffectState, action: &EffectCounterAction) -> EffectState {
    match action {
        EffectCounterAction::StartLoading => state.is_loading = true,
        EffectCounterAction::EndLoading => state.is_loading = false,
        EffectCounterAction::SetNumber(number) => state.random_number = *number,
    }
    state
}

struct EffectCounter;

impl Feature for EffectCounter {
    type State = EffectState;
    type Action = EffectCounterAction;
    type Reducer = fn(EffectState, &EffectCounterAction) -> EffectState;
    type InternalState = ();

    fn initial_state() -> EffectState {
        EffectState::default()
    }

    fn create_reducer() -> Self::Reducer {
        reduce_effect
    }

    fn middlewares() -> Vec<MiddlewareRef<Self>> {
        vec![
            Arc::new(ThunkMiddleware::new()),
            Arc::new(LoggingMiddleware::new()),
        ]
    }
}

const LOADING_DELAY: Duration = Duration::from_secs(2);

fn expected_loading_sequence() -> Vec<EffectState> {
    vec![
        EffectState {
            is_loading: true,
            random_number: 0,
        },
        EffectState {
            is_loading: true,
            random_number: 42,
        },
        EffectState {
            is_loading: false,
            random_number: 42,
        },
    ]
}

/// Sync thunk that schedules its delayed work and returns immediately
fn fetch_number_in_background() -> EffectAction<EffectCounter> {
    EffectAction::<EffectCounter>::thunk(|ctx| {
        let dispatcher = ctx.dispatcher();
        tokio::spawn(async move {
            dispatcher.dispatch(EffectCounterAction::StartLoading);
            tokio::time::sleep(LOADING_DELAY).await;
            dispatcher.dispatch(EffectCounterAction::SetNumber(42));
            dispatcher.dispatch(EffectCounterAction::EndLoading);
        });
    })
}

fn fetch_number() -> EffectAction<EffectCounter> {
    EffectAction::<EffectCounter>::async_thunk(|ctx| async move {
        ctx.dispatch(EffectCounterAction::StartLoading).await;
        tokio::time::sleep(LOADING_DELAY).await;
        ctx.dispatch(EffectCounterAction::SetNumber(42)).await;
        ctx.dispatch(EffectCounterAction::EndLoading).await;
    })
}

#[tokio::test(start_paused = true)]
async fn test_background_thunk_scenario() {
    init_logger();
    let mut store = Store::<EffectCounter>::new();
    let states = record_states(&mut store);

    store.send_effect(fetch_number_in_background());
    assert_eq!(*store.state(), EffectState::default());

    for _ in 0..3 {
        store.process_next().await;
    }

    assert_eq!(*states.lock().unwrap(), expected_loading_sequence());
}

#[tokio::test(start_paused = true)]
async fn test_awaitable_effect_scenario() {
    init_logger();
    let mut store = Store::<EffectCounter>::new();
    let states = record_states(&mut store);

    store.send_effect_async(fetch_number()).await;

    assert_eq!(*states.lock().unwrap(), expected_loading_sequence());
    assert_eq!(store.process_pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_async_effect_reads_state_at_call_time() {
    let mut store = Store::<EffectCounter>::new();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&observed);

    store
        .send_effect_async(EffectAction::<EffectCounter>::async_thunk(move |ctx| {
            let recorder = Arc::clone(&recorder);
            async move {
                recorder.lock().unwrap().push(ctx.state().random_number);
                ctx.dispatch(EffectCounterAction::SetNumber(7)).await;
                recorder.lock().unwrap().push(ctx.state().random_number);
            }
        }))
        .await;

    assert_eq!(*observed.lock().unwrap(), vec![0, 7]);
}

#[tokio::test(start_paused = true)]
async fn test_plain_order_is_send_order_with_effects_in_flight() {
    let mut store = Store::<EffectCounter>::new();
    let states = record_states(&mut store);

    store.send_effect(fetch_number_in_background());
    store.dispatch(EffectCounterAction::SetNumber(1));
    store.send(ReduxAction::plain(EffectCounterAction::SetNumber(2)));

    assert_eq!(store.state().random_number, 2);
    for _ in 0..3 {
        store.process_next().await;
    }

    let numbers: Vec<u32> = states
        .lock()
        .unwrap()
        .iter()
        .map(|state| state.random_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 2, 42, 42]);
}

// Internal state

#[derive(Debug, Clone, Default, PartialEq)]
struct MixedState {
    published_count: i32,
}

#[derive(Debug, Clone, PartialEq)]
struct MixedInternalState {
    counter: i32,
    max_count: i32,
}

impl Default for MixedInternalState {
    fn default() -> Self {
        Self {
            counter: 0,
            max_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MixedAction {
    IncrementPublished,
    Reset,
}

fn reduce_mixed(mut state: MixedState, action: &MixedAction) -> MixedState {
    match action {
        MixedAction::IncrementPublished => state.published_count += 1,
        MixedAction::Reset => state.published_count = 0,
    }
    state
}

struct MixedStateFeature;

impl Feature for MixedStateFeature {
    type State = MixedState;
    type Action = MixedAction;
    type Reducer = fn(MixedState, &MixedAction) -> MixedState;
    type InternalState = MixedInternalState;

    fn initial_state() -> MixedState {
        MixedState::default()
    }

    fn create_reducer() -> Self::Reducer {
        reduce_mixed
    }

    fn middlewares() -> Vec<MiddlewareRef<Self>> {
        vec![Arc::new(ThunkMiddleware::new())]
    }
}

fn add_count_less_than_max() -> EffectAction<MixedStateFeature> {
    EffectAction::<MixedStateFeature>::thunk_with_internal_state(|ctx| {
        let max_count = ctx.internal_state().max_count;
        if ctx.state().published_count < max_count {
            ctx.dispatch(MixedAction::IncrementPublished);
        } else {
            log::info!("Cannot increment, published count is already at max count");
        }
    })
}

#[test]
fn test_internal_state_bypasses_observers() {
    let mut store = Store::<MixedStateFeature>::new();
    let states = record_states(&mut store);

    for _ in 0..5 {
        store.internal_state().counter += 1;
    }

    assert_eq!(store.internal_state().counter, 5);
    assert_eq!(*store.state(), MixedState::default());
    assert!(states.lock().unwrap().is_empty());
}

#[test]
fn test_internal_state_caps_published_count() {
    let mut store = Store::<MixedStateFeature>::new();
    store.with_internal_state(|internal| internal.max_count = 2);

    for _ in 0..4 {
        store.send_effect(add_count_less_than_max());
    }
    assert_eq!(store.state().published_count, 2);

    store.dispatch(MixedAction::Reset);
    store.set_internal_state(MixedInternalState::default());
    assert_eq!(store.state().published_count, 0);
    assert_eq!(store.internal_state().max_count, 5);
}

#[test]
fn test_unrecognized_effect_leaves_everything_unchanged() {
    let mut store = Store::<MixedStateFeature>::new();
    let states = record_states(&mut store);

    store.send_effect(EffectAction::custom(String::from("not a thunk")));

    assert_eq!(*store.state(), MixedState::default());
    assert_eq!(*store.internal_state(), MixedInternalState::default());
    assert!(states.lock().unwrap().is_empty());
}
