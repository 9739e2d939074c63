use crate::action::ReduxAction;
use crate::feature::Feature;
use crate::middleware::Middleware;
use crate::store::Store;
use tokio::sync::broadcast;
use uniflow_config::RuntimeConfig;

/// ActionPublisherMiddleware - republishes every plain action
///
/// Lets code outside the store react to actions (e.g. a view triggering
/// navigation on `Increment`) without being a middleware itself. Receivers
/// that fall more than `capacity` actions behind observe a `Lagged` error.
pub struct ActionPublisherMiddleware<F: Feature> {
    sender: broadcast::Sender<F::Action>,
}

impl<F: Feature> ActionPublisherMiddleware<F> {
    pub fn new() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }

    /// Configure from `.uniflow.toml`, see [`RuntimeConfig::load`]
    pub fn from_runtime_config() -> Self {
        Self::from_config(&RuntimeConfig::load())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::with_capacity(config.publisher_capacity)
    }

    /// Receive every plain action dispatched after this call
    pub fn subscribe(&self) -> broadcast::Receiver<F::Action> {
        self.sender.subscribe()
    }
}

impl<F: Feature> Default for ActionPublisherMiddleware<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Feature> Middleware<F> for ActionPublisherMiddleware<F> {
    fn process(&self, _store: &mut Store<F>, action: &ReduxAction<F>) {
        if let Some(action) = action.as_plain() {
            // Err only means nobody is listening
            if self.sender.send(action.clone()).is_err() {
                log::trace!("No subscribers for published action {:?}", action);
            }
        }
    }
}
