use crate::action::ReduxAction;
use crate::feature::Feature;
use crate::middleware::Middleware;
use crate::store::Store;
use log::Level;
use uniflow_config::RuntimeConfig;

/// LoggingMiddleware - logs every envelope and, optionally, the resulting state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingMiddleware {
    level: Level,
    log_actions: bool,
    log_state: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }

    /// Configure from `.uniflow.toml`, see [`RuntimeConfig::load`]
    pub fn from_runtime_config() -> Self {
        Self::from_config(&RuntimeConfig::load())
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            level: config.level(),
            log_actions: config.log_actions,
            log_state: config.log_state,
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Feature> Middleware<F> for LoggingMiddleware {
    fn before_process(&self, action: &ReduxAction<F>, _state: &F::State) {
        if !self.log_actions {
            return;
        }
        match action {
            ReduxAction::Plain(action) => {
                log::log!(self.level, "Dispatching plain action: {:?}", action)
            }
            ReduxAction::Effect(effect) => {
                log::log!(self.level, "Dispatching effect action: {:?}", effect)
            }
        }
    }

    fn process(&self, _store: &mut Store<F>, _action: &ReduxAction<F>) {}

    fn after_process(&self, _action: &ReduxAction<F>, state: &F::State) {
        if self.log_state {
            log::log!(self.level, "State after action: {:?}", state);
        }
    }
}
