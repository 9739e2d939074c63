use crate::action::ReduxAction;
use crate::effect;
use crate::feature::Feature;
use crate::middleware::Middleware;
use crate::store::Store;

/// ThunkMiddleware - executes effect actions
///
/// Features that send effects must include it in their chain; without it
/// effects pass through every node untouched and are dropped.
#[derive(Debug, Default)]
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<F: Feature> Middleware<F> for ThunkMiddleware {
    fn process(&self, store: &mut Store<F>, action: &ReduxAction<F>) {
        if let Some(effect) = action.as_effect() {
            effect::execute(store, effect);
        }
    }
}
