use crate::action::ReduxAction;
use crate::feature::Feature;
use crate::middleware::Middleware;
use crate::store::Store;

pub type Hook<F> = Box<dyn Fn(&ReduxAction<F>, &<F as Feature>::State) + Send + Sync>;

/// HookMiddleware - runs user callbacks around every dispatch
///
/// Before-send hooks see the state prior to the reducer, after-send hooks the
/// state after it. Hooks of each kind run in the order they were added.
pub struct HookMiddleware<F: Feature> {
    before_send_hooks: Vec<Hook<F>>,
    after_send_hooks: Vec<Hook<F>>,
}

impl<F: Feature> HookMiddleware<F> {
    pub fn new() -> Self {
        Self {
            before_send_hooks: Vec::new(),
            after_send_hooks: Vec::new(),
        }
    }

    pub fn add_before_send_hook(
        &mut self,
        hook: impl Fn(&ReduxAction<F>, &F::State) + Send + Sync + 'static,
    ) {
        self.before_send_hooks.push(Box::new(hook));
    }

    pub fn add_after_send_hook(
        &mut self,
        hook: impl Fn(&ReduxAction<F>, &F::State) + Send + Sync + 'static,
    ) {
        self.after_send_hooks.push(Box::new(hook));
    }

    /// Builder form of [`HookMiddleware::add_before_send_hook`]
    pub fn before_send(
        mut self,
        hook: impl Fn(&ReduxAction<F>, &F::State) + Send + Sync + 'static,
    ) -> Self {
        self.add_before_send_hook(hook);
        self
    }

    /// Builder form of [`HookMiddleware::add_after_send_hook`]
    pub fn after_send(
        mut self,
        hook: impl Fn(&ReduxAction<F>, &F::State) + Send + Sync + 'static,
    ) -> Self {
        self.add_after_send_hook(hook);
        self
    }
}

impl<F: Feature> Default for HookMiddleware<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Feature> Middleware<F> for HookMiddleware<F> {
    fn before_process(&self, action: &ReduxAction<F>, state: &F::State) {
        self.before_send_hooks
            .iter()
            .for_each(|hook| hook(action, state));
    }

    fn process(&self, _store: &mut Store<F>, _action: &ReduxAction<F>) {}

    fn after_process(&self, action: &ReduxAction<F>, state: &F::State) {
        self.after_send_hooks
            .iter()
            .for_each(|hook| hook(action, state));
    }
}
