//! Reducers - pure functions that produce new state from current state + action
//!
//! A reducer must be deterministic and side-effect free. It never sees effect
//! actions and has no access to internal state.

/// Pure state transition for one feature
///
/// Free functions and closures with the signature `Fn(S, &A) -> S` are
/// reducers, so most features simply use `fn(State, &Action) -> State`.
pub trait Reducer<S, A> {
    fn reduce(&self, state: S, action: &A) -> S;
}

impl<S, A, Func> Reducer<S, A> for Func
where
    Func: Fn(S, &A) -> S,
{
    fn reduce(&self, state: S, action: &A) -> S {
        self(state, action)
    }
}
