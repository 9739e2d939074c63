//! Action envelope and transition metadata
//!
//! Everything passed to [`Store::send`](crate::Store::send) is a
//! [`ReduxAction`]: either a plain action for the reducer or an effect.

use crate::effect::EffectAction;
use crate::feature::Feature;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Tagged action envelope
pub enum ReduxAction<F: Feature> {
    /// Consumed by the reducer
    Plain(F::Action),
    /// Executed by the effect dispatcher, never seen by the reducer
    Effect(EffectAction<F>),
}

impl<F: Feature> ReduxAction<F> {
    pub fn plain(action: F::Action) -> Self {
        Self::Plain(action)
    }

    pub fn as_plain(&self) -> Option<&F::Action> {
        match self {
            Self::Plain(action) => Some(action),
            Self::Effect(_) => None,
        }
    }

    pub fn as_effect(&self) -> Option<&EffectAction<F>> {
        match self {
            Self::Plain(_) => None,
            Self::Effect(effect) => Some(effect),
        }
    }
}

impl<F: Feature> From<EffectAction<F>> for ReduxAction<F> {
    fn from(effect: EffectAction<F>) -> Self {
        Self::Effect(effect)
    }
}

impl<F: Feature> Clone for ReduxAction<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(action) => Self::Plain(action.clone()),
            Self::Effect(effect) => Self::Effect(effect.clone()),
        }
    }
}

impl<F: Feature> fmt::Debug for ReduxAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(action) => f.debug_tuple("Plain").field(action).finish(),
            Self::Effect(effect) => f.debug_tuple("Effect").field(effect).finish(),
        }
    }
}

/// Opaque metadata attached to a dispatch
///
/// The store never interprets it; it is handed unchanged to observers of
/// the resulting state change (e.g. a renderer picking an animation).
#[derive(Clone)]
pub struct Transition {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Transition {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transition").field(&self.type_name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Toggle {
        Flip,
    }

    struct Switch;

    impl Feature for Switch {
        type State = bool;
        type Action = Toggle;
        type Reducer = fn(bool, &Toggle) -> bool;
        type InternalState = ();

        fn initial_state() -> bool {
            false
        }

        fn create_reducer() -> Self::Reducer {
            |state, _| !state
        }
    }

    #[test]
    fn test_envelope_accessors() {
        let plain = ReduxAction::<Switch>::plain(Toggle::Flip);
        assert_eq!(plain.as_plain(), Some(&Toggle::Flip));
        assert!(plain.as_effect().is_none());

        let effect = ReduxAction::from(EffectAction::<Switch>::custom("noop"));
        assert!(effect.as_plain().is_none());
        assert!(matches!(effect.as_effect(), Some(EffectAction::Custom(_))));
        assert_eq!(format!("{:?}", effect), "Effect(Custom)");
    }

    #[derive(Debug, PartialEq)]
    enum Animation {
        EaseInOut { millis: u64 },
    }

    #[test]
    fn test_transition_downcast() {
        let transition = Transition::new(Animation::EaseInOut { millis: 250 });

        assert!(transition.is::<Animation>());
        assert_eq!(
            transition.downcast_ref::<Animation>(),
            Some(&Animation::EaseInOut { millis: 250 })
        );
        assert!(transition.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_transition_clone_shares_value() {
        let transition = Transition::new("spring");
        let cloned = transition.clone();
        assert_eq!(cloned.downcast_ref::<&str>(), Some(&"spring"));
        assert!(format!("{:?}", cloned).contains("str"));
    }
}
