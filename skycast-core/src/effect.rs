//! Effect-aware state store
//!
//! Reducers return a [`DispatchResult`]: whether state changed plus a list of
//! effects. Effects describe work (an HTTP request, a debounce timer); the
//! runtime hands them to an effect handler which turns them into tasks.
//!
//! ```ignore
//! fn reducer(state: &mut State, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::SearchInput(text) => {
//!             state.query = text.clone();
//!             DispatchResult::changed_with(Effect::Debounce { query: text })
//!         }
//!         Action::Tick => DispatchResult::unchanged(),
//!     }
//! }
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::store::Middleware;

/// Result of dispatching an action to an effect-aware store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// State changed with several effects.
    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Merge another result into this one.
    ///
    /// `changed` is or-ed, effects are appended in order.
    pub fn merge(mut self, other: DispatchResult<E>) -> Self {
        self.changed |= other.changed;
        self.effects.extend(other.effects);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store whose reducer returns [`DispatchResult<E>`].
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state.
    ///
    /// Prefer dispatching actions; this is meant for initialization.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Dispatch an action to the store.
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// An effect store that calls middleware hooks around each dispatch.
///
/// The middleware sees the action and the change flag, not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a mutable reference to the state.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}
