//! Runtime for the skycast terminal UI
//!
//! A small Redux/Elm-style architecture:
//!
//! - **Action**: describes something that happened (a keystroke, a finished request)
//! - **Reducer**: `fn(&mut S, A) -> DispatchResult<E>`, the only place state changes
//! - **Effect**: declarative side effect returned by the reducer
//! - **TaskManager**: runs effects as keyed async tasks that send actions back
//! - **Component**: renders from props and maps events to actions
//!
//! # Async handler pattern
//!
//! Intent actions trigger work, result actions carry the outcome back:
//!
//! ```ignore
//! fn reducer(state: &mut State, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::WeatherLoad(query) => {
//!             state.is_loading = true;
//!             DispatchResult::changed_with(Effect::FetchWeather { query })
//!         }
//!         Action::WeatherDidLoad(report) => {
//!             state.is_loading = false;
//!             state.weather = Some(report);
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//!
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::FetchWeather { query } => {
//!             ctx.tasks().spawn("weather", async move {
//!                 match fetch(&query).await {
//!                     Ok(report) => Action::WeatherDidLoad(report),
//!                     Err(e) => Action::WeatherDidError(e.to_string()),
//!                 }
//!             });
//!         }
//!     }
//! }
//! ```
//!
//! The `Did*` naming convention marks result actions.

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod poller;
pub mod runtime;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use event::EventKind;
pub use poller::{process_raw_event, spawn_event_poller, RawEvent};
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome};
pub use store::{LoggingMiddleware, Middleware};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};
