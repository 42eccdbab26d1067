//! Terminal weather with live location search
//!
//! Library half of the `skycast` binary. The search state machine
//! ([`search::LocationSearch`]) and the condition classifier ([`theme`]) are
//! plain data; everything async sits behind [`effect::Services`].

pub mod action;
pub mod components;
pub mod config;
pub mod effect;
pub mod geolocation;
pub mod provider;
pub mod reducer;
pub mod search;
pub mod state;
pub mod theme;

pub use action::Action;
pub use components::WeatherDisplay;
pub use effect::{Effect, Services};
pub use reducer::reducer;
pub use state::AppState;
