//! Reducer: `(state, action) -> DispatchResult<Effect>`
//!
//! All state changes happen here. I/O is requested through effects.

use skycast_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::search::{KeyOutcome, SearchEvent};
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search =====
        Action::SearchFocus => {
            if state.search_focused {
                return DispatchResult::unchanged();
            }
            state.search_focused = true;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            let was_open = state.search.is_visible();
            state.search.blur();
            if !state.search_focused && !was_open {
                return DispatchResult::effect(Effect::CancelSuggestions);
            }
            state.search_focused = false;
            DispatchResult::changed_with(Effect::CancelSuggestions)
        }

        Action::SearchInput(text) => {
            let command = state.search.set_text(text);
            DispatchResult::changed_with(command.into())
        }

        Action::SearchKey(key) => match state.search.handle_key(key) {
            KeyOutcome::Ignored => DispatchResult::unchanged(),
            KeyOutcome::Moved => DispatchResult::changed(),
            KeyOutcome::Dismissed => {
                state.search_focused = false;
                DispatchResult::changed_with(Effect::CancelSuggestions)
            }
            KeyOutcome::Event(event) => search_event(state, event),
        },

        Action::SearchSelect(index) => match state.search.commit_suggestion(index) {
            Some(event) => search_event(state, event),
            None => DispatchResult::unchanged(),
        },

        Action::SearchDebounceDidFire(query) => match state.search.begin_fetch(&query) {
            Some(seq) => DispatchResult::changed_with(Effect::FetchSuggestions { seq, query }),
            None => DispatchResult::unchanged(),
        },

        Action::SearchDidLoad { seq, suggestions } => {
            applied(state.search.apply_results(seq, Ok(suggestions)))
        }

        Action::SearchDidError { seq, error } => applied(state.search.apply_results(seq, Err(error))),

        // ===== Location =====
        Action::LocationRequest => {
            let event = state.search.request_current_location();
            search_event(state, event)
        }

        Action::LocationDidResolve(coords) => {
            // A search committed meanwhile wins
            if !state.is_locating {
                return DispatchResult::unchanged();
            }
            state.is_locating = false;
            load_weather(state, coords.as_query())
        }

        Action::LocationDidError(error) => {
            if !state.is_locating {
                return DispatchResult::unchanged();
            }
            state.is_locating = false;
            state.error = Some(error.user_message());
            DispatchResult::changed()
        }

        // ===== Weather =====
        Action::WeatherLoad(query) => {
            state.is_locating = false;
            load_weather(state, query)
        }

        Action::WeatherRefresh => match state.last_query.clone() {
            Some(query) if !state.is_busy() => load_weather(state, query),
            _ => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad(report) => {
            state.weather = Some(*report);
            state.is_loading = false;
            state.error = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError(message) => {
            state.weather = None;
            state.is_loading = false;
            state.error = Some(message);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Spinner while busy, weather effects otherwise
            let animated = state.is_busy()
                || (state.weather.is_some() && state.theme().effects.any());
            if animated {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn search_event(state: &mut AppState, event: SearchEvent) -> DispatchResult<Effect> {
    state.search_focused = false;
    match event {
        SearchEvent::Committed(query) => {
            state.is_locating = false;
            DispatchResult::effect(Effect::CancelSuggestions).merge(load_weather(state, query))
        }
        SearchEvent::CurrentLocationRequested => {
            state.is_locating = true;
            state.error = None;
            DispatchResult::changed_with(Effect::LocateDevice)
        }
    }
}

fn load_weather(state: &mut AppState, query: String) -> DispatchResult<Effect> {
    state.is_loading = true;
    state.error = None;
    state.last_query = Some(query.clone());
    DispatchResult::changed_with(Effect::FetchWeather {
        query,
        days: state.forecast_days,
    })
}

fn applied(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}
