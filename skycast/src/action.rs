//! Application actions
//!
//! Naming convention:
//! - Prefix names the area: `Search*`, `Location*`, `Weather*`, `Ui*`
//! - `Did` marks the result of async work
//! - Verbs at the end: Input, Load, Refresh, Toggle, Quit

use skycast_core::Action as ActionTrait;

use crate::geolocation::{Coordinates, GeolocationError};
use crate::provider::WeatherReport;
use crate::search::{SearchKey, Suggestion};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Search =====
    /// Give the search bar input focus
    SearchFocus,

    /// Release input focus and close the dropdown
    SearchBlur,

    /// The query text was edited
    SearchInput(String),

    /// A navigation key while the search bar has focus
    SearchKey(SearchKey),

    /// A suggestion row was clicked
    SearchSelect(usize),

    /// The quiet period after the last edit ended for this query
    SearchDebounceDidFire(String),

    /// Result: suggestions for lookup `seq`
    SearchDidLoad { seq: u64, suggestions: Vec<Suggestion> },

    /// Result: lookup `seq` failed
    SearchDidError { seq: u64, error: String },

    // ===== Location =====
    /// Load weather for the current position
    LocationRequest,

    /// Result: position found
    LocationDidResolve(Coordinates),

    /// Result: position lookup failed
    LocationDidError(GeolocationError),

    // ===== Weather =====
    /// Load weather for a place name or `"lat,lon"`
    WeatherLoad(String),

    /// Reload the last query
    WeatherRefresh,

    /// Result: report loaded
    WeatherDidLoad(Box<WeatherReport>),

    /// Result: loading failed, with a user-facing message
    WeatherDidError(String),

    // ===== UI =====
    /// Switch between Celsius and Fahrenheit
    UiToggleUnits,

    /// Terminal was resized
    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Animation tick
    Tick,

    /// Exit the application
    Quit,
}

impl ActionTrait for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::SearchFocus => "SearchFocus",
            Action::SearchBlur => "SearchBlur",
            Action::SearchInput(_) => "SearchInput",
            Action::SearchKey(_) => "SearchKey",
            Action::SearchSelect(_) => "SearchSelect",
            Action::SearchDebounceDidFire(_) => "SearchDebounceDidFire",
            Action::SearchDidLoad { .. } => "SearchDidLoad",
            Action::SearchDidError { .. } => "SearchDidError",
            Action::LocationRequest => "LocationRequest",
            Action::LocationDidResolve(_) => "LocationDidResolve",
            Action::LocationDidError(_) => "LocationDidError",
            Action::WeatherLoad(_) => "WeatherLoad",
            Action::WeatherRefresh => "WeatherRefresh",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::WeatherDidError(_) => "WeatherDidError",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    fn summary(&self) -> String {
        match self {
            // Place and temperature instead of the whole report
            Action::WeatherDidLoad(report) => format!(
                "WeatherDidLoad {{ place: {:?}, temp: {:.1}°C, days: {} }}",
                report.current.place.label(),
                report.current.temp_c,
                report.forecast.len()
            ),
            Action::SearchDidLoad { seq, suggestions } => {
                format!("SearchDidLoad {{ seq: {seq}, count: {} }}", suggestions.len())
            }
            Action::WeatherDidError(e) => {
                let msg = if e.chars().count() > 40 {
                    format!("{}...", e.chars().take(37).collect::<String>())
                } else {
                    e.clone()
                };
                format!("WeatherDidError({:?})", msg)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Action::SearchInput("Lo".into()).name(), "SearchInput");
        assert_eq!(
            Action::SearchDidLoad {
                seq: 1,
                suggestions: vec![]
            }
            .name(),
            "SearchDidLoad"
        );
        assert_eq!(Action::Quit.name(), "Quit");
    }

    #[test]
    fn test_summary_truncates_errors() {
        let long = "x".repeat(80);
        let summary = Action::WeatherDidError(long).summary();
        assert!(summary.ends_with("...\")"));
        assert!(summary.len() < 60);
    }

    #[test]
    fn test_summary_counts_suggestions() {
        let action = Action::SearchDidLoad {
            seq: 4,
            suggestions: vec![],
        };
        assert_eq!(action.summary(), "SearchDidLoad { seq: 4, count: 0 }");
    }
}
