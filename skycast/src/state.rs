//! Application state
//!
//! Components receive `&AppState` as props; only the reducer mutates it.

use crate::provider::WeatherReport;
use crate::search::LocationSearch;
use crate::theme::{self, ThemeDescriptor};

/// Milliseconds per animation tick (spinner and weather effects)
pub const LOADING_ANIM_TICK_MS: u64 = 120;

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn convert(&self, celsius: f32) -> f32 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Rounded with unit, e.g. `21°C`
    pub fn format(&self, celsius: f32) -> String {
        format!("{:.0}{}", self.convert(celsius), self.suffix())
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }
}

/// Everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    pub search: LocationSearch,

    /// Whether key presses go to the search bar
    pub search_focused: bool,

    /// Last loaded report (None = nothing loaded or last load failed)
    pub weather: Option<WeatherReport>,

    /// A weather request is in flight
    pub is_loading: bool,

    /// A position lookup is in flight
    pub is_locating: bool,

    /// Message for the error panel
    pub error: Option<String>,

    /// Query of the last weather load, reused by refresh
    pub last_query: Option<String>,

    pub unit: TempUnit,

    pub forecast_days: u8,

    /// Animation frame counter
    pub tick_count: u32,

    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(forecast_days: u8) -> Self {
        Self {
            search: LocationSearch::new(),
            search_focused: false,
            weather: None,
            is_loading: false,
            is_locating: false,
            error: None,
            last_query: None,
            unit: TempUnit::default(),
            forecast_days,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    /// Busy with a position lookup or a weather request.
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_locating
    }

    /// Theme for the loaded conditions, or the default one.
    pub fn theme(&self) -> &'static ThemeDescriptor {
        let condition = self
            .weather
            .as_ref()
            .map(|w| w.current.condition.as_str())
            .unwrap_or_default();
        theme::classify(condition)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(7)
    }
}
