pub mod current_card;
pub mod forecast_card;
pub mod help_bar;
pub mod location_header;
pub mod search_bar;
pub mod sky;
pub mod weather_body;
pub mod weather_display;

pub use skycast_core::Component;

pub use current_card::{CurrentCard, CurrentCardProps};
pub use forecast_card::{ForecastCard, ForecastCardProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use sky::{Sky, SkyProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{
    ERROR_ICON, LOCATION_ICON, SPINNERS, WeatherDisplay, WeatherDisplayProps,
};
