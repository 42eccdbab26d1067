//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::geolocation::DEFAULT_GEO_URL;
use crate::provider::DEFAULT_API_URL;

/// Terminal weather with live location search
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Current weather and forecast in your terminal")]
pub struct Args {
    /// WeatherAPI.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Start with this city instead of the current location
    #[arg(long, short)]
    pub city: Option<String>,

    /// Forecast length in days
    #[arg(long, short, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=14))]
    pub days: u8,

    /// Refresh interval in seconds (0 disables auto-refresh)
    #[arg(long, short, default_value_t = 300)]
    pub refresh_interval: u64,

    /// Never look up the current position
    #[arg(long)]
    pub no_geolocation: bool,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Weather API root
    #[arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// IP geolocation endpoint
    #[arg(long, default_value = DEFAULT_GEO_URL)]
    pub geo_url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: set WEATHER_API_KEY or pass --api-key")]
    MissingApiKey,
}

/// Validated settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub geo_url: String,
    pub initial_city: Option<String>,
    pub forecast_days: u8,
    /// `None` when auto-refresh is off
    pub refresh_interval: Option<Duration>,
    pub geolocation: bool,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let initial_city = args
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            api_key,
            api_url: args.api_url,
            geo_url: args.geo_url,
            initial_city,
            forecast_days: args.days,
            refresh_interval: (args.refresh_interval > 0)
                .then(|| Duration::from_secs(args.refresh_interval)),
            geolocation: !args.no_geolocation,
            log_file: args.log_file,
        })
    }
}
