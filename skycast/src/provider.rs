//! WeatherAPI.com client
//!
//! The app talks to the weather service through the [`WeatherProvider`]
//! trait; [`WeatherApiClient`] is the HTTP implementation. Responses are
//! decoded into private wire structs and mapped onto the domain types below.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::search::Suggestion;

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api.weatherapi.com/v1";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the weather service.
///
/// The display text is what the user sees in the error panel.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found. Please try a different search.")]
    LocationNotFound,

    #[error("API key is invalid. Please check your configuration.")]
    InvalidApiKey,

    #[error("API quota exceeded. Please try again later.")]
    QuotaExceeded,

    #[error("Failed to fetch weather data. Please try again.")]
    Status(u16),

    #[error("Network error. Please check your connection.")]
    Network(#[source] reqwest::Error),

    /// Unreadable response body. The detail is for logs only.
    #[error("Network error. Please check your connection.")]
    Decode(String),
}

impl WeatherError {
    /// Map a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => WeatherError::LocationNotFound,
            401 => WeatherError::InvalidApiKey,
            403 => WeatherError::QuotaExceeded,
            other => WeatherError::Status(other),
        }
    }

    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_decode() {
            WeatherError::Decode(error.to_string())
        } else {
            WeatherError::Network(error)
        }
    }
}

/// Where a report is for.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Local time at the place when the report was produced
    pub localtime: Option<NaiveDateTime>,
}

impl Place {
    /// `"{name}, {country}"`
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Current conditions at a place.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentConditions {
    pub place: Place,
    pub temp_c: f32,
    pub feelslike_c: f32,
    pub condition: String,
    pub is_day: bool,
    pub humidity: u8,
    pub wind_kph: f32,
    pub wind_dir: String,
    pub pressure_mb: f32,
    pub vis_km: f32,
    pub uv: f32,
    pub last_updated: Option<NaiveDateTime>,
}

/// One forecast day.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub maxtemp_c: f32,
    pub mintemp_c: f32,
    pub condition: String,
    pub daily_chance_of_rain: u8,
}

/// Current conditions plus the forecast for the same query.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherReport {
    /// The place's local date, used to label forecast days.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.current.place.localtime.map(|t| t.date())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Candidate locations for a partial query.
    async fn search_locations(&self, query: &str) -> Result<Vec<Suggestion>, WeatherError>;

    /// Current conditions for a place name or `"lat,lon"`.
    async fn current(&self, query: &str) -> Result<CurrentConditions, WeatherError>;

    /// Daily forecast for up to `days` days.
    async fn forecast(&self, query: &str, days: u8) -> Result<Vec<ForecastDay>, WeatherError>;
}

/// Fetch current conditions and the forecast concurrently.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    query: &str,
    days: u8,
) -> Result<WeatherReport, WeatherError> {
    let (current, forecast) =
        tokio::try_join!(provider.current(query), provider.forecast(query, days))?;
    Ok(WeatherReport { current, forecast })
}

/// HTTP client for the WeatherAPI.com v1 API.
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherError::Network)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, endpoint: &str, query: &str, extra: &str) -> String {
        format!(
            "{}/{}?key={}&q={}{}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            extra
        )
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(WeatherError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::from_status(status.as_u16()));
        }

        let body = response.text().await.map_err(WeatherError::from_transport)?;
        decode(&body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<Suggestion>, WeatherError> {
        let url = self.url("search.json", query, "");
        let results: Vec<SearchResult> = self.get(&url).await?;
        Ok(results.into_iter().map(Suggestion::from).collect())
    }

    async fn current(&self, query: &str) -> Result<CurrentConditions, WeatherError> {
        let url = self.url("current.json", query, "&aqi=no");
        let response: CurrentResponse = self.get(&url).await?;
        Ok(response.into_domain())
    }

    async fn forecast(&self, query: &str, days: u8) -> Result<Vec<ForecastDay>, WeatherError> {
        let extra = format!("&days={days}&aqi=no&alerts=no");
        let url = self.url("forecast.json", query, &extra);
        let response: ForecastResponse = self.get(&url).await?;
        response.into_domain()
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, WeatherError> {
    serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
}

impl From<SearchResult> for Suggestion {
    fn from(r: SearchResult) -> Self {
        Suggestion {
            name: r.name,
            region: r.region,
            country: r.country,
            latitude: r.lat,
            longitude: r.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireCurrent {
    #[serde(default)]
    last_updated: String,
    temp_c: f32,
    feelslike_c: f32,
    is_day: u8,
    condition: WireCondition,
    humidity: u8,
    wind_kph: f32,
    #[serde(default)]
    wind_dir: String,
    #[serde(default)]
    pressure_mb: f32,
    #[serde(default)]
    vis_km: f32,
    #[serde(default)]
    uv: f32,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: WireLocation,
    current: WireCurrent,
}

impl CurrentResponse {
    fn into_domain(self) -> CurrentConditions {
        let WireLocation {
            name,
            region,
            country,
            lat,
            lon,
            localtime,
        } = self.location;
        let c = self.current;

        CurrentConditions {
            place: Place {
                name,
                region,
                country,
                latitude: lat,
                longitude: lon,
                localtime: parse_local_time(&localtime),
            },
            temp_c: c.temp_c,
            feelslike_c: c.feelslike_c,
            condition: c.condition.text,
            is_day: c.is_day != 0,
            humidity: c.humidity,
            wind_kph: c.wind_kph,
            wind_dir: c.wind_dir,
            pressure_mb: c.pressure_mb,
            vis_km: c.vis_km,
            uv: c.uv,
            last_updated: parse_local_time(&c.last_updated),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireDay {
    maxtemp_c: f32,
    mintemp_c: f32,
    #[serde(default)]
    daily_chance_of_rain: u8,
    condition: WireCondition,
}

#[derive(Debug, Deserialize)]
struct WireForecastDay {
    date: String,
    day: WireDay,
}

#[derive(Debug, Deserialize)]
struct WireForecast {
    forecastday: Vec<WireForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: WireForecast,
}

impl ForecastResponse {
    fn into_domain(self) -> Result<Vec<ForecastDay>, WeatherError> {
        self.forecast
            .forecastday
            .into_iter()
            .map(|d| {
                let date = NaiveDate::parse_from_str(&d.date, "%Y-%m-%d")
                    .map_err(|e| WeatherError::Decode(format!("forecast date {:?}: {e}", d.date)))?;
                Ok(ForecastDay {
                    date,
                    maxtemp_c: d.day.maxtemp_c,
                    mintemp_c: d.day.mintemp_c,
                    condition: d.day.condition.text,
                    daily_chance_of_rain: d.day.daily_chance_of_rain,
                })
            })
            .collect()
    }
}

// "2024-06-01 9:05" (hour not zero-padded in `localtime`)
fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok()
}
