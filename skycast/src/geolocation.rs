//! Device position lookup
//!
//! A terminal has no browser geolocation, so the default locator asks an
//! IP geolocation service. Results are cached for [`MAX_POSITION_AGE`].

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Default IP geolocation endpoint.
pub const DEFAULT_GEO_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Give up on a position request after this long.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(15);

/// A cached position younger than this is reused.
pub const MAX_POSITION_AGE: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `"lat,lon"`, accepted as a weather query.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Why a position lookup failed.
///
/// The display text is shown in place of the weather.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access was denied. Please allow location lookup or search manually.")]
    PermissionDenied,

    #[error(
        "Location information is unavailable. Please check your connection or search manually."
    )]
    PositionUnavailable,

    #[error("Location request timed out. Please try again or search manually.")]
    Timeout,

    /// Position lookup is switched off
    #[error("Location lookup is disabled. Please search manually.")]
    Unsupported,

    #[error("Location error: {0}. Please search manually.")]
    Other(String),
}

impl GeolocationError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Locator used when position lookup is turned off.
pub struct DisabledGeolocator;

#[async_trait]
impl GeolocationProvider for DisabledGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Position from the public IP address.
pub struct IpGeolocator {
    http: reqwest::Client,
    url: String,
    cache: Mutex<Option<(Instant, Coordinates)>>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Result<Self, GeolocationError> {
        let http = reqwest::Client::builder()
            .timeout(LOCATE_TIMEOUT)
            .build()
            .map_err(|e| GeolocationError::Other(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            cache: Mutex::new(None),
        })
    }

    fn cached(&self) -> Option<Coordinates> {
        let cache = self.cache.lock().ok()?;
        let (at, coords) = (*cache)?;
        (at.elapsed() < MAX_POSITION_AGE).then_some(coords)
    }

    fn remember(&self, coords: Coordinates) {
        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some((Instant::now(), coords));
        }
    }
}

#[async_trait]
impl GeolocationProvider for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        if let Some(coords) = self.cached() {
            tracing::debug!(?coords, "Using cached position");
            return Ok(coords);
        }

        let response = self.http.get(&self.url).send().await.map_err(transport_error)?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GeolocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(GeolocationError::PositionUnavailable);
        }

        let body = response.text().await.map_err(transport_error)?;
        let coords = parse_ip_response(&body)?;
        self.remember(coords);
        Ok(coords)
    }
}

fn transport_error(error: reqwest::Error) -> GeolocationError {
    if error.is_timeout() {
        GeolocationError::Timeout
    } else if error.is_connect() {
        GeolocationError::PositionUnavailable
    } else {
        GeolocationError::Other(error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct IpResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

fn parse_ip_response(body: &str) -> Result<Coordinates, GeolocationError> {
    let response: IpResponse =
        serde_json::from_str(body).map_err(|e| GeolocationError::Other(e.to_string()))?;

    if response.status != "success" {
        return Err(match response.message {
            Some(message) => GeolocationError::Other(message),
            None => GeolocationError::PositionUnavailable,
        });
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
        _ => Err(GeolocationError::PositionUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_query() {
        assert_eq!(Coordinates::new(51.5, -0.12).as_query(), "51.5,-0.12");
    }

    #[test]
    fn test_parse_success() {
        let coords =
            parse_ip_response(r#"{"status":"success","lat":52.52,"lon":13.405}"#).unwrap();
        assert_eq!(coords, Coordinates::new(52.52, 13.405));
    }

    #[test]
    fn test_parse_failure_message() {
        let err = parse_ip_response(r#"{"status":"fail","message":"reserved range"}"#).unwrap_err();
        assert_eq!(err, GeolocationError::Other("reserved range".into()));
        assert_eq!(
            err.user_message(),
            "Location error: reserved range. Please search manually."
        );
    }

    #[test]
    fn test_parse_missing_coordinates() {
        let err = parse_ip_response(r#"{"status":"success"}"#).unwrap_err();
        assert_eq!(err, GeolocationError::PositionUnavailable);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_ip_response("not json"),
            Err(GeolocationError::Other(_))
        ));
    }

    #[test]
    fn test_messages() {
        assert!(GeolocationError::PermissionDenied.user_message().contains("denied"));
        assert!(GeolocationError::Timeout.user_message().contains("timed out"));
        assert!(
            GeolocationError::PositionUnavailable
                .user_message()
                .contains("unavailable")
        );
    }

    #[test]
    fn test_cache_reused() {
        let locator = IpGeolocator::new("http://127.0.0.1:9/unused").unwrap();
        assert_eq!(locator.cached(), None);

        locator.remember(Coordinates::new(1.0, 2.0));
        assert_eq!(locator.cached(), Some(Coordinates::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn test_cached_position_skips_request() {
        // Unroutable URL: a request would fail
        let locator = IpGeolocator::new("http://127.0.0.1:9/unused").unwrap();
        locator.remember(Coordinates::new(48.85, 2.35));
        assert_eq!(locator.locate().await, Ok(Coordinates::new(48.85, 2.35)));
    }

    #[tokio::test]
    async fn test_disabled() {
        assert_eq!(
            DisabledGeolocator.locate().await,
            Err(GeolocationError::Unsupported)
        );
    }
}
