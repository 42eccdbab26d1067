//! Effects declared by the reducer and the handler that runs them
//!
//! Task keys:
//! - `suggestions`: the debounce timer, replaced on every edit
//! - `suggestions#{seq}`: one lookup each, never aborted; stale answers are
//!   dropped by the sequence check in the reducer
//! - `weather`: the current weather request, replaced by a newer one
//! - `locate`: the position lookup

use std::sync::Arc;

use skycast_core::{EffectContext, TaskKey};

use crate::action::Action;
use crate::geolocation::GeolocationProvider;
use crate::provider::{self, WeatherProvider};
use crate::search::{DEBOUNCE, SearchCommand};

const DEBOUNCE_KEY: &str = "suggestions";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// (Re)arm the debounce timer for `query`
    DebounceSuggestions { query: String },
    /// Disarm the debounce timer
    CancelSuggestions,
    /// Look up suggestions, tagged with `seq`
    FetchSuggestions { seq: u64, query: String },
    /// Load current conditions and forecast
    FetchWeather { query: String, days: u8 },
    /// Find the device position
    LocateDevice,
}

impl From<SearchCommand> for Effect {
    fn from(command: SearchCommand) -> Self {
        match command {
            SearchCommand::Cancel => Effect::CancelSuggestions,
            SearchCommand::Debounce { query } => Effect::DebounceSuggestions { query },
        }
    }
}

/// Providers the effects talk to.
#[derive(Clone)]
pub struct Services {
    pub weather: Arc<dyn WeatherProvider>,
    pub geolocation: Arc<dyn GeolocationProvider>,
}

impl Services {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        geolocation: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self {
            weather,
            geolocation,
        }
    }

    /// Turn an effect into tasks.
    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::DebounceSuggestions { query } => {
                ctx.tasks().debounce(DEBOUNCE_KEY, DEBOUNCE, async move {
                    Action::SearchDebounceDidFire(query)
                });
            }
            Effect::CancelSuggestions => {
                ctx.tasks().cancel(&TaskKey::new(DEBOUNCE_KEY));
            }
            Effect::FetchSuggestions { seq, query } => {
                let weather = Arc::clone(&self.weather);
                ctx.tasks()
                    .spawn(format!("{DEBOUNCE_KEY}#{seq}"), async move {
                        match weather.search_locations(&query).await {
                            Ok(suggestions) => Action::SearchDidLoad { seq, suggestions },
                            Err(e) => Action::SearchDidError {
                                seq,
                                error: e.to_string(),
                            },
                        }
                    });
            }
            Effect::FetchWeather { query, days } => {
                let weather = Arc::clone(&self.weather);
                ctx.tasks().spawn("weather", async move {
                    match provider::fetch_report(weather.as_ref(), &query, days).await {
                        Ok(report) => Action::WeatherDidLoad(Box::new(report)),
                        Err(e) => {
                            tracing::warn!(%query, error = ?e, "Weather request failed");
                            Action::WeatherDidError(e.to_string())
                        }
                    }
                });
            }
            Effect::LocateDevice => {
                let geolocation = Arc::clone(&self.geolocation);
                ctx.tasks().spawn("locate", async move {
                    match geolocation.locate().await {
                        Ok(coords) => Action::LocationDidResolve(coords),
                        Err(e) => {
                            tracing::info!(error = ?e, "Position lookup failed");
                            Action::LocationDidError(e)
                        }
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::DisabledGeolocator;
    use crate::provider::{CurrentConditions, ForecastDay, WeatherError};
    use crate::search::Suggestion;
    use async_trait::async_trait;
    use skycast_core::{Subscriptions, TaskManager};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingProvider {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn search_locations(&self, query: &str) -> Result<Vec<Suggestion>, WeatherError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(vec![])
        }

        async fn current(&self, _query: &str) -> Result<CurrentConditions, WeatherError> {
            Err(WeatherError::InvalidApiKey)
        }

        async fn forecast(&self, _query: &str, _days: u8) -> Result<Vec<ForecastDay>, WeatherError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_from_search_command() {
        assert_eq!(Effect::from(SearchCommand::Cancel), Effect::CancelSuggestions);
        assert_eq!(
            Effect::from(SearchCommand::Debounce { query: "Rom".into() }),
            Effect::DebounceSuggestions { query: "Rom".into() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_then_cancel_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());
        let services = Services::new(
            Arc::new(RecordingProvider::default()),
            Arc::new(DisabledGeolocator),
        );

        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);
        services.handle(Effect::DebounceSuggestions { query: "Ro".into() }, &mut ctx);
        services.handle(Effect::CancelSuggestions, &mut ctx);

        tokio::time::sleep(DEBOUNCE * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_fires_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());
        let services = Services::new(
            Arc::new(RecordingProvider::default()),
            Arc::new(DisabledGeolocator),
        );

        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);
        services.handle(Effect::DebounceSuggestions { query: "Ro".into() }, &mut ctx);

        tokio::time::sleep(DEBOUNCE - Duration::from_millis(1)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(
            rx.recv().await,
            Some(Action::SearchDebounceDidFire("Ro".into()))
        );
    }

    #[tokio::test]
    async fn test_fetch_suggestions_tags_seq() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());
        let provider = Arc::new(RecordingProvider::default());
        let services = Services::new(provider.clone(), Arc::new(DisabledGeolocator));

        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);
        services.handle(
            Effect::FetchSuggestions {
                seq: 7,
                query: "Rome".into(),
            },
            &mut ctx,
        );

        assert_eq!(
            rx.recv().await,
            Some(Action::SearchDidLoad {
                seq: 7,
                suggestions: vec![]
            })
        );
        assert_eq!(*provider.queries.lock().unwrap(), vec!["Rome".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_weather_reports_error_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());
        let services = Services::new(
            Arc::new(RecordingProvider::default()),
            Arc::new(DisabledGeolocator),
        );

        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);
        services.handle(
            Effect::FetchWeather {
                query: "Rome".into(),
                days: 3,
            },
            &mut ctx,
        );

        assert_eq!(
            rx.recv().await,
            Some(Action::WeatherDidError(
                "API key is invalid. Please check your configuration.".into()
            ))
        );
    }

    #[tokio::test]
    async fn test_locate_disabled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());
        let services = Services::new(
            Arc::new(RecordingProvider::default()),
            Arc::new(DisabledGeolocator),
        );

        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);
        services.handle(Effect::LocateDevice, &mut ctx);

        assert_eq!(
            rx.recv().await,
            Some(Action::LocationDidError(
                crate::geolocation::GeolocationError::Unsupported
            ))
        );
    }
}
