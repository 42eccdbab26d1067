//! skycast: current weather and forecast in the terminal
//!
//! Flow per frame:
//! 1. Event (key, mouse) -> `WeatherDisplay::handle_event` -> actions
//! 2. Actions dispatched to the store, the reducer returns effects
//! 3. Effects become keyed tasks (debounce, lookups, weather requests)
//! 4. Task results come back as `*Did*` actions
//! 5. Re-render when state changed
//!
//! # Usage
//!
//! ```sh
//! # Weather for the current position
//! WEATHER_API_KEY=... skycast
//!
//! # Start with a city, log to a file
//! skycast --city Lisbon --log-file skycast.log
//! ```

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use skycast_core::{EffectRuntime, EffectStoreWithMiddleware, EventKind, EventOutcome, LoggingMiddleware};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use skycast::components::{Component, WeatherDisplay, WeatherDisplayProps};
use skycast::config::{Args, Config};
use skycast::geolocation::{DisabledGeolocator, GeolocationProvider, IpGeolocator};
use skycast::provider::WeatherApiClient;
use skycast::state::LOADING_ANIM_TICK_MS;
use skycast::{Action, AppState, Services, reducer};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Get a free key at https://www.weatherapi.com/");
            std::process::exit(1);
        }
    };

    if let Some(path) = &config.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: could not open log file {}: {e}", path.display());
            std::process::exit(1);
        }
    }

    let services = match build_services(&config) {
        Ok(services) => services,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting skycast");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config, services).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &std::path::Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skycast=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn build_services(config: &Config) -> Result<Services, Box<dyn std::error::Error>> {
    let weather = WeatherApiClient::new(&config.api_url, &config.api_key)?;
    let geolocation: Arc<dyn GeolocationProvider> = if config.geolocation {
        Arc::new(IpGeolocator::new(&config.geo_url)?)
    } else {
        Arc::new(DisabledGeolocator)
    };
    Ok(Services::new(Arc::new(weather), geolocation))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    services: Services,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(
        AppState::new(config.forecast_days),
        reducer,
        LoggingMiddleware::new(),
    );
    let mut runtime = EffectRuntime::from_store(store);

    // Spinner and weather effects
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    if let Some(every) = config.refresh_interval {
        runtime
            .subscriptions()
            .interval("refresh", every, || Action::WeatherRefresh);
    }

    runtime.enqueue(match &config.initial_city {
        Some(city) => Action::WeatherLoad(city.clone()),
        None => Action::LocationRequest,
    });

    let ui = RefCell::new(WeatherDisplay::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                ui.borrow_mut()
                    .render(frame, area, WeatherDisplayProps { state });
            },
            |event, state| map_event(&mut ui.borrow_mut(), event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| services.handle(effect, ctx),
        )
        .await
}

fn map_event(ui: &mut WeatherDisplay, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
    if let EventKind::Resize(width, height) = event {
        return EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render();
    }
    EventOutcome::from_actions(ui.handle_event(event, WeatherDisplayProps { state }))
}
