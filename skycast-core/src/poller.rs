//! Crossterm event polling on a background task

use crossterm::event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::event::EventKind;

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Spawn the event polling task with cancellation support
///
/// # Arguments
/// * `tx` - Channel to send raw events
/// * `poll_timeout` - Timeout for each poll operation
/// * `loop_sleep` - Sleep duration between poll cycles
/// * `cancel_token` - Token to cancel the polling task
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Ok(evt) = event::read() else {
                            continue;
                        };
                        let raw = match evt {
                            event::Event::Key(key) => RawEvent::Key(key),
                            event::Event::Mouse(mouse) => RawEvent::Mouse(mouse),
                            event::Event::Resize(w, h) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
///
/// Key releases are dropped so that terminals reporting both press and
/// release do not type every character twice.
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind == event::KeyEventKind::Release => None,
        RawEvent::Key(key) => Some(EventKind::Key(key)),
        RawEvent::Mouse(mouse) => Some(EventKind::Mouse(mouse)),
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}
