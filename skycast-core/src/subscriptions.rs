//! Long-lived action sources (timers)
//!
//! ```ignore
//! let mut subs = Subscriptions::new(action_tx);
//!
//! // Spinner animation
//! subs.interval("tick", Duration::from_millis(100), || Action::Tick);
//!
//! // Auto-refresh
//! subs.interval("refresh", Duration::from_secs(300), || Action::WeatherRefresh);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::Action;

/// Identifies a subscription for cancellation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubKey(String);

impl SubKey {
    /// Create a new subscription key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for SubKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

/// Manages subscriptions that keep emitting actions until cancelled.
pub struct Subscriptions<A> {
    handles: HashMap<SubKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> Subscriptions<A>
where
    A: Action,
{
    /// Create a new subscription manager sending on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Emit `action_fn()` every `duration`, starting one period from now.
    ///
    /// Replaces any subscription with the same key.
    pub fn interval<F>(
        &mut self,
        key: impl Into<SubKey>,
        duration: Duration,
        action_fn: F,
    ) -> &mut Self
    where
        F: Fn() -> A + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(duration);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    /// Cancel a subscription by key.
    pub fn cancel(&mut self, key: &SubKey) {
        if let Some(handle) = self.handles.remove(key) {
            handle.abort();
        }
    }

    /// Cancel all subscriptions.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    /// Whether a subscription with the given key is active.
    pub fn is_active(&self, key: &SubKey) -> bool {
        self.handles.contains_key(key)
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether there are no active subscriptions.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<A> Drop for Subscriptions<A> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Tick,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Tick"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_emits_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("tick", Duration::from_millis(100), || TestAction::Tick);

        tokio::time::sleep(Duration::from_millis(350)).await;

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("tick", Duration::from_millis(100), || TestAction::Tick);
        assert!(subs.is_active(&SubKey::new("tick")));

        subs.cancel(&SubKey::new("tick"));
        assert!(subs.is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_replaces_same_key() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("refresh", Duration::from_secs(60), || TestAction::Tick);
        subs.interval("refresh", Duration::from_secs(30), || TestAction::Tick);
        subs.interval("tick", Duration::from_millis(100), || TestAction::Tick);

        assert_eq!(subs.len(), 2);
        subs.cancel_all();
        assert!(subs.is_empty());
    }
}
