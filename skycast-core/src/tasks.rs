//! Task manager for async operations
//!
//! Keyed lifecycle management for async tasks:
//! - spawning with a key that is already running cancels the old task
//! - debounced execution (the wait restarts on every call with the same key)
//! - manual cancellation
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! tasks.debounce("suggestions", Duration::from_millis(300), async move {
//!     Action::SearchDebounceDidFire(query)
//! });
//!
//! // Distinct keys run side by side and are never aborted by each other
//! tasks.spawn(format!("suggestions#{seq}"), async move {
//!     Action::SearchDidLoad { seq, result: search(&query).await }
//! });
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Manages async task lifecycle with automatic cancellation.
///
/// Each task resolves to one action, which is sent to the runtime's action
/// channel. A task cancelled before completion sends nothing.
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager sending results on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.spawn_after(key.into(), None, future)
    }

    /// Spawn a task that waits `duration` before running.
    ///
    /// Calling again with the same key before the wait elapses cancels the
    /// pending task, so only the last call within any quiet window runs
    /// (trailing-edge debounce).
    pub fn debounce<F>(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        future: F,
    ) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.spawn_after(key.into(), Some(duration), future)
    }

    fn spawn_after<F>(&mut self, key: TaskKey, delay: Option<Duration>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.cancel(&key);
        self.prune_finished();

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let action = future.await;
            let _ = tx.send(action);
        });

        tracing::trace!(task = key.name(), ?delay, "Task spawned");
        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Cancel a task by key. No-op if the key is unknown.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Cancel all running tasks.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Check if a task with the given key is still running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tasks still running.
    pub fn len(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    /// Whether no task is running.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Tasks spawned under one-off keys are never replaced, so drop their
    // handles once they are done.
    fn prune_finished(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::timeout;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Done(usize),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Done"
        }
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<TestAction>, within: Duration) -> TestAction {
        timeout(within, rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed")
    }

    #[test]
    fn test_task_key() {
        let k1 = TaskKey::new("suggestions");
        let k2 = TaskKey::from("suggestions");
        let k3: TaskKey = String::from("suggestions").into();

        assert_eq!(k1, k2);
        assert_eq!(k2, k3);
        assert_eq!(k1.name(), "suggestions");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("weather", async { TestAction::Done(42) });

        assert_eq!(
            next(&mut rx, Duration::from_millis(100)).await,
            TestAction::Done(42)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);
        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        tasks.spawn("weather", async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            TestAction::Done(1)
        });

        let c2 = counter.clone();
        tasks.spawn("weather", async move {
            c2.fetch_add(10, Ordering::SeqCst);
            TestAction::Done(2)
        });

        assert_eq!(
            next(&mut rx, Duration::from_millis(200)).await,
            TestAction::Done(2)
        );
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_run_side_by_side() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("suggestions#1", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(1)
        });
        tasks.spawn("suggestions#2", async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            TestAction::Done(2)
        });

        assert_eq!(
            next(&mut rx, Duration::from_millis(50)).await,
            TestAction::Done(2)
        );
        assert_eq!(
            next(&mut rx, Duration::from_millis(200)).await,
            TestAction::Done(1)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_waits() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("suggestions", Duration::from_millis(50), async {
            TestAction::Done(1)
        });

        let early = timeout(Duration::from_millis(30), rx.recv()).await;
        assert!(early.is_err());

        assert_eq!(
            next(&mut rx, Duration::from_millis(100)).await,
            TestAction::Done(1)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_resets() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("suggestions", Duration::from_millis(50), async {
            TestAction::Done(1)
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        tasks.debounce("suggestions", Duration::from_millis(50), async {
            TestAction::Done(2)
        });

        assert_eq!(
            next(&mut rx, Duration::from_millis(100)).await,
            TestAction::Done(2)
        );
        let more = timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(more.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("suggestions", Duration::from_millis(100), async {
            TestAction::Done(1)
        });
        assert!(tasks.is_running(&TaskKey::new("suggestions")));

        tasks.cancel(&TaskKey::new("suggestions"));
        assert!(!tasks.is_running(&TaskKey::new("suggestions")));

        let result = timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(1)
        });
        tasks.spawn("b", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(2)
        });
        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();
        assert!(tasks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_tasks_are_not_counted() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("suggestions#1", async { TestAction::Done(1) });
        next(&mut rx, Duration::from_millis(10)).await;
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(!tasks.is_running(&TaskKey::new("suggestions#1")));
        assert!(tasks.is_empty());
    }
}
