//! The event/action/render loop.
//!
//! [`EffectRuntime`] owns the store, the action channel, the task manager and
//! the subscriptions. Each turn it either maps a terminal event into actions
//! or dispatches one queued action and hands the resulting effects to the
//! app's effect handler.

use std::io;
use std::marker::PhantomData;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
use crate::event::EventKind;
use crate::poller::{process_raw_event, spawn_event_poller, RawEvent};
use crate::store::Middleware;
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Sleep between poll cycles (about 60 per second)
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Wrap a single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions.
    ///
    /// Useful for converting `Component::handle_event` results.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self {
            actions,
            needs_render: false,
        }
    }
}

/// Effect store interface used by [`EffectRuntime`].
pub trait EffectStoreLike<S, A: Action, E> {
    /// Dispatch an action and return state changes plus effects.
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;

    /// Get the current state.
    fn state(&self) -> &S;
}

impl<S, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
    subscriptions: &'a mut Subscriptions<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Build a context over borrowed runtime parts.
    ///
    /// The runtime does this itself; tests use it to drive an effect handler
    /// without a terminal.
    pub fn new(
        action_tx: &'a mpsc::UnboundedSender<A>,
        tasks: &'a mut TaskManager<A>,
        subscriptions: &'a mut Subscriptions<A>,
    ) -> Self {
        Self {
            action_tx,
            tasks,
            subscriptions,
        }
    }

    /// Send an action straight to the queue, without a task.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }

    /// Access subscriptions.
    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        self.subscriptions
    }
}

/// Runtime for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    should_render: bool,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
    _marker: PhantomData<(S, E)>,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Create a runtime from an existing effect store.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            should_render: true,
            tasks,
            subscriptions,
            _marker: PhantomData,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Access subscriptions.
    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Run the event/action loop until `should_quit` accepts an action.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            POLL_INTERVAL,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        tracing::info!(action = action.name(), "Quit requested");
                        break;
                    }
                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext::new(
                            &self.action_tx,
                            &mut self.tasks,
                            &mut self.subscriptions,
                        );
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Ping,
        Pong,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Ping => "Ping",
                TestAction::Pong => "Pong",
            }
        }
    }

    #[test]
    fn test_event_outcome_conversions() {
        let o = EventOutcome::action(TestAction::Ping);
        assert_eq!(o.actions, vec![TestAction::Ping]);
        assert!(!o.needs_render);

        let o: EventOutcome<TestAction> = EventOutcome::ignored();
        assert!(o.actions.is_empty());

        let o: EventOutcome<TestAction> = vec![TestAction::Ping, TestAction::Pong].into();
        assert_eq!(o.actions.len(), 2);

        let o = EventOutcome::from_actions(Some(TestAction::Pong)).with_render();
        assert_eq!(o.actions, vec![TestAction::Pong]);
        assert!(o.needs_render);

        let o: EventOutcome<TestAction> = EventOutcome::default().with_render();
        assert!(o.needs_render && o.actions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_effect_context_emit_and_tasks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());

        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);
        ctx.emit(TestAction::Ping);
        ctx.tasks().spawn("pong", async { TestAction::Pong });

        assert_eq!(rx.recv().await, Some(TestAction::Ping));
        assert_eq!(rx.recv().await, Some(TestAction::Pong));
    }

    #[test]
    fn test_runtime_enqueue_and_state() {
        fn reducer(state: &mut usize, _action: TestAction) -> DispatchResult<()> {
            *state += 1;
            DispatchResult::changed()
        }

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime");
        rt.block_on(async {
            let runtime: EffectRuntime<usize, TestAction, ()> = EffectRuntime::new(0, reducer);
            runtime.enqueue(TestAction::Ping);
            assert_eq!(*runtime.state(), 0);
        });
    }
}
