//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and emits actions
///
/// Rules:
/// 1. Props contain all read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates application state
/// 3. `render` is a function of props plus internal UI state
///
/// Internal UI state (cursor position, scroll offset, last rendered area) may
/// live in `&mut self`; data changes must go through actions. Focus is passed
/// through props.
///
/// # Example
///
/// ```ignore
/// struct Counter;
///
/// struct CounterProps {
///     count: i32,
///     is_focused: bool,
/// }
///
/// impl Component<AppAction> for Counter {
///     type Props<'a> = CounterProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         if !props.is_focused {
///             return None;
///         }
///         if let EventKind::Key(key) = event {
///             if key.code == KeyCode::Up {
///                 return Some(AppAction::Increment);
///             }
///         }
///         None
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(format!("Count: {}", props.count)), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)`, or a `Vec`.
    /// The default returns nothing (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
