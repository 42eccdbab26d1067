//! Test utilities
//!
//! - [`key`]: build a `KeyEvent` from a string (e.g. `key("ctrl+l")`)
//! - [`RenderHarness`]: render into an in-memory buffer and read it back as text
//! - [`ActionAssertions`] and the `assert_emitted!` family for checking emitted actions
//!
//! ```ignore
//! use skycast_core::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(60, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     frame.render_widget(Paragraph::new("London"), frame.area());
//! });
//! assert!(output.contains("London"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

/// Parse a key description such as `"q"`, `"ctrl+l"`, `"shift+tab"` or `"down"`.
///
/// Input is case-insensitive. Returns `None` for unknown names.
pub fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // A lone "+" is a character, not a separator
    if key_str == "+" {
        return Some(press(KeyCode::Char('+'), KeyModifiers::NONE));
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let (key_part, modifier_parts) = parts.split_last()?;

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
///
/// Unlike [`key`], the character's case is kept.
pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Create a `KeyEvent` for a character with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Renders into a fixed-size [`TestBackend`].
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with a `width` x `height` buffer.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Render a frame and return the resulting buffer.
    pub fn render<F>(&mut self, render_fn: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(render_fn)
            .unwrap_or_else(|e| panic!("Failed to draw: {e}"));
        self.terminal.backend().buffer()
    }

    /// Render a frame and return its text without styling, one line per row.
    pub fn render_to_string_plain<F>(&mut self, render_fn: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(render_fn))
    }
}

/// Convert a buffer to plain text, trimming trailing spaces on each row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assertions over a list of emitted actions.
pub trait ActionAssertions<A> {
    /// Assert no action was emitted.
    fn assert_empty(&self);

    /// Assert exactly `n` actions were emitted.
    fn assert_count(&self, n: usize);

    /// Assert the first emitted action equals `expected`.
    fn assert_first(&self, expected: A);

    /// Assert `expected` is among the emitted actions.
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(
            self.len(),
            n,
            "Expected {} actions, got {}: {:?}",
            n,
            self.len(),
            self
        );
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected),
            None => panic!("Expected first action {:?}, got none", expected),
        }
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "Expected {:?} among actions: {:?}",
            expected,
            self
        );
    }
}

/// Assert that an action matching a pattern was emitted.
///
/// ```ignore
/// let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
/// assert_emitted!(actions, Action::SearchInput(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
