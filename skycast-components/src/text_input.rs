//! Single-line text input component

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycast_core::{Component, EventKind};

/// Props for TextInput component
pub struct TextInputProps<'a, A> {
    /// Current input value
    pub value: &'a str,
    /// Placeholder text when empty
    pub placeholder: &'a str,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Border title (None = no border)
    pub title: Option<&'a str>,
    /// Border colour while focused
    pub accent: Color,
    /// Callback when value changes
    pub on_change: fn(String) -> A,
    /// Callback when user submits (Enter)
    pub on_submit: fn(String) -> A,
}

/// A single-line text input with cursor
///
/// Handles typing, backspace, delete and cursor movement.
/// Emits `on_change` for each edit and `on_submit` for Enter.
#[derive(Default)]
pub struct TextInput {
    /// Cursor position (byte index)
    cursor: usize,
    /// Value as of the last event or render
    seen: String,
}

impl TextInput {
    /// Create a new TextInput
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position as a byte index into the value
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    // A value replaced from outside (e.g. a committed suggestion) puts the
    // cursor at its end.
    fn sync(&mut self, value: &str) {
        if self.seen != value {
            self.cursor = value.len();
            self.seen = value.to_string();
        }
        self.cursor = self.cursor.min(value.len());
    }

    fn edited(&mut self, new_value: String) -> String {
        self.seen = new_value.clone();
        new_value
    }

    fn move_cursor_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_cursor_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        self.edited(new_value)
    }

    /// Delete character before cursor (backspace)
    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        let (char_start, _) = value[..self.cursor].char_indices().next_back()?;

        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..char_start]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor = char_start;
        Some(self.edited(new_value))
    }

    /// Delete character at cursor (delete key)
    fn delete_char_at(&mut self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;

        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);
        new_value.push_str(&value[self.cursor + c.len_utf8()..]);
        Some(self.edited(new_value))
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        self.sync(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Ctrl+A: move to start
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                // Ctrl+E: move to end
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                // Ctrl+U: clear line
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(self.edited(String::new())))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.value, c);
                Some((props.on_change)(new_value))
            }
            KeyCode::Backspace => self
                .delete_char_before(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Delete => self
                .delete_char_at(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Left => {
                self.move_cursor_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);

        let (display_text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let mut paragraph = Paragraph::new(display_text).style(style);
        let border_offset = if let Some(title) = props.title {
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(if props.is_focused {
                        Style::default().fg(props.accent)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    }),
            );
            1
        } else {
            0
        };

        frame.render_widget(paragraph, area);

        if props.is_focused {
            let column = props.value[..self.cursor].chars().count() as u16;
            let cursor_x = area.x + border_offset + column;
            let cursor_y = area.y + border_offset;
            let max_x = area.x + area.width.saturating_sub(border_offset);
            if cursor_x < max_x {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::{char_key, key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn props(value: &str, is_focused: bool) -> TextInputProps<'_, TestAction> {
        TextInputProps {
            value,
            placeholder: "Search city...",
            is_focused,
            title: Some("Search"),
            accent: Color::Cyan,
            on_change: TestAction::Change,
            on_submit: TestAction::Submit,
        }
    }

    fn send(input: &mut TextInput, value: &str, k: &str) -> Vec<TestAction> {
        input
            .handle_event(&EventKind::Key(key(k)), props(value, true))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing() {
        let mut input = TextInput::new();
        assert_eq!(send(&mut input, "", "a"), vec![TestAction::Change("a".into())]);
    }

    #[test]
    fn test_typing_appends_to_existing_value() {
        let mut input = TextInput::new();
        assert_eq!(
            send(&mut input, "Lond", "o"),
            vec![TestAction::Change("Londo".into())]
        );
    }

    #[test]
    fn test_uppercase_kept() {
        let mut input = TextInput::new();
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(char_key('P')), props("", true))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![TestAction::Change("P".into())]);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::new();
        send(&mut input, "Pris", "left");
        send(&mut input, "Pris", "left");
        assert_eq!(
            send(&mut input, "Pris", "a"),
            vec![TestAction::Change("Prais".into())]
        );
    }

    #[test]
    fn test_backspace() {
        let mut input = TextInput::new();
        assert_eq!(
            send(&mut input, "hello", "backspace"),
            vec![TestAction::Change("hell".into())]
        );
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut input = TextInput::new();
        assert_eq!(
            send(&mut input, "Zürich ü", "backspace"),
            vec![TestAction::Change("Zürich ".into())]
        );
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::new();
        send(&mut input, "hello", "home");
        assert!(send(&mut input, "hello", "backspace").is_empty());
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = TextInput::new();
        send(&mut input, "Rome", "home");
        assert_eq!(
            send(&mut input, "Rome", "delete"),
            vec![TestAction::Change("ome".into())]
        );
        assert!(send(&mut input, "ome", "end").is_empty());
        assert!(send(&mut input, "ome", "delete").is_empty());
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new();
        assert_eq!(
            send(&mut input, "Berlin", "ctrl+u"),
            vec![TestAction::Change(String::new())]
        );
    }

    #[test]
    fn test_external_change_moves_cursor_to_end() {
        let mut input = TextInput::new();
        send(&mut input, "Lo", "home");
        assert_eq!(input.cursor(), 0);

        send(&mut input, "London, City of London", "ctrl+e");
        send(&mut input, "Lo", "left");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_submit() {
        let mut input = TextInput::new();
        assert_eq!(
            send(&mut input, "hello", "enter"),
            vec![TestAction::Submit("hello".into())]
        );
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut input = TextInput::new();
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(key("a")), props("", false))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_with_value() {
        let mut render = RenderHarness::new(30, 3);
        let mut input = TextInput::new();

        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props("Madrid", true));
        });

        assert!(output.contains("Madrid"));
        assert!(output.contains("Search"));
    }

    #[test]
    fn test_render_placeholder() {
        let mut render = RenderHarness::new(30, 3);
        let mut input = TextInput::new();

        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props("", false));
        });

        assert!(output.contains("Search city..."));
    }
}
