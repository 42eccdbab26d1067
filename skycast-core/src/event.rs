//! Terminal events delivered to components

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// The event payload handed to `Component::handle_event`
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse click, drag, move or scroll
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Position of a left-button press, if this is one
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }

    /// Whether this is Ctrl+C, which always quits
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
        )
    }
}

/// Whether a point lies inside an area
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_left_click() {
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 4, 7);
        assert_eq!(click.left_click(), Some((4, 7)));

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 4, 7);
        assert_eq!(right.left_click(), None);

        let moved = mouse(MouseEventKind::Moved, 4, 7);
        assert_eq!(moved.left_click(), None);
    }

    #[test]
    fn test_interrupt() {
        let ctrl_c = EventKind::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        });
        assert!(ctrl_c.is_interrupt());
        assert!(!EventKind::Resize(80, 24).is_interrupt());
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(10, 5, 20, 3);
        assert!(contains(area, 10, 5));
        assert!(contains(area, 29, 7));
        assert!(!contains(area, 30, 7));
        assert!(!contains(area, 15, 8));
        assert!(!contains(area, 9, 5));
    }
}
