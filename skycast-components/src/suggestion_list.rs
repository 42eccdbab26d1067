//! Dropdown list of suggestions with an optional highlighted row

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};
use skycast_core::{event, Component, EventKind};

/// Props for SuggestionList component
pub struct SuggestionListProps<'a, A> {
    /// Row labels, top to bottom
    pub items: &'a [String],
    /// Highlighted row, if any
    pub highlight: Option<usize>,
    /// Highlight background
    pub accent: Color,
    /// Callback when a row is clicked
    pub on_select: fn(usize) -> A,
}

/// A bordered dropdown of suggestion rows
///
/// Keyboard navigation belongs to the owner of the highlight; this component
/// only draws it and reports clicks on rows.
#[derive(Default)]
pub struct SuggestionList {
    /// Inner area from the last render, used for click hit-testing
    rows_area: Option<Rect>,
}

impl SuggestionList {
    /// Create a new SuggestionList
    pub fn new() -> Self {
        Self::default()
    }

    /// Height needed to show `count` rows with borders
    pub fn height_for(count: usize) -> u16 {
        count as u16 + 2
    }

    /// Row index under a screen position, if any
    pub fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let area = self.rows_area?;
        if !event::contains(area, column, row) {
            return None;
        }
        let index = (row - area.y) as usize;
        (index < len).then_some(index)
    }
}

impl<A> Component<A> for SuggestionList {
    type Props<'a> = SuggestionListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let Some((column, row)) = event.left_click() else {
            return None;
        };
        self.row_at(column, row, props.items.len())
            .map(props.on_select)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.items.is_empty() {
            self.rows_area = None;
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        self.rows_area = Some(block.inner(area));

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|item| ListItem::new(Line::raw(item.as_str())))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(props.accent)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default().with_selected(props.highlight);

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use skycast_core::testing::{key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Select(usize),
    }

    fn make_items() -> Vec<String> {
        vec![
            "London, City of London, United Kingdom".into(),
            "London, Ontario, Canada".into(),
            "Londrina, Parana, Brazil".into(),
        ]
    }

    fn click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn props(items: &[String], highlight: Option<usize>) -> SuggestionListProps<'_, TestAction> {
        SuggestionListProps {
            items,
            highlight,
            accent: Color::Cyan,
            on_select: TestAction::Select,
        }
    }

    #[test]
    fn test_height_for() {
        assert_eq!(SuggestionList::height_for(5), 7);
    }

    #[test]
    fn test_click_selects_row() {
        let mut render = RenderHarness::new(50, 10);
        let mut list = SuggestionList::new();
        let items = make_items();

        render.render(|frame| {
            list.render(frame, Rect::new(0, 2, 50, 5), props(&items, None));
        });

        // Border at row 2, rows start at 3
        let actions: Vec<_> = list
            .handle_event(&click(5, 4), props(&items, None))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![TestAction::Select(1)]);
    }

    #[test]
    fn test_click_outside_rows_ignored() {
        let mut render = RenderHarness::new(50, 10);
        let mut list = SuggestionList::new();
        let items = make_items();

        render.render(|frame| {
            list.render(frame, Rect::new(0, 2, 50, 5), props(&items, None));
        });

        for (column, row) in [(5, 2), (5, 8), (0, 3)] {
            let actions: Vec<_> = list
                .handle_event(&click(column, row), props(&items, None))
                .into_iter()
                .collect();
            assert!(actions.is_empty(), "click at {column},{row}");
        }
    }

    #[test]
    fn test_keys_ignored() {
        let mut list = SuggestionList::new();
        let items = make_items();
        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("down")), props(&items, Some(0)))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_click_before_render_ignored() {
        let mut list = SuggestionList::new();
        let items = make_items();
        assert_eq!(list.row_at(1, 1, items.len()), None);
    }

    #[test]
    fn test_render() {
        let mut render = RenderHarness::new(50, 6);
        let mut list = SuggestionList::new();
        let items = make_items();

        let output = render.render_to_string_plain(|frame| {
            list.render(frame, frame.area(), props(&items, Some(1)));
        });

        assert!(output.contains("London, City of London, United Kingdom"));
        assert!(output.contains("London, Ontario, Canada"));
        assert!(output.contains("Londrina, Parana, Brazil"));
    }

    #[test]
    fn test_render_empty_draws_nothing() {
        let mut render = RenderHarness::new(20, 4);
        let mut list = SuggestionList::new();
        let items: Vec<String> = vec![];

        let output = render.render_to_string_plain(|frame| {
            list.render(frame, frame.area(), props(&items, None));
        });

        assert_eq!(output.trim(), "");
        assert_eq!(list.row_at(1, 1, 0), None);
    }
}
