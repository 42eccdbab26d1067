//! Search input, current-location button and suggestion dropdown

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use skycast_components::{SuggestionList, SuggestionListProps, TextInput, TextInputProps};
use skycast_core::{EventKind, event};

use super::{Component, LOCATION_ICON};
use crate::action::Action;
use crate::search::{LocationSearch, SearchKey};

pub const PLACEHOLDER: &str = "Search for a city...";

pub struct SearchBarProps<'a> {
    pub search: &'a LocationSearch,
    pub is_focused: bool,
    /// A lookup or load is running; the location button is disabled
    pub busy: bool,
    pub accent: Color,
}

#[derive(Default)]
pub struct SearchBar {
    input: TextInput,
    dropdown: SuggestionList,
    input_area: Option<Rect>,
    locate_area: Option<Rect>,
}

impl SearchBar {
    pub const HEIGHT: u16 = 3;
    const LOCATE_WIDTH: u16 = 12;

    pub fn new() -> Self {
        Self::default()
    }

    fn input_props<'a>(props: &SearchBarProps<'a>) -> TextInputProps<'a, Action> {
        TextInputProps {
            value: props.search.query(),
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            title: Some(" Search "),
            accent: props.accent,
            on_change: Action::SearchInput,
            // Enter goes through the search so a highlighted row wins
            on_submit: |_| Action::SearchKey(SearchKey::Enter),
        }
    }

    fn handle_click(
        &mut self,
        event: &EventKind,
        column: u16,
        row: u16,
        props: &SearchBarProps<'_>,
    ) -> Vec<Action> {
        let labels = visible_labels(props.search);
        let selected: Vec<Action> = self
            .dropdown
            .handle_event(
                event,
                SuggestionListProps {
                    items: &labels,
                    highlight: props.search.highlight(),
                    accent: props.accent,
                    on_select: Action::SearchSelect,
                },
            )
            .into_iter()
            .collect();
        if !selected.is_empty() {
            return selected;
        }

        let hit = |area: Option<Rect>| area.is_some_and(|a| event::contains(a, column, row));

        if hit(self.locate_area) {
            return if props.busy {
                vec![]
            } else {
                vec![Action::LocationRequest]
            };
        }
        if hit(self.input_area) {
            return vec![Action::SearchFocus];
        }
        if props.is_focused || props.search.is_visible() {
            return vec![Action::SearchBlur];
        }
        vec![]
    }
}

fn visible_labels(search: &LocationSearch) -> Vec<String> {
    if search.is_visible() {
        search.suggestions().labels()
    } else {
        vec![]
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        if let Some((column, row)) = event.left_click() {
            return self.handle_click(event, column, row, &props);
        }

        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
            return if props.busy {
                vec![]
            } else {
                vec![Action::LocationRequest]
            };
        }

        let nav = match key.code {
            KeyCode::Down => Some(SearchKey::Down),
            KeyCode::Up => Some(SearchKey::Up),
            KeyCode::Esc => Some(SearchKey::Escape),
            _ => None,
        };
        if let Some(nav) = nav {
            return vec![Action::SearchKey(nav)];
        }

        let input_props = Self::input_props(&props);
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    /// `area` runs from the bar down to the lowest row the dropdown may use.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: SearchBarProps<'_>) {
        let bar = Rect {
            height: Self::HEIGHT.min(area.height),
            ..area
        };
        let [input_area, locate_area] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(Self::LOCATE_WIDTH)])
                .areas(bar);

        self.input_area = Some(input_area);
        self.locate_area = Some(locate_area);

        let input_props = Self::input_props(&props);
        self.input.render(frame, input_area, input_props);

        let locate_style = if props.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(props.accent)
        };
        let button = Paragraph::new(Line::from(format!("{LOCATION_ICON}Locate")).centered())
            .style(locate_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(button, locate_area);

        let labels = visible_labels(props.search);
        let below = area.height.saturating_sub(bar.height);
        let dropdown_area = Rect {
            y: bar.y + bar.height,
            height: SuggestionList::height_for(labels.len()).min(below),
            ..input_area
        };
        self.dropdown.render(
            frame,
            dropdown_area,
            SuggestionListProps {
                items: &labels,
                highlight: props.search.highlight(),
                accent: props.accent,
                on_select: Action::SearchSelect,
            },
        );

        if props.is_focused && !labels.is_empty() {
            let hint = Line::from(" ↑↓ choose · Enter search · Esc close ")
                .dark_gray()
                .right_aligned();
            let hint_row = Rect {
                y: dropdown_area.bottom().saturating_sub(1),
                height: 1,
                ..dropdown_area
            };
            if dropdown_area.height > 2 {
                frame.render_widget(Paragraph::new(hint), hint_row);
            }
        }
    }
}
