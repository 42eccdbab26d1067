//! Root component: sky, search bar, weather body and key hints
//!
//! Key presses go to the search bar while it has focus and to the global
//! shortcuts otherwise. Clicks always go to the search bar, which decides
//! between selecting, focusing and blurring.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::{Frame, Rect};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use skycast_core::EventKind;

use super::{
    Component, HelpBar, HelpBarProps, SearchBar, SearchBarProps, Sky, SkyProps, WeatherBody,
    WeatherBodyProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const LOCATION_ICON: &str = "📍 ";
pub const ERROR_ICON: &str = "⚠️";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub const ATTRIBUTION: &str = "Powered by WeatherAPI.com";

pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
    sky: Sky,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props(state: &AppState) -> SearchBarProps<'_> {
        SearchBarProps {
            search: &state.search,
            is_focused: state.search_focused,
            busy: state.is_busy(),
            accent: state.theme().accent,
        }
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        let state = props.state;

        if event.is_interrupt() {
            return vec![Action::Quit];
        }
        if state.search_focused || event.left_click().is_some() {
            return self.search.handle_event(event, Self::search_props(state));
        }

        let EventKind::Key(key) = event else {
            return vec![];
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('l') if !state.is_busy() => vec![Action::LocationRequest],
            _ if ctrl => vec![],
            KeyCode::Char('/') | KeyCode::Char('s') => vec![Action::SearchFocus],
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::WeatherRefresh],
            KeyCode::Char('u') => vec![Action::UiToggleUnits],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let theme = state.theme();

        self.sky.render(
            frame,
            area,
            SkyProps {
                theme,
                tick: state.tick_count,
                animate: state.weather.is_some() && !state.is_busy(),
            },
        );

        let busy_indicator = if state.is_busy() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" {} ", spinner)
        } else {
            String::new()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.secondary_text))
            .title(format!(" ☁ skycast{} ", busy_indicator))
            .title_style(Style::default().fg(theme.accent).bold())
            .title_alignment(Alignment::Center);

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let [search_area, body_area, help_area, footer_area] = Layout::vertical([
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        WeatherBody.render(frame, body_area, WeatherBodyProps { state });

        HelpBar.render(
            frame,
            help_area,
            HelpBarProps {
                search_focused: state.search_focused,
                accent: theme.accent,
            },
        );

        let footer = Line::from(ATTRIBUTION)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(Paragraph::new(footer), footer_area);

        // Last, so the dropdown covers the body
        let search_and_body = Rect {
            height: search_area.height + body_area.height,
            ..search_area
        };
        self.search
            .render(frame, search_and_body, Self::search_props(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::*;

    fn events(state: &AppState, k: &str) -> Vec<Action> {
        let mut component = WeatherDisplay::new();
        component.handle_event(&EventKind::Key(key(k)), WeatherDisplayProps { state })
    }

    #[test]
    fn test_handle_event_refresh() {
        let state = AppState::default();
        let actions = events(&state, "r");
        actions.assert_count(1);
        actions.assert_first(Action::WeatherRefresh);
    }

    #[test]
    fn test_handle_event_quit() {
        let state = AppState::default();
        events(&state, "q").assert_first(Action::Quit);
        events(&state, "esc").assert_first(Action::Quit);
        events(&state, "ctrl+c").assert_first(Action::Quit);
    }

    #[test]
    fn test_slash_focuses_search() {
        let state = AppState::default();
        events(&state, "/").assert_first(Action::SearchFocus);
    }

    #[test]
    fn test_location_key_ignored_while_busy() {
        let state = AppState::default();
        events(&state, "l").assert_first(Action::LocationRequest);

        let busy = AppState {
            is_loading: true,
            ..Default::default()
        };
        events(&busy, "l").assert_empty();
    }

    #[test]
    fn test_focused_search_takes_keys() {
        let state = AppState {
            search_focused: true,
            ..Default::default()
        };
        // Typed into the query instead of quitting
        events(&state, "q").assert_first(Action::SearchInput("q".into()));
        events(&state, "esc").assert_first(Action::SearchKey(crate::search::SearchKey::Escape));
        events(&state, "ctrl+c").assert_first(Action::Quit);
    }

    #[test]
    fn test_render_welcome() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = WeatherDisplay::new();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), WeatherDisplayProps { state: &state });
        });

        assert!(output.contains("skycast"));
        assert!(output.contains("Welcome to skycast"));
        assert!(output.contains("Search for a city..."));
        assert!(output.contains(ATTRIBUTION));
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = WeatherDisplay::new();
        let state = AppState {
            is_loading: true,
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), WeatherDisplayProps { state: &state });
        });

        assert!(output.contains("Getting weather data"));
    }
}
