use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub struct HelpBar;

pub struct HelpBarProps {
    /// Show the search bar's keys instead of the global ones
    pub search_focused: bool,
    pub accent: Color,
}

impl HelpBar {
    fn hints(search_focused: bool) -> &'static [(&'static str, &'static str)] {
        if search_focused {
            &[
                ("↑↓", "choose"),
                ("Enter", "search"),
                ("Esc", "close"),
                ("Ctrl+L", "my location"),
            ]
        } else {
            &[
                ("/", "search"),
                ("l", "my location"),
                ("r", "refresh"),
                ("u", "units"),
                ("q", "quit"),
            ]
        }
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();
        for (i, (key, label)) in Self::hints(props.search_focused).iter().enumerate() {
            let lead = if i == 0 { " " } else { "  " };
            spans.push(Span::styled(
                format!("{lead}{key}"),
                Style::default().fg(props.accent).bold(),
            ));
            spans.push(Span::styled(
                format!(" {label}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::RenderHarness;

    fn draw(search_focused: bool) -> String {
        let mut render = RenderHarness::new(70, 1);
        render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    search_focused,
                    accent: Color::Cyan,
                },
            );
        })
    }

    #[test]
    fn test_global_hints() {
        let output = draw(false);
        assert!(output.contains("/ search"));
        assert!(output.contains("r refresh"));
        assert!(output.contains("q quit"));
    }

    #[test]
    fn test_search_hints() {
        let output = draw(true);
        assert!(output.contains("Esc close"));
        assert!(output.contains("Ctrl+L my location"));
        assert!(!output.contains("q quit"));
    }
}
