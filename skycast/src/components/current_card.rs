//! Current conditions card

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::provider::CurrentConditions;
use crate::state::TempUnit;
use crate::theme::{self, ThemeDescriptor};

pub struct CurrentCard;

pub struct CurrentCardProps<'a> {
    pub current: &'a CurrentConditions,
    pub unit: TempUnit,
    pub theme: &'a ThemeDescriptor,
}

impl CurrentCard {
    pub const HEIGHT: u16 = 8;
}

impl Component<Action> for CurrentCard {
    type Props<'a> = CurrentCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let c = props.current;
        let t = props.theme;
        let unit = props.unit;

        let label = |text: &str| Span::styled(text.to_string(), Style::default().fg(t.secondary_text));
        let value = |text: String| Span::styled(text, Style::default().fg(t.primary_text).bold());

        let icon = theme::classify_kind(&c.condition).icon();
        let day_part = if c.is_day { "day" } else { "night" };

        let lines = vec![
            Line::from(vec![
                Span::raw(format!("{icon}  ")),
                Span::styled(
                    unit.format(c.temp_c),
                    Style::default().fg(temp_to_color(c.temp_c)).bold(),
                ),
                Span::styled(format!("  {}", c.condition), Style::default().fg(t.primary_text)),
            ])
            .centered(),
            Line::from(vec![
                label("Feels like "),
                value(unit.format(c.feelslike_c)),
                label(&format!(" · {day_part}")),
            ])
            .centered(),
            Line::from(""),
            Line::from(vec![
                label("Humidity "),
                value(format!("{}%", c.humidity)),
                label("   Wind "),
                value(format!("{:.0} km/h {}", c.wind_kph, c.wind_dir)),
                label("   Pressure "),
                value(format!("{:.0} mb", c.pressure_mb)),
            ])
            .centered(),
            Line::from(vec![
                label("Visibility "),
                value(format!("{:.0} km", c.vis_km)),
                label("   UV "),
                value(format!("{:.0}", c.uv)),
                label("   Updated "),
                value(
                    c.last_updated
                        .map(|at| at.format("%H:%M").to_string())
                        .unwrap_or_else(|| "-".into()),
                ),
            ])
            .centered(),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(t.accent))
            .title(" Now ")
            .style(Style::default().bg(t.card_background));

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Temperature-based colour
pub fn temp_to_color(celsius: f32) -> Color {
    match celsius as i32 {
        ..=-10 => Color::Rgb(150, 200, 255),  // Very cold - light blue
        -9..=0 => Color::Rgb(100, 180, 255),  // Cold - blue
        1..=10 => Color::Rgb(100, 220, 200),  // Cool - cyan
        11..=20 => Color::Rgb(150, 230, 150), // Mild - green
        21..=30 => Color::Rgb(255, 220, 100), // Warm - yellow
        31..=40 => Color::Rgb(255, 150, 80),  // Hot - orange
        _ => Color::Rgb(255, 100, 100),       // Very hot - red
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Place;
    use chrono::NaiveDate;
    use skycast_core::testing::RenderHarness;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            place: Place {
                name: "Oslo".into(),
                region: "Oslo".into(),
                country: "Norway".into(),
                latitude: 59.91,
                longitude: 10.75,
                localtime: None,
            },
            temp_c: -3.4,
            feelslike_c: -8.0,
            condition: "Light snow".into(),
            is_day: false,
            humidity: 86,
            wind_kph: 19.1,
            wind_dir: "NNE".into(),
            pressure_mb: 1003.0,
            vis_km: 4.0,
            uv: 1.0,
            last_updated: NaiveDate::from_ymd_opt(2024, 1, 10).and_then(|d| d.and_hms_opt(7, 45, 0)),
        }
    }

    fn draw(unit: TempUnit) -> String {
        let current = conditions();
        let mut render = RenderHarness::new(70, CurrentCard::HEIGHT);
        render.render_to_string_plain(|frame| {
            CurrentCard.render(
                frame,
                frame.area(),
                CurrentCardProps {
                    current: &current,
                    unit,
                    theme: theme::classify(&current.condition),
                },
            );
        })
    }

    #[test]
    fn test_render_celsius() {
        let output = draw(TempUnit::Celsius);
        assert!(output.contains("-3°C"));
        assert!(output.contains("Light snow"));
        assert!(output.contains("Feels like -8°C · night"));
        assert!(output.contains("Humidity 86%"));
        assert!(output.contains("19 km/h NNE"));
        assert!(output.contains("1003 mb"));
        assert!(output.contains("Updated 07:45"));
    }

    #[test]
    fn test_render_fahrenheit() {
        let output = draw(TempUnit::Fahrenheit);
        assert!(output.contains("26°F"));
    }

    #[test]
    fn test_temp_colors() {
        assert_eq!(temp_to_color(-15.0), Color::Rgb(150, 200, 255));
        assert_eq!(temp_to_color(25.0), Color::Rgb(255, 220, 100));
        assert_eq!(temp_to_color(45.0), Color::Rgb(255, 100, 100));
    }
}
