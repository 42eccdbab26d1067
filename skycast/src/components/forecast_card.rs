//! Daily forecast card, one row per day

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table},
};

use super::Component;
use crate::action::Action;
use crate::provider::ForecastDay;
use crate::state::TempUnit;
use crate::theme::{self, ThemeDescriptor};

pub struct ForecastCard;

pub struct ForecastCardProps<'a> {
    pub days: &'a [ForecastDay],
    /// Local date at the place; labels "Today" and "Tomorrow"
    pub today: Option<NaiveDate>,
    pub unit: TempUnit,
    pub theme: &'a ThemeDescriptor,
}

impl ForecastCard {
    pub fn height_for(days: usize) -> u16 {
        days as u16 + 2
    }
}

/// "Today", "Tomorrow" or the short weekday name.
pub fn day_label(date: NaiveDate, today: Option<NaiveDate>) -> String {
    match today.map(|t| (date - t).num_days()) {
        Some(0) => "Today".to_string(),
        Some(1) => "Tomorrow".to_string(),
        _ => date.format("%a").to_string(),
    }
}

impl Component<Action> for ForecastCard {
    type Props<'a> = ForecastCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let t = props.theme;
        let unit = props.unit;
        let secondary = Style::default().fg(t.secondary_text);
        let primary = Style::default().fg(t.primary_text);

        let rows = props.days.iter().map(|day| {
            let icon = theme::classify_kind(&day.condition).icon();
            let rain = if day.daily_chance_of_rain > 0 {
                format!("{}% rain", day.daily_chance_of_rain)
            } else {
                String::new()
            };
            let temps = Line::from(vec![
                Span::styled(
                    format!("{:.0}°", unit.convert(day.maxtemp_c)),
                    primary.bold(),
                ),
                Span::styled(format!(" / {:.0}°", unit.convert(day.mintemp_c)), secondary),
            ])
            .right_aligned();

            Row::new(vec![
                Cell::from(Span::styled(day_label(day.date, props.today), primary.bold())),
                Cell::from(Span::styled(day.date.format("%b %d").to_string(), secondary)),
                Cell::from(Span::styled(format!("{icon} {}", day.condition), primary)),
                Cell::from(Span::styled(rain, Style::default().fg(t.accent))),
                Cell::from(temps),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Min(12),
                Constraint::Length(9),
                Constraint::Length(10),
            ],
        )
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(t.accent))
                .title(format!(" {}-Day Forecast ", props.days.len()))
                .style(Style::default().bg(t.card_background)),
        );

        frame.render_widget(Clear, area);
        frame.render_widget(table, area);
    }
}
