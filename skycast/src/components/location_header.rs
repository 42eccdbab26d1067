use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, LOCATION_ICON};
use crate::action::Action;
use crate::provider::Place;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub place: &'a Place,
    pub primary: Color,
    pub secondary: Color,
}

impl LocationHeader {
    pub const HEIGHT: u16 = 2;
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        let place = props.place;

        let location_line = Line::from(vec![
            Span::raw(LOCATION_ICON),
            Span::styled(place.label(), Style::default().fg(props.primary).bold()),
        ])
        .centered();
        frame.render_widget(Paragraph::new(location_line), chunks[0]);

        let mut details = vec![];
        if !place.region.is_empty() {
            details.push(place.region.clone());
        }
        details.push(coordinates(place.latitude, place.longitude));
        if let Some(local) = place.localtime {
            details.push(format!("local {}", local.format("%a %H:%M")));
        }

        let details_line = Line::from(Span::styled(
            details.join(" · "),
            Style::default().fg(props.secondary),
        ))
        .centered();
        frame.render_widget(Paragraph::new(details_line), chunks[1]);
    }
}

fn coordinates(lat: f64, lon: f64) -> String {
    let ns = if lat < 0.0 { 'S' } else { 'N' };
    let ew = if lon < 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{ns}, {:.2}°{ew}", lat.abs(), lon.abs())
}
