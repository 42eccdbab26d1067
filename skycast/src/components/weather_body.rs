use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{
    Component, CurrentCard, CurrentCardProps, ERROR_ICON, ForecastCard, ForecastCardProps,
    LocationHeader, LocationHeaderProps, SPINNERS,
};
use crate::action::Action;
use crate::provider::WeatherReport;
use crate::state::AppState;

/// Cards never grow wider than this
const MAX_CARD_WIDTH: u16 = 72;

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let blocks = blocks_for_state(state);

        let constraints = blocks.iter().map(|block| Constraint::Length(block.height()));
        let chunks = Layout::vertical(constraints).flex(Flex::Center).split(area);

        for (block, area) in blocks.into_iter().zip(chunks.iter().copied()) {
            block.render(frame, area, state);
        }
    }
}

enum WeatherView<'a> {
    Locating,
    Loading,
    Error(&'a str),
    Ready(&'a WeatherReport),
    Welcome,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if state.is_locating {
            WeatherView::Locating
        } else if state.is_loading {
            WeatherView::Loading
        } else if let Some(error) = state.error.as_deref() {
            WeatherView::Error(error)
        } else if let Some(report) = state.weather.as_ref() {
            WeatherView::Ready(report)
        } else {
            WeatherView::Welcome
        }
    }
}

enum BodyBlock<'a> {
    Line(Line<'static>),
    Header(&'a WeatherReport),
    Current(&'a WeatherReport),
    Forecast(&'a WeatherReport),
}

impl BodyBlock<'_> {
    fn height(&self) -> u16 {
        match self {
            BodyBlock::Line(_) => 1,
            BodyBlock::Header(_) => LocationHeader::HEIGHT,
            BodyBlock::Current(_) => CurrentCard::HEIGHT,
            BodyBlock::Forecast(report) => ForecastCard::height_for(report.forecast.len()),
        }
    }

    fn render(self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = state.theme();
        match self {
            BodyBlock::Line(line) => {
                frame.render_widget(Paragraph::new(line), area);
            }
            BodyBlock::Header(report) => {
                LocationHeader.render(
                    frame,
                    area,
                    LocationHeaderProps {
                        place: &report.current.place,
                        primary: theme.primary_text,
                        secondary: theme.secondary_text,
                    },
                );
            }
            BodyBlock::Current(report) => {
                CurrentCard.render(
                    frame,
                    card_area(area),
                    CurrentCardProps {
                        current: &report.current,
                        unit: state.unit,
                        theme,
                    },
                );
            }
            BodyBlock::Forecast(report) => {
                ForecastCard.render(
                    frame,
                    card_area(area),
                    ForecastCardProps {
                        days: &report.forecast,
                        today: report.local_date(),
                        unit: state.unit,
                        theme,
                    },
                );
            }
        }
    }
}

fn card_area(area: Rect) -> Rect {
    let [card] = Layout::horizontal([Constraint::Length(MAX_CARD_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    card
}

fn blocks_for_state(state: &AppState) -> Vec<BodyBlock<'_>> {
    let hint = |key: &'static str| Span::styled(key, Style::default().fg(Color::Cyan).bold());
    let dim = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

    match WeatherView::from_state(state) {
        WeatherView::Locating => vec![busy_line(state, "Finding your location")],
        WeatherView::Loading => vec![busy_line(state, "Getting weather data")],
        WeatherView::Error(error) => {
            let mut actions = vec![dim("Press ")];
            if state.last_query.is_some() {
                actions.extend([hint("r"), dim(" to retry, ")]);
            }
            actions.extend([
                hint("l"),
                dim(" for your location or "),
                hint("/"),
                dim(" to search"),
            ]);

            vec![
                BodyBlock::Line(Line::from(ERROR_ICON).centered()),
                BodyBlock::Line(
                    Line::from(Span::styled(
                        "Unable to get weather data",
                        Style::default().fg(Color::Red).bold(),
                    ))
                    .centered(),
                ),
                BodyBlock::Line(
                    Line::from(Span::styled(
                        error.to_string(),
                        Style::default().fg(Color::Rgb(240, 160, 160)),
                    ))
                    .centered(),
                ),
                blank_line(),
                BodyBlock::Line(Line::from(actions).centered()),
            ]
        }
        WeatherView::Ready(report) => {
            let mut blocks = vec![
                BodyBlock::Header(report),
                blank_line(),
                BodyBlock::Current(report),
            ];
            if !report.forecast.is_empty() {
                blocks.push(BodyBlock::Forecast(report));
            }
            blocks
        }
        WeatherView::Welcome => vec![
            BodyBlock::Line(
                Line::from(Span::styled(
                    "Welcome to skycast",
                    Style::default().fg(Color::White).bold(),
                ))
                .centered(),
            ),
            BodyBlock::Line(
                Line::from(dim(
                    "Search for a city or use your current location to get started.",
                ))
                .centered(),
            ),
            blank_line(),
            BodyBlock::Line(
                Line::from(vec![
                    dim("Press "),
                    hint("/"),
                    dim(" to search or "),
                    hint("l"),
                    dim(" to use your current location"),
                ])
                .centered(),
            ),
        ],
    }
}

fn busy_line(state: &AppState, text: &str) -> BodyBlock<'static> {
    let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
    let dots = ".".repeat((state.tick_count as usize / 3) % 4);

    BodyBlock::Line(
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {text}{dots:<3}"), Style::default().fg(Color::Gray)),
        ])
        .centered(),
    )
}

fn blank_line() -> BodyBlock<'static> {
    BodyBlock::Line(Line::from("").centered())
}
