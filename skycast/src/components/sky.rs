//! Background gradient and animated weather particles
//!
//! Particles are placed by hashing their index, so a given tick always draws
//! the same picture. Content rendered on top replaces them; cards clear
//! their area first.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Block,
};

use super::Component;
use crate::action::Action;
use crate::theme::{Intensity, ThemeDescriptor};

pub struct SkyProps<'a> {
    pub theme: &'a ThemeDescriptor,
    pub tick: u32,
    /// Draw particles (otherwise only the gradient)
    pub animate: bool,
}

#[derive(Default)]
pub struct Sky;

impl Component<Action> for Sky {
    type Props<'a> = SkyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: SkyProps<'_>) {
        let [top, mid, bottom] = props.theme.background_gradient;
        let top = if props.animate && flashing(props.theme.effects.lightning, props.tick) {
            Color::Rgb(235, 235, 255)
        } else {
            top
        };

        let bands = Layout::vertical([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
        for (band, color) in bands.iter().zip([top, mid, bottom]) {
            frame.render_widget(Block::default().style(Style::default().bg(color)), *band);
        }

        if !props.animate || area.is_empty() {
            return;
        }

        let effects = props.theme.effects;
        let fg = props.theme.secondary_text;
        let tick = props.tick;
        let mut layer = Layer { frame, area };

        // Fog first so falling particles stay visible on top
        for i in 0..count(area, effects.fog, 30) {
            let x = scatter(i, 1).wrapping_add(tick / 4);
            layer.put(x, scatter(i, 2), "░", fg);
        }
        for i in 0..count(area, effects.wind, 60) {
            let x = scatter(i, 3).wrapping_add(tick.wrapping_mul(2));
            layer.put(x, scatter(i, 4), "~", fg);
        }
        for i in 0..count(area, effects.rain, 25) {
            let y = scatter(i, 5).wrapping_add(tick);
            let drop = if effects.rain == Intensity::Heavy { "│" } else { "╎" };
            layer.put(scatter(i, 6), y, drop, fg);
        }
        for i in 0..count(area, effects.snow, 30) {
            let drift = (tick / 3 + i) % 3;
            let y = scatter(i, 7).wrapping_add(tick / 2);
            let flake = if i % 2 == 0 { "*" } else { "·" };
            layer.put(scatter(i, 8).wrapping_add(drift), y, flake, Color::White);
        }
        for i in 0..count(area, effects.sun, 150) {
            // Twinkle in the top third
            if (tick / 2 + i) % 6 < 3 {
                let y = scatter(i, 9) % (u32::from(area.height) / 3).max(1);
                layer.put(scatter(i, 10), y, "✦", props.theme.accent);
            }
        }
    }
}

struct Layer<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
}

impl Layer<'_, '_> {
    fn put(&mut self, x: u32, y: u32, symbol: &str, fg: Color) {
        let x = self.area.x + (x % u32::from(self.area.width)) as u16;
        let y = self.area.y + (y % u32::from(self.area.height)) as u16;
        if let Some(cell) = self.frame.buffer_mut().cell_mut((x, y)) {
            cell.set_symbol(symbol).set_fg(fg);
        }
    }
}

/// Particle count for an effect: one per `cells_per_particle` at moderate
/// strength, half as many when light, twice as many when heavy.
fn count(area: Rect, intensity: Intensity, cells_per_particle: u32) -> u32 {
    let cells = u32::from(area.width) * u32::from(area.height);
    let base = cells / cells_per_particle;
    match intensity {
        Intensity::Off => 0,
        Intensity::Light => base / 2,
        Intensity::Moderate => base,
        Intensity::Heavy => base * 2,
    }
}

fn flashing(lightning: Intensity, tick: u32) -> bool {
    let period = match lightning {
        Intensity::Off => return false,
        Intensity::Light => 60,
        Intensity::Moderate => 40,
        Intensity::Heavy => 25,
    };
    tick % period < 2
}

// Integer hash (lowbias32)
fn scatter(i: u32, salt: u32) -> u32 {
    let mut x = i.wrapping_mul(0x9e37_79b9) ^ salt.wrapping_mul(0x85eb_ca6b);
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeKind, classify};
    use skycast_core::testing::RenderHarness;

    fn draw(kind: ThemeKind, tick: u32, animate: bool) -> String {
        let mut render = RenderHarness::new(40, 12);
        let mut sky = Sky;
        render.render_to_string_plain(|frame| {
            sky.render(
                frame,
                frame.area(),
                SkyProps {
                    theme: kind.descriptor(),
                    tick,
                    animate,
                },
            );
        })
    }

    #[test]
    fn test_gradient_only_when_still() {
        let output = draw(ThemeKind::HeavyRain, 3, false);
        assert_eq!(output.trim(), "");
    }

    #[test]
    fn test_rain_draws_drops() {
        let output = draw(ThemeKind::HeavyRain, 3, true);
        assert!(output.contains('│'));
    }

    #[test]
    fn test_snow_draws_flakes() {
        let output = draw(ThemeKind::Blizzard, 0, true);
        assert!(output.contains('*') || output.contains('·'));
    }

    #[test]
    fn test_same_tick_same_picture() {
        assert_eq!(
            draw(ThemeKind::Rainy, 7, true),
            draw(ThemeKind::Rainy, 7, true)
        );
    }

    #[test]
    fn test_rain_moves() {
        assert_ne!(
            draw(ThemeKind::Rainy, 1, true),
            draw(ThemeKind::Rainy, 2, true)
        );
    }

    #[test]
    fn test_background_uses_gradient() {
        let theme = classify("Sunny");
        let mut render = RenderHarness::new(10, 9);
        let mut sky = Sky;
        let buffer = render.render(|frame| {
            sky.render(
                frame,
                frame.area(),
                SkyProps {
                    theme,
                    tick: 0,
                    animate: false,
                },
            );
        });

        assert_eq!(buffer[(0, 0)].bg, theme.background_gradient[0]);
        assert_eq!(buffer[(0, 4)].bg, theme.background_gradient[1]);
        assert_eq!(buffer[(0, 8)].bg, theme.background_gradient[2]);
    }

    #[test]
    fn test_lightning_flashes_periodically() {
        assert!(flashing(Intensity::Heavy, 25));
        assert!(!flashing(Intensity::Heavy, 5));
        assert!(!flashing(Intensity::Off, 0));
    }

    #[test]
    fn test_count_scales_with_intensity() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(count(area, Intensity::Off, 20), 0);
        assert!(count(area, Intensity::Light, 20) < count(area, Intensity::Heavy, 20));
    }
}
