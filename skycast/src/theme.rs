//! Condition text to visual theme
//!
//! [`classify`] walks [`RULES`] top to bottom and returns the descriptor of
//! the first rule whose keywords appear in the lower-cased condition text.
//! Adding a condition means adding a row, not a branch.

use ratatui::style::Color;

/// Named visual themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    Thunderstorm,
    HeavyThunderstorm,
    Sunny,
    PartlyCloudy,
    Cloudy,
    Overcast,
    Rainy,
    LightRain,
    HeavyRain,
    Snowy,
    Blizzard,
    Foggy,
    Windy,
    Clear,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 14] = [
        ThemeKind::Thunderstorm,
        ThemeKind::HeavyThunderstorm,
        ThemeKind::Sunny,
        ThemeKind::PartlyCloudy,
        ThemeKind::Cloudy,
        ThemeKind::Overcast,
        ThemeKind::Rainy,
        ThemeKind::LightRain,
        ThemeKind::HeavyRain,
        ThemeKind::Snowy,
        ThemeKind::Blizzard,
        ThemeKind::Foggy,
        ThemeKind::Windy,
        ThemeKind::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Thunderstorm => "thunderstorm",
            ThemeKind::HeavyThunderstorm => "heavy-thunderstorm",
            ThemeKind::Sunny => "sunny",
            ThemeKind::PartlyCloudy => "partly-cloudy",
            ThemeKind::Cloudy => "cloudy",
            ThemeKind::Overcast => "overcast",
            ThemeKind::Rainy => "rainy",
            ThemeKind::LightRain => "light-rain",
            ThemeKind::HeavyRain => "heavy-rain",
            ThemeKind::Snowy => "snowy",
            ThemeKind::Blizzard => "blizzard",
            ThemeKind::Foggy => "foggy",
            ThemeKind::Windy => "windy",
            ThemeKind::Clear => "clear",
        }
    }

    /// Single-cell glyph shown next to a condition.
    pub fn icon(self) -> &'static str {
        match self {
            ThemeKind::Thunderstorm | ThemeKind::HeavyThunderstorm => "⛈",
            ThemeKind::Sunny | ThemeKind::Clear => "☀",
            ThemeKind::PartlyCloudy => "⛅",
            ThemeKind::Cloudy | ThemeKind::Overcast => "☁",
            ThemeKind::Rainy | ThemeKind::LightRain | ThemeKind::HeavyRain => "☂",
            ThemeKind::Snowy | ThemeKind::Blizzard => "❄",
            ThemeKind::Foggy => "≋",
            ThemeKind::Windy => "≈",
        }
    }

    pub fn descriptor(self) -> &'static ThemeDescriptor {
        match self {
            ThemeKind::Thunderstorm => &THUNDERSTORM,
            ThemeKind::HeavyThunderstorm => &HEAVY_THUNDERSTORM,
            ThemeKind::Sunny => &SUNNY,
            ThemeKind::PartlyCloudy => &PARTLY_CLOUDY,
            ThemeKind::Cloudy => &CLOUDY,
            ThemeKind::Overcast => &OVERCAST,
            ThemeKind::Rainy => &RAINY,
            ThemeKind::LightRain => &LIGHT_RAIN,
            ThemeKind::HeavyRain => &HEAVY_RAIN,
            ThemeKind::Snowy => &SNOWY,
            ThemeKind::Blizzard => &BLIZZARD,
            ThemeKind::Foggy => &FOGGY,
            ThemeKind::Windy => &WINDY,
            ThemeKind::Clear => &CLEAR,
        }
    }
}

/// Strength of an animated effect. `Off` is a disabled effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    #[default]
    Off,
    Light,
    Moderate,
    Heavy,
}

impl Intensity {
    pub fn is_on(self) -> bool {
        self != Intensity::Off
    }
}

/// Animated effects enabled by a theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeEffects {
    pub lightning: Intensity,
    pub rain: Intensity,
    pub snow: Intensity,
    pub sun: Intensity,
    pub fog: Intensity,
    pub wind: Intensity,
}

impl ThemeEffects {
    const NONE: ThemeEffects = ThemeEffects {
        lightning: Intensity::Off,
        rain: Intensity::Off,
        snow: Intensity::Off,
        sun: Intensity::Off,
        fog: Intensity::Off,
        wind: Intensity::Off,
    };

    /// Whether any effect is on.
    pub fn any(&self) -> bool {
        [
            self.lightning,
            self.rain,
            self.snow,
            self.sun,
            self.fog,
            self.wind,
        ]
        .into_iter()
        .any(Intensity::is_on)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub kind: ThemeKind,
    /// Top, middle and bottom stops of the screen background
    pub background_gradient: [Color; 3],
    pub card_background: Color,
    pub primary_text: Color,
    pub secondary_text: Color,
    pub accent: Color,
    pub effects: ThemeEffects,
}

enum Matcher {
    /// Every keyword must appear
    All(&'static [&'static str]),
    /// At least one keyword must appear
    Any(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::All(words) => words.iter().all(|w| text.contains(w)),
            Matcher::Any(words) => words.iter().any(|w| text.contains(w)),
        }
    }
}

struct Rule {
    matcher: Matcher,
    kind: ThemeKind,
}

// "cloud" precedes "partly" + "cloud", so partly-cloudy never matches. The
// order is kept as observed.
const RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::All(&["thunder", "heavy"]),
        kind: ThemeKind::HeavyThunderstorm,
    },
    Rule {
        matcher: Matcher::Any(&["thunder"]),
        kind: ThemeKind::Thunderstorm,
    },
    Rule {
        matcher: Matcher::Any(&["blizzard"]),
        kind: ThemeKind::Blizzard,
    },
    Rule {
        matcher: Matcher::Any(&["snow"]),
        kind: ThemeKind::Snowy,
    },
    Rule {
        matcher: Matcher::Any(&["heavy rain", "torrential"]),
        kind: ThemeKind::HeavyRain,
    },
    Rule {
        matcher: Matcher::Any(&["light rain", "drizzle"]),
        kind: ThemeKind::LightRain,
    },
    Rule {
        matcher: Matcher::Any(&["rain"]),
        kind: ThemeKind::Rainy,
    },
    Rule {
        matcher: Matcher::Any(&["overcast"]),
        kind: ThemeKind::Overcast,
    },
    Rule {
        matcher: Matcher::Any(&["cloudy", "cloud"]),
        kind: ThemeKind::Cloudy,
    },
    Rule {
        matcher: Matcher::All(&["partly", "cloud"]),
        kind: ThemeKind::PartlyCloudy,
    },
    Rule {
        matcher: Matcher::Any(&["fog", "mist"]),
        kind: ThemeKind::Foggy,
    },
    Rule {
        matcher: Matcher::Any(&["wind"]),
        kind: ThemeKind::Windy,
    },
    Rule {
        matcher: Matcher::Any(&["clear", "sunny"]),
        kind: ThemeKind::Sunny,
    },
];

/// Theme kind for a condition such as "Patchy light rain".
pub fn classify_kind(condition: &str) -> ThemeKind {
    let text = condition.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&text))
        .map_or(ThemeKind::Clear, |rule| rule.kind)
}

/// Theme descriptor for a condition. Unknown text gets the clear theme.
pub fn classify(condition: &str) -> &'static ThemeDescriptor {
    classify_kind(condition).descriptor()
}

mod palette {
    use ratatui::style::Color;

    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);

    pub const PURPLE_200: Color = Color::Rgb(233, 213, 255);
    pub const PURPLE_300: Color = Color::Rgb(216, 180, 254);
    pub const PURPLE_800: Color = Color::Rgb(107, 33, 168);
    pub const PURPLE_900: Color = Color::Rgb(88, 28, 135);
    pub const INDIGO_900: Color = Color::Rgb(49, 46, 129);

    pub const AMBER_400: Color = Color::Rgb(251, 191, 36);
    pub const ORANGE_500: Color = Color::Rgb(249, 115, 22);
    pub const RED_500: Color = Color::Rgb(239, 68, 68);
    pub const YELLOW_100: Color = Color::Rgb(254, 249, 195);
    pub const YELLOW_400: Color = Color::Rgb(250, 204, 21);

    pub const SKY_100: Color = Color::Rgb(224, 242, 254);
    pub const SKY_400: Color = Color::Rgb(56, 189, 248);
    pub const SKY_500: Color = Color::Rgb(14, 165, 233);
    pub const SKY_600: Color = Color::Rgb(2, 132, 199);

    pub const BLUE_100: Color = Color::Rgb(219, 234, 254);
    pub const BLUE_200: Color = Color::Rgb(191, 219, 254);
    pub const BLUE_300: Color = Color::Rgb(147, 197, 253);
    pub const BLUE_400: Color = Color::Rgb(96, 165, 250);
    pub const BLUE_500: Color = Color::Rgb(59, 130, 246);
    pub const BLUE_600: Color = Color::Rgb(37, 99, 235);
    pub const BLUE_700: Color = Color::Rgb(29, 78, 216);
    pub const BLUE_900: Color = Color::Rgb(30, 58, 138);

    pub const GRAY_200: Color = Color::Rgb(229, 231, 235);
    pub const GRAY_300: Color = Color::Rgb(209, 213, 219);
    pub const GRAY_400: Color = Color::Rgb(156, 163, 175);
    pub const GRAY_500: Color = Color::Rgb(107, 114, 128);
    pub const GRAY_600: Color = Color::Rgb(75, 85, 99);
    pub const GRAY_700: Color = Color::Rgb(55, 65, 81);
    pub const GRAY_800: Color = Color::Rgb(31, 41, 55);

    pub const SLATE_300: Color = Color::Rgb(203, 213, 225);
    pub const SLATE_400: Color = Color::Rgb(148, 163, 184);
    pub const SLATE_500: Color = Color::Rgb(100, 116, 139);
    pub const SLATE_600: Color = Color::Rgb(71, 85, 105);
    pub const SLATE_700: Color = Color::Rgb(51, 65, 85);
    pub const SLATE_800: Color = Color::Rgb(30, 41, 59);
    pub const SLATE_900: Color = Color::Rgb(15, 23, 42);

    pub const TEAL_100: Color = Color::Rgb(204, 251, 241);
    pub const TEAL_500: Color = Color::Rgb(20, 184, 166);
}

use palette::*;
use Intensity::{Heavy, Light, Moderate};

static THUNDERSTORM: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Thunderstorm,
    background_gradient: [PURPLE_900, PURPLE_800, INDIGO_900],
    card_background: PURPLE_900,
    primary_text: WHITE,
    secondary_text: PURPLE_200,
    accent: PURPLE_200,
    effects: ThemeEffects {
        lightning: Moderate,
        rain: Moderate,
        ..ThemeEffects::NONE
    },
};

static HEAVY_THUNDERSTORM: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::HeavyThunderstorm,
    background_gradient: [SLATE_900, PURPLE_900, BLACK],
    card_background: SLATE_800,
    primary_text: WHITE,
    secondary_text: PURPLE_300,
    accent: PURPLE_300,
    effects: ThemeEffects {
        lightning: Heavy,
        rain: Heavy,
        ..ThemeEffects::NONE
    },
};

static SUNNY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Sunny,
    background_gradient: [AMBER_400, ORANGE_500, RED_500],
    card_background: YELLOW_400,
    primary_text: WHITE,
    secondary_text: YELLOW_100,
    accent: YELLOW_100,
    effects: ThemeEffects {
        sun: Heavy,
        ..ThemeEffects::NONE
    },
};

static PARTLY_CLOUDY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::PartlyCloudy,
    background_gradient: [BLUE_400, SKY_500, BLUE_600],
    card_background: BLUE_500,
    primary_text: WHITE,
    secondary_text: BLUE_100,
    accent: BLUE_100,
    effects: ThemeEffects {
        sun: Light,
        ..ThemeEffects::NONE
    },
};

static CLOUDY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Cloudy,
    background_gradient: [GRAY_600, SLATE_600, GRAY_700],
    card_background: GRAY_600,
    primary_text: WHITE,
    secondary_text: GRAY_200,
    accent: GRAY_200,
    effects: ThemeEffects {
        fog: Light,
        ..ThemeEffects::NONE
    },
};

static OVERCAST: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Overcast,
    background_gradient: [GRAY_700, SLATE_700, GRAY_800],
    card_background: GRAY_700,
    primary_text: WHITE,
    secondary_text: GRAY_300,
    accent: GRAY_300,
    effects: ThemeEffects {
        fog: Moderate,
        ..ThemeEffects::NONE
    },
};

static RAINY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Rainy,
    background_gradient: [SLATE_600, BLUE_700, SLATE_800],
    card_background: SLATE_700,
    primary_text: WHITE,
    secondary_text: BLUE_200,
    accent: BLUE_200,
    effects: ThemeEffects {
        rain: Moderate,
        fog: Light,
        ..ThemeEffects::NONE
    },
};

static LIGHT_RAIN: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::LightRain,
    background_gradient: [SLATE_500, BLUE_600, SLATE_700],
    card_background: SLATE_600,
    primary_text: WHITE,
    secondary_text: BLUE_200,
    accent: BLUE_200,
    effects: ThemeEffects {
        rain: Light,
        ..ThemeEffects::NONE
    },
};

static HEAVY_RAIN: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::HeavyRain,
    background_gradient: [SLATE_800, BLUE_900, SLATE_900],
    card_background: SLATE_800,
    primary_text: WHITE,
    secondary_text: BLUE_300,
    accent: BLUE_300,
    effects: ThemeEffects {
        rain: Heavy,
        fog: Moderate,
        ..ThemeEffects::NONE
    },
};

static SNOWY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Snowy,
    background_gradient: [BLUE_200, SLATE_300, BLUE_300],
    card_background: WHITE,
    primary_text: SLATE_800,
    secondary_text: SLATE_600,
    accent: SLATE_700,
    effects: ThemeEffects {
        snow: Moderate,
        ..ThemeEffects::NONE
    },
};

static BLIZZARD: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Blizzard,
    background_gradient: [SLATE_400, BLUE_300, SLATE_500],
    card_background: WHITE,
    primary_text: SLATE_800,
    secondary_text: SLATE_600,
    accent: SLATE_700,
    effects: ThemeEffects {
        snow: Heavy,
        wind: Moderate,
        ..ThemeEffects::NONE
    },
};

static FOGGY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Foggy,
    background_gradient: [GRAY_400, SLATE_500, GRAY_600],
    card_background: GRAY_500,
    primary_text: WHITE,
    secondary_text: GRAY_200,
    accent: GRAY_200,
    effects: ThemeEffects {
        fog: Heavy,
        ..ThemeEffects::NONE
    },
};

static WINDY: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Windy,
    background_gradient: [TEAL_500, SKY_600, BLUE_600],
    card_background: TEAL_500,
    primary_text: WHITE,
    secondary_text: TEAL_100,
    accent: TEAL_100,
    effects: ThemeEffects {
        wind: Moderate,
        ..ThemeEffects::NONE
    },
};

static CLEAR: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Clear,
    background_gradient: [SKY_400, BLUE_500, BLUE_600],
    card_background: SKY_400,
    primary_text: WHITE,
    secondary_text: SKY_100,
    accent: SKY_100,
    effects: ThemeEffects {
        sun: Moderate,
        ..ThemeEffects::NONE
    },
};
