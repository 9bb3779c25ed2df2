use super::descriptions::trait_text;
use super::domain::Trait;
use serde::{Deserialize, Serialize};

/// Qualitative band a trait percentage falls into, ordered low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Low,
    ModerateLow,
    Balanced,
    ModerateHigh,
    High,
}

/// Lower bound (inclusive) of each band. The last band also includes 100.
const BANDS: [(f64, Level); 5] = [
    (70.0, Level::High),
    (55.0, Level::ModerateHigh),
    (45.0, Level::Balanced),
    (30.0, Level::ModerateLow),
    (0.0, Level::Low),
];

impl Level {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Low,
            Self::ModerateLow,
            Self::Balanced,
            Self::ModerateHigh,
            Self::High,
        ]
    }

    /// Classify a percentage. Callers must pass a value in `[0, 100]`.
    pub fn from_percent(percent: f64) -> Self {
        debug_assert!(
            (0.0..=100.0).contains(&percent),
            "percent {percent} outside [0, 100]"
        );
        let percent = percent.clamp(0.0, 100.0);

        BANDS
            .iter()
            .find(|(lower, _)| percent >= *lower)
            .map(|(_, level)| *level)
            .unwrap_or(Self::Low)
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::ModerateLow => "moderate-low",
            Self::Balanced => "balanced",
            Self::ModerateHigh => "moderate-high",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub level: Level,
    pub title: &'static str,
    pub description: &'static str,
}

/// Map a trait percentage to its band and descriptive text.
pub fn interpret(trait_key: Trait, percent: f64) -> Interpretation {
    let level = Level::from_percent(percent);
    let text = trait_text(trait_key, level);

    Interpretation {
        level,
        title: text.title,
        description: text.description,
    }
}
