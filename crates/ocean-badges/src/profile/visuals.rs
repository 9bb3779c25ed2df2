use super::domain::Trait;
use super::interpretation::Level;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalKey {
    Lion,
    Elephant,
    Buffalo,
    Rhino,
    Leopard,
}

/// Spirit animal standing in for a trait on result pages and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimalMeta {
    pub key: AnimalKey,
    pub emoji: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelBadge {
    pub label: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitVisuals {
    pub icon: AnimalMeta,
    pub label: &'static str,
    pub hint: &'static str,
}

pub const fn trait_animal(trait_key: Trait) -> AnimalMeta {
    match trait_key {
        Trait::Openness => AnimalMeta {
            key: AnimalKey::Leopard,
            emoji: "\u{1F406}",
            name: "Leopard",
            tagline: "Curiosity & exploration",
        },
        Trait::Conscientiousness => AnimalMeta {
            key: AnimalKey::Rhino,
            emoji: "\u{1F98F}",
            name: "Rhinoceros",
            tagline: "Discipline & consistency",
        },
        Trait::Extraversion => AnimalMeta {
            key: AnimalKey::Lion,
            emoji: "\u{1F981}",
            name: "Lion",
            tagline: "Presence & social energy",
        },
        Trait::Agreeableness => AnimalMeta {
            key: AnimalKey::Elephant,
            emoji: "\u{1F418}",
            name: "Elephant",
            tagline: "Warmth & cooperation",
        },
        Trait::Neuroticism => AnimalMeta {
            key: AnimalKey::Buffalo,
            emoji: "\u{1F403}",
            name: "Buffalo",
            tagline: "Vigilance & emotional reactivity",
        },
    }
}

pub const fn level_badge(level: Level) -> LevelBadge {
    match level {
        Level::Low => LevelBadge {
            label: "Low",
            hint: "More stable / less expressed",
        },
        Level::ModerateLow => LevelBadge {
            label: "Moderate-Low",
            hint: "Slightly less expressed",
        },
        Level::Balanced => LevelBadge {
            label: "Balanced",
            hint: "Typical range / flexible",
        },
        Level::ModerateHigh => LevelBadge {
            label: "Moderate-High",
            hint: "Slightly more expressed",
        },
        Level::High => LevelBadge {
            label: "High",
            hint: "Strongly expressed",
        },
    }
}

pub const fn visuals(trait_key: Trait, level: Level) -> TraitVisuals {
    let badge = level_badge(level);
    TraitVisuals {
        icon: trait_animal(trait_key),
        label: badge.label,
        hint: badge.hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_animal_and_level_badge() {
        let resolved = visuals(Trait::Extraversion, Level::ModerateHigh);
        assert_eq!(resolved.icon.key, AnimalKey::Lion);
        assert_eq!(resolved.label, "Moderate-High");
        assert_eq!(resolved.hint, "Slightly more expressed");
    }

    #[test]
    fn every_trait_has_a_distinct_animal() {
        let keys: std::collections::HashSet<AnimalKey> = Trait::ordered()
            .into_iter()
            .map(|trait_key| trait_animal(trait_key).key)
            .collect();
        assert_eq!(keys.len(), 5);
    }
}
