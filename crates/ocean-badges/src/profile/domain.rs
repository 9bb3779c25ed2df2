use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the five OCEAN personality factors.
///
/// The declaration order is the canonical OCEAN order and doubles as the
/// tie-break order wherever traits are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trait {
    #[serde(rename = "O")]
    Openness,
    #[serde(rename = "C")]
    Conscientiousness,
    #[serde(rename = "E")]
    Extraversion,
    #[serde(rename = "A")]
    Agreeableness,
    #[serde(rename = "N")]
    Neuroticism,
}

impl Trait {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Openness,
            Self::Conscientiousness,
            Self::Extraversion,
            Self::Agreeableness,
            Self::Neuroticism,
        ]
    }

    pub const fn letter(self) -> char {
        match self {
            Self::Openness => 'O',
            Self::Conscientiousness => 'C',
            Self::Extraversion => 'E',
            Self::Agreeableness => 'A',
            Self::Neuroticism => 'N',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Openness => "Openness",
            Self::Conscientiousness => "Conscientiousness",
            Self::Extraversion => "Extraversion",
            Self::Agreeableness => "Agreeableness",
            Self::Neuroticism => "Neuroticism",
        }
    }

    /// Lower-case key used in JSON views (`"openness"`).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
        }
    }

    /// Accepts either the single letter or the full trait name, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered().into_iter().find(|candidate| {
            normalized == candidate.key()
                || (normalized.len() == 1
                    && normalized.starts_with(candidate.letter().to_ascii_lowercase()))
        })
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Questionnaire item metadata from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "trait")]
    pub trait_key: Trait,
    #[serde(default)]
    pub reversed: bool,
}

impl Item {
    pub fn direct(id: impl Into<String>, trait_key: Trait) -> Self {
        Self {
            id: id.into(),
            trait_key,
            reversed: false,
        }
    }

    pub fn reversed(id: impl Into<String>, trait_key: Trait) -> Self {
        Self {
            id: id.into(),
            trait_key,
            reversed: true,
        }
    }
}

/// A single Likert response submitted for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub value: f64,
}

impl Answer {
    pub fn new(item_id: impl Into<String>, value: f64) -> Self {
        Self {
            item_id: item_id.into(),
            value,
        }
    }
}

/// Per-trait aggregate; `percent` is always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitAggregate {
    #[serde(rename = "rawMean")]
    pub raw_mean: f64,
    pub percent: f64,
    #[serde(rename = "answered")]
    pub answered_count: usize,
}

impl TraitAggregate {
    pub const EMPTY: Self = Self {
        raw_mean: 0.0,
        percent: 0.0,
        answered_count: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileMeta {
    #[serde(rename = "scaleMin")]
    pub scale_min: f64,
    #[serde(rename = "scaleMax")]
    pub scale_max: f64,
    #[serde(rename = "totalAnswered")]
    pub total_answered: usize,
    #[serde(rename = "totalItemsMatched")]
    pub total_matched: usize,
}

/// Scored questionnaire result. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub traits: BTreeMap<Trait, TraitAggregate>,
    pub meta: ProfileMeta,
}

impl Profile {
    /// Aggregate for a trait; a profile missing a trait reads as the zero aggregate.
    pub fn aggregate(&self, trait_key: Trait) -> TraitAggregate {
        self.traits
            .get(&trait_key)
            .copied()
            .unwrap_or(TraitAggregate::EMPTY)
    }

    pub fn percent(&self, trait_key: Trait) -> f64 {
        self.aggregate(trait_key).percent
    }

    pub fn percents(&self) -> TraitPercents {
        TraitPercents::from_fn(|trait_key| self.percent(trait_key))
    }
}

/// Bare trait -> percent mapping, the only profile data the badge needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitPercents {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl TraitPercents {
    pub fn from_fn(mut f: impl FnMut(Trait) -> f64) -> Self {
        Self {
            openness: f(Trait::Openness),
            conscientiousness: f(Trait::Conscientiousness),
            extraversion: f(Trait::Extraversion),
            agreeableness: f(Trait::Agreeableness),
            neuroticism: f(Trait::Neuroticism),
        }
    }

    pub fn get(&self, trait_key: Trait) -> f64 {
        match trait_key {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_names() {
        assert_eq!(Trait::parse("O"), Some(Trait::Openness));
        assert_eq!(Trait::parse("n"), Some(Trait::Neuroticism));
        assert_eq!(Trait::parse(" Agreeableness "), Some(Trait::Agreeableness));
        assert_eq!(Trait::parse("X"), None);
        assert_eq!(Trait::parse("extra"), None);
    }

    #[test]
    fn profile_serializes_with_letter_keys() {
        let mut traits = BTreeMap::new();
        traits.insert(
            Trait::Extraversion,
            TraitAggregate {
                raw_mean: 3.5,
                percent: 62.5,
                answered_count: 2,
            },
        );
        let profile = Profile {
            traits,
            meta: ProfileMeta {
                scale_min: 1.0,
                scale_max: 5.0,
                total_answered: 2,
                total_matched: 2,
            },
        };

        let value = serde_json::to_value(&profile).expect("profile serializes");
        assert_eq!(value["traits"]["E"]["percent"], 62.5);
        assert_eq!(value["traits"]["E"]["answered"], 2);
        assert_eq!(value["meta"]["totalItemsMatched"], 2);
        assert_eq!(profile.percent(Trait::Openness), 0.0);
    }
}
