use crate::profile::{interpret, visuals, Interpretation, Profile, ProfileMeta, Trait, TraitVisuals};
use serde::Serialize;

/// Identifier returned when a result is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResult {
    pub id: String,
    #[serde(skip)]
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitView {
    #[serde(rename = "trait")]
    pub trait_key: &'static str,
    pub letter: char,
    pub name: &'static str,
    pub percent: f64,
    pub raw_mean: f64,
    pub answered: usize,
    pub interpretation: Interpretation,
    pub visuals: TraitVisuals,
}

impl TraitView {
    pub fn build(profile: &Profile, trait_key: Trait) -> Self {
        let aggregate = profile.aggregate(trait_key);
        let interpretation = interpret(trait_key, aggregate.percent);
        let visuals = visuals(trait_key, interpretation.level);

        Self {
            trait_key: trait_key.key(),
            letter: trait_key.letter(),
            name: trait_key.label(),
            percent: aggregate.percent,
            raw_mean: aggregate.raw_mean,
            answered: aggregate.answered_count,
            interpretation,
            visuals,
        }
    }
}

/// Interpreted result in OCEAN order, recomputed on every read.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub id: String,
    pub traits: Vec<TraitView>,
    pub meta: ProfileMeta,
}

impl ResultView {
    pub fn build(id: impl Into<String>, profile: &Profile) -> Self {
        Self {
            id: id.into(),
            traits: Trait::ordered()
                .into_iter()
                .map(|trait_key| TraitView::build(profile, trait_key))
                .collect(),
            meta: profile.meta,
        }
    }
}
