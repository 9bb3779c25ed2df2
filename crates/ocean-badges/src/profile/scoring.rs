//! Likert answer aggregation into per-trait percentages.
//!
//! Scoring is a pure function of `(answers, catalog, options)`: there is no
//! shared state, so identical inputs always produce bit-identical profiles.

use super::catalog::ItemCatalog;
use super::domain::{Answer, Profile, ProfileMeta, Trait, TraitAggregate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scale bounds and leniency applied during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreOptions {
    pub scale_min: f64,
    pub scale_max: f64,
    /// Drop out-of-range answers instead of rejecting the submission.
    pub ignore_invalid: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            scale_min: 1.0,
            scale_max: 5.0,
            ignore_invalid: false,
        }
    }
}

impl ScoreOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let finite = self.scale_min.is_finite() && self.scale_max.is_finite();
        if finite && self.scale_min < self.scale_max {
            Ok(())
        } else {
            Err(ConfigurationError {
                scale_min: self.scale_min,
                scale_max: self.scale_max,
            })
        }
    }

    fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.scale_min && value <= self.scale_max
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid scale: scale_min ({scale_min}) must be < scale_max ({scale_max})")]
pub struct ConfigurationError {
    pub scale_min: f64,
    pub scale_max: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "invalid answer value for item '{item_id}': expected a number in [{scale_min}..{scale_max}], got {value}"
)]
pub struct ValidationError {
    pub item_id: String,
    pub value: f64,
    pub scale_min: f64,
    pub scale_max: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Running sum for one trait; rounding is deferred until the aggregate is built.
#[derive(Debug, Default, Clone, Copy)]
struct TraitBucket {
    sum: f64,
    count: usize,
}

impl TraitBucket {
    fn push(&mut self, scored: f64) {
        self.sum += scored;
        self.count += 1;
    }

    fn aggregate(self, options: &ScoreOptions) -> TraitAggregate {
        if self.count == 0 {
            return TraitAggregate::EMPTY;
        }

        let raw_mean = self.sum / self.count as f64;
        let percent =
            (raw_mean - options.scale_min) / (options.scale_max - options.scale_min) * 100.0;

        TraitAggregate {
            raw_mean: round_to(raw_mean, 4),
            percent: round_to(percent, 2).clamp(0.0, 100.0),
            answered_count: self.count,
        }
    }
}

/// Score answers against the catalog.
///
/// Answers for unknown items count towards `total_answered` only. Any matched
/// answer outside the scale fails the whole call unless
/// [`ScoreOptions::ignore_invalid`] is set.
pub fn score(
    answers: &[Answer],
    catalog: &ItemCatalog,
    options: &ScoreOptions,
) -> Result<Profile, ScoringError> {
    options.validate()?;

    let mut buckets: BTreeMap<Trait, TraitBucket> = Trait::ordered()
        .into_iter()
        .map(|trait_key| (trait_key, TraitBucket::default()))
        .collect();
    let mut total_matched = 0;

    for answer in answers {
        let Some(item) = catalog.get(&answer.item_id) else {
            continue;
        };
        total_matched += 1;

        if !options.accepts(answer.value) {
            if options.ignore_invalid {
                continue;
            }
            return Err(ValidationError {
                item_id: answer.item_id.clone(),
                value: answer.value,
                scale_min: options.scale_min,
                scale_max: options.scale_max,
            }
            .into());
        }

        let scored = if item.reversed {
            reverse_keyed(answer.value, options)
        } else {
            answer.value
        };

        buckets.entry(item.trait_key).or_default().push(scored);
    }

    let traits = buckets
        .into_iter()
        .map(|(trait_key, bucket)| (trait_key, bucket.aggregate(options)))
        .collect();

    Ok(Profile {
        traits,
        meta: ProfileMeta {
            scale_min: options.scale_min,
            scale_max: options.scale_max,
            total_answered: answers.len(),
            total_matched,
        },
    })
}

pub fn reverse_keyed(value: f64, options: &ScoreOptions) -> f64 {
    (options.scale_min + options.scale_max) - value
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
