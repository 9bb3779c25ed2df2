//! Questionnaire scoring core: item catalog, scoring engine, interpretation
//! bands, and per-trait display metadata. Everything here is pure and
//! synchronous.

pub mod catalog;
mod descriptions;
pub mod domain;
pub mod interpretation;
pub mod scoring;
pub mod visuals;

pub use catalog::{CatalogError, ItemCatalog};
pub use descriptions::TraitText;
pub use domain::{Answer, Item, Profile, ProfileMeta, Trait, TraitAggregate, TraitPercents};
pub use interpretation::{interpret, Interpretation, Level};
pub use scoring::{score, ConfigurationError, ScoreOptions, ScoringError, ValidationError};
pub use visuals::{trait_animal, visuals, AnimalKey, AnimalMeta, LevelBadge, TraitVisuals};
