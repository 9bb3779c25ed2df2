//! Big Five (OCEAN) questionnaire scoring, interpretation, and shareable SVG badges.

pub mod badge;
pub mod config;
pub mod error;
pub mod profile;
pub mod results;
pub mod telemetry;
