use crate::infra::load_catalog;
use clap::Args;
use ocean_badges::badge::{render_badge, BadgeOptions};
use ocean_badges::config::AppConfig;
use ocean_badges::error::AppError;
use ocean_badges::profile::{score, ItemCatalog, Profile, ProfileMeta, Trait};
use ocean_badges::results::{parse_submission, ResultPolicy, ResultServiceError, TraitView};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file shaped like the result submission body: {"answers": [...]}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// CSV item catalog (id,trait,keyed) replacing the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Drop out-of-scale answers instead of rejecting the file
    #[arg(long)]
    pub(crate) ignore_invalid: bool,
    /// Print the interpreted profile as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BadgeArgs {
    /// JSON file shaped like the result submission body: {"answers": [...]}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Link target for the badge
    #[arg(long)]
    pub(crate) profile_url: String,
    #[arg(long)]
    pub(crate) title: Option<String>,
    #[arg(long)]
    pub(crate) subtitle: Option<String>,
    /// Write the SVG here instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) traits: Vec<TraitView>,
    pub(crate) meta: ProfileMeta,
}

impl ScoreReport {
    pub(crate) fn build(profile: &Profile) -> Self {
        Self {
            traits: Trait::ordered()
                .into_iter()
                .map(|trait_key| TraitView::build(profile, trait_key))
                .collect(),
            meta: profile.meta,
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.catalog {
        config.scoring.item_catalog_path = Some(path);
    }
    if args.ignore_invalid {
        config.scoring.ignore_invalid = true;
    }

    let catalog = load_catalog(&config.scoring)?;
    let profile = score_file(&args.answers, &catalog, &config.result_policy())?;
    let report = ScoreReport::build(&profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&report));
    }
    Ok(())
}

pub(crate) fn run_badge(args: BadgeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.scoring)?;
    let profile = score_file(&args.answers, &catalog, &config.result_policy())?;

    let options = BadgeOptions {
        profile_url: args.profile_url,
        title: args.title,
        subtitle: args.subtitle,
    };
    let markup = render_badge(&profile, &options);

    match args.out {
        Some(path) => {
            fs::write(&path, markup)?;
            println!("Badge written to {}", path.display());
        }
        None => print!("{markup}"),
    }
    Ok(())
}

/// Parse and score an answers file with the same rules as the HTTP endpoint.
pub(crate) fn score_file(
    path: &Path,
    catalog: &ItemCatalog,
    policy: &ResultPolicy,
) -> Result<Profile, AppError> {
    let raw = fs::read_to_string(path)?;
    let payload: serde_json::Value = serde_json::from_str(&raw)?;
    let answers =
        parse_submission(&payload, &policy.limits).map_err(ResultServiceError::Submission)?;
    let profile =
        score(&answers, catalog, &policy.score_options).map_err(ResultServiceError::Scoring)?;
    Ok(profile)
}

pub(crate) fn render_table(report: &ScoreReport) -> String {
    let mut out = String::from("Big Five profile\n");
    for entry in &report.traits {
        out.push_str(&format!(
            "  {:<18} {:>6.2}%  {:<14} {}\n      {} {}: {}\n",
            entry.name,
            entry.percent,
            entry.interpretation.level.key(),
            entry.interpretation.title,
            entry.visuals.icon.emoji,
            entry.visuals.icon.name,
            entry.visuals.hint,
        ));
    }
    out.push_str(&format!(
        "  {} of {} answers matched the item catalog\n",
        report.meta.total_matched, report.meta.total_answered
    ));
    out
}
