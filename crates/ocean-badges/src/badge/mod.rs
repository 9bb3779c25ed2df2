//! Shareable SVG badge in the fixed "OCEAN triangle" layout.
//!
//! Openness, Conscientiousness, and Extraversion sit on the triangle corners,
//! strongest on top. Agreeableness and Neuroticism are always a footnote line
//! regardless of their values.

pub mod embed;
pub mod svg;

use crate::profile::{trait_animal, Profile, Trait, TraitPercents};
use serde::Deserialize;
use svg::{document, Element};

pub use embed::EmbedSnippets;

pub const BADGE_WIDTH: f64 = 460.0;
pub const BADGE_HEIGHT: f64 = 460.0;

pub const PRIMARY_TRAITS: [Trait; 3] = [
    Trait::Openness,
    Trait::Conscientiousness,
    Trait::Extraversion,
];
pub const SECONDARY_TRAITS: [Trait; 2] = [Trait::Agreeableness, Trait::Neuroticism];

const DEFAULT_TITLE: &str = "Big Five Profile";
const DEFAULT_SUBTITLE: &str = "Click to view the full profile";

const ICON_MIN_PX: f64 = 26.0;
const ICON_MAX_PX: f64 = 46.0;
const RANK_BOOST_PX: f64 = 1.2;

const TEXT_FONTS: &str = "-apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Arial, sans-serif";
const EMOJI_FONTS: &str =
    "Apple Color Emoji, Segoe UI Emoji, Noto Color Emoji, -apple-system, sans-serif";

/// Display inputs that do not come from the profile itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BadgeOptions {
    pub profile_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl BadgeOptions {
    pub fn new(profile_url: impl Into<String>) -> Self {
        Self {
            profile_url: profile_url.into(),
            title: None,
            subtitle: None,
        }
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }
}

/// A primary trait after ranking; rank 0 takes the top corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTrait {
    pub trait_key: Trait,
    pub percent: f64,
    pub rank: usize,
    pub icon_px: f64,
}

/// Corner coordinates for one ranked slot.
struct Slot {
    icon: (f64, f64),
    percent: (f64, f64, &'static str),
    word: (f64, f64),
}

const SLOTS: [Slot; 3] = [
    Slot {
        icon: (230.0, 108.0),
        percent: (230.0, 158.0, "middle"),
        word: (230.0, 140.0),
    },
    Slot {
        icon: (95.0, 335.0),
        percent: (130.0, 340.0, "start"),
        word: (120.0, 392.0),
    },
    Slot {
        icon: (365.0, 335.0),
        percent: (330.0, 340.0, "end"),
        word: (340.0, 392.0),
    },
];

pub fn render_badge(profile: &Profile, options: &BadgeOptions) -> String {
    render_badge_from_percents(&profile.percents(), options)
}

pub fn render_badge_from_percents(percents: &TraitPercents, options: &BadgeOptions) -> String {
    let ranked = rank_primary(percents);
    let center = BADGE_WIDTH / 2.0;

    let corners = ranked
        .iter()
        .zip(SLOTS.iter())
        .map(|(ranked, slot)| corner_group(ranked, slot));

    let content = Element::new("a")
        .attr("href", options.profile_url.as_str())
        .attr("xlink:href", options.profile_url.as_str())
        .attr("target", "_blank")
        .child(
            Element::new("rect")
                .num("width", BADGE_WIDTH)
                .num("height", BADGE_HEIGHT)
                .num("rx", 14.0)
                .attr("fill", "url(#bg)"),
        )
        .child(
            Element::new("text")
                .num("x", center)
                .num("y", 38.0)
                .attr("text-anchor", "middle")
                .attr("class", "title")
                .text(options.title()),
        )
        .child(
            Element::new("text")
                .num("x", center)
                .num("y", 58.0)
                .attr("text-anchor", "middle")
                .attr("class", "subtitle")
                .text(options.subtitle()),
        )
        .child(
            Element::new("polygon")
                .attr("points", "230,168 95,360 365,360")
                .attr("fill", "none")
                .attr("stroke", "#6c7cff")
                .num("stroke-width", 1.3)
                .attr("stroke-dasharray", "5 7"),
        )
        .child(
            Element::new("text")
                .num("x", center)
                .num("y", 300.0)
                .attr("text-anchor", "middle")
                .attr("class", "core")
                .attr("filter", "url(#softGlow)")
                .text("OCEAN"),
        )
        .children(corners)
        .child(
            Element::new("text")
                .num("x", center)
                .num("y", 424.0)
                .attr("text-anchor", "middle")
                .attr("class", "secondary")
                .text(secondary_line(percents)),
        )
        .child(
            Element::new("text")
                .num("x", 18.0)
                .num("y", 446.0)
                .attr("class", "footer")
                .text("Non-clinical \u{00B7} Voluntary \u{00B7} No personal data"),
        )
        .child(
            Element::new("text")
                .num("x", BADGE_WIDTH - 18.0)
                .num("y", 446.0)
                .attr("text-anchor", "end")
                .attr("class", "footer")
                .text("view profile \u{2192}"),
        );

    let root = Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .num("width", BADGE_WIDTH)
        .num("height", BADGE_HEIGHT)
        .attr("viewBox", format!("0 0 {BADGE_WIDTH} {BADGE_HEIGHT}"))
        .attr("role", "img")
        .child(definitions())
        .child(Element::new("style").text(stylesheet()))
        .child(content);

    document(&root)
}

/// Rank the primary traits by percent, descending. Ties keep OCEAN order.
pub fn rank_primary(percents: &TraitPercents) -> [RankedTrait; 3] {
    let mut primaries =
        PRIMARY_TRAITS.map(|trait_key| (trait_key, clamp_percent(percents.get(trait_key))));
    // stable sort, so equal percents stay in declaration order
    primaries.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut rank = 0;
    primaries.map(|(trait_key, percent)| {
        let ranked = RankedTrait {
            trait_key,
            percent,
            rank,
            icon_px: icon_size(percent, rank),
        };
        rank += 1;
        ranked
    })
}

/// Icon size in px: linear in percent plus a small boost for higher ranks.
pub fn icon_size(percent: f64, rank: usize) -> f64 {
    let base = ICON_MIN_PX + (ICON_MAX_PX - ICON_MIN_PX) * (clamp_percent(percent) / 100.0);
    let boost = PRIMARY_TRAITS.len().saturating_sub(rank + 1) as f64 * RANK_BOOST_PX;
    base + boost
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

fn display_percent(percent: f64) -> String {
    format!("{}%", clamp_percent(percent).round() as i64)
}

fn corner_group(ranked: &RankedTrait, slot: &Slot) -> Element {
    let animal = trait_animal(ranked.trait_key);
    let (percent_x, percent_y, anchor) = slot.percent;

    Element::new("g")
        .attr("data-trait", ranked.trait_key.key())
        .child(
            Element::new("text")
                .num("x", slot.icon.0)
                .num("y", slot.icon.1)
                .attr("text-anchor", "middle")
                .attr("dominant-baseline", "middle")
                .attr("class", "animal")
                .num("font-size", ranked.icon_px)
                .text(animal.emoji),
        )
        .child(
            Element::new("text")
                .num("x", slot.word.0)
                .num("y", slot.word.1)
                .attr("text-anchor", "middle")
                .attr("class", "trait")
                .children(stylized_word(ranked.trait_key)),
        )
        .child(
            Element::new("text")
                .num("x", percent_x)
                .num("y", percent_y)
                .attr("text-anchor", anchor)
                .attr("class", "percent")
                .text(display_percent(ranked.percent)),
        )
}

/// Large initial, spaced-out remainder: `O` + `PENNESS`.
fn stylized_word(trait_key: Trait) -> [Element; 2] {
    let word = trait_key.label().to_ascii_uppercase();
    let (initial, rest) = word.split_at(1);

    [
        Element::new("tspan")
            .num("font-size", 14.0)
            .num("font-weight", 500.0)
            .text(initial),
        Element::new("tspan")
            .num("font-size", 11.0)
            .num("letter-spacing", 1.6)
            .num("opacity", 0.75)
            .text(rest),
    ]
}

fn secondary_line(percents: &TraitPercents) -> String {
    SECONDARY_TRAITS
        .iter()
        .map(|trait_key| {
            format!(
                "{} {} {}",
                trait_animal(*trait_key).emoji,
                trait_key.letter(),
                display_percent(percents.get(*trait_key))
            )
        })
        .collect::<Vec<_>>()
        .join(" \u{00B7} ")
}

fn definitions() -> Element {
    Element::new("defs")
        .child(
            Element::new("radialGradient")
                .attr("id", "bg")
                .attr("cx", "50%")
                .attr("cy", "35%")
                .attr("r", "70%")
                .child(
                    Element::new("stop")
                        .attr("offset", "0%")
                        .attr("stop-color", "#0e1324"),
                )
                .child(
                    Element::new("stop")
                        .attr("offset", "100%")
                        .attr("stop-color", "#05070c"),
                ),
        )
        .child(
            Element::new("filter")
                .attr("id", "softGlow")
                .child(
                    Element::new("feGaussianBlur")
                        .num("stdDeviation", 2.5)
                        .attr("result", "blur"),
                )
                .child(
                    Element::new("feMerge")
                        .child(Element::new("feMergeNode").attr("in", "blur"))
                        .child(Element::new("feMergeNode").attr("in", "SourceGraphic")),
                ),
        )
}

fn stylesheet() -> String {
    format!(
        "text {{ font-family: {TEXT_FONTS}; fill: #e5e7eb }} \
         .title {{ font-size: 18px; font-weight: 600 }} \
         .subtitle {{ font-size: 11px; fill: #94a3b8 }} \
         .animal {{ font-family: {EMOJI_FONTS} }} \
         .trait {{ fill: #cbd5e1 }} \
         .percent {{ font-size: 12px }} \
         .core {{ font-size: 14px; letter-spacing: 6px; fill: #94a3b8; opacity: 0.85 }} \
         .secondary {{ font-size: 11px; fill: #cbd5e1 }} \
         .footer {{ font-size: 9px; fill: #64748b }}"
    )
}
