use super::domain::Trait;
use super::interpretation::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitText {
    pub title: &'static str,
    pub description: &'static str,
}

/// Text for one trait. Only `balanced` is mandatory; absent bands fall back to it.
struct TraitTexts {
    low: Option<TraitText>,
    moderate_low: Option<TraitText>,
    balanced: TraitText,
    moderate_high: Option<TraitText>,
    high: Option<TraitText>,
}

impl TraitTexts {
    fn for_level(&self, level: Level) -> TraitText {
        let text = match level {
            Level::Low => self.low,
            Level::ModerateLow => self.moderate_low,
            Level::Balanced => Some(self.balanced),
            Level::ModerateHigh => self.moderate_high,
            Level::High => self.high,
        };
        text.unwrap_or(self.balanced)
    }
}

const fn text(title: &'static str, description: &'static str) -> Option<TraitText> {
    Some(TraitText { title, description })
}

static OPENNESS: TraitTexts = TraitTexts {
    low: text(
        "Practical and grounded",
        "You tend to prefer familiar ideas and proven approaches, valuing practicality over experimentation.",
    ),
    moderate_low: text(
        "Selectively open",
        "You are open to new ideas when they clearly serve a purpose, but remain cautious toward unnecessary change.",
    ),
    balanced: TraitText {
        title: "Balanced openness",
        description: "You are open to new ideas when they are meaningful, without chasing novelty for its own sake.",
    },
    moderate_high: text(
        "Curious and flexible",
        "You show curiosity toward new perspectives and are comfortable exploring alternative ways of thinking.",
    ),
    high: text(
        "Highly open and exploratory",
        "You actively seek new ideas, experiences, and perspectives, often enjoying abstract or unconventional thinking.",
    ),
};

static CONSCIENTIOUSNESS: TraitTexts = TraitTexts {
    low: text(
        "Spontaneous and flexible",
        "You prefer flexibility over strict structure, often adapting plans as situations evolve.",
    ),
    moderate_low: text(
        "Lightly structured",
        "You can organize yourself when needed, but do not feel compelled to maintain rigid routines.",
    ),
    balanced: TraitText {
        title: "Balanced self-discipline",
        description: "You can stay organized and reliable when needed, without becoming rigid.",
    },
    moderate_high: text(
        "Reliable and methodical",
        "You tend to plan ahead and follow through on commitments while remaining reasonably adaptable.",
    ),
    high: text(
        "Highly disciplined",
        "You strongly value structure, planning, and responsibility, often setting high standards for yourself.",
    ),
};

static EXTRAVERSION: TraitTexts = TraitTexts {
    low: text(
        "Reserved and introspective",
        "You are more comfortable with low-stimulation environments and tend to recharge through solitude.",
    ),
    moderate_low: text(
        "Quietly social",
        "You enjoy social interaction in smaller or familiar settings without seeking constant engagement.",
    ),
    balanced: TraitText {
        title: "Socially flexible",
        description: "You feel comfortable both in social situations and spending time alone.",
    },
    moderate_high: text(
        "Engaged and expressive",
        "You enjoy social interaction and tend to express yourself openly, while still valuing personal space.",
    ),
    high: text(
        "Highly outgoing",
        "You gain energy from social interaction and often seek dynamic, stimulating environments.",
    ),
};

static AGREEABLENESS: TraitTexts = TraitTexts {
    low: text(
        "Direct and independent",
        "You prioritize honesty and autonomy, sometimes valuing directness over harmony.",
    ),
    moderate_low: text(
        "Principled and selective",
        "You are cooperative when it aligns with your values, but do not hesitate to assert your position.",
    ),
    balanced: TraitText {
        title: "Cooperative but independent",
        description: "You value harmony while maintaining healthy personal boundaries.",
    },
    moderate_high: text(
        "Empathetic and supportive",
        "You tend to be considerate of others' needs while still preserving your own perspective.",
    ),
    high: text(
        "Highly compassionate",
        "You strongly value cooperation, empathy, and maintaining positive relationships.",
    ),
};

static NEUROTICISM: TraitTexts = TraitTexts {
    low: text(
        "Emotionally steady",
        "You tend to remain calm under pressure and are less affected by emotional fluctuations.",
    ),
    moderate_low: text(
        "Generally composed",
        "You experience emotional reactions but usually recover quickly and maintain perspective.",
    ),
    balanced: TraitText {
        title: "Emotionally balanced",
        description: "You generally handle stress without excessive reactivity.",
    },
    moderate_high: text(
        "Emotionally sensitive",
        "You tend to react emotionally to situations, while usually remaining aware of your responses.",
    ),
    high: text(
        "Highly emotionally responsive",
        "You experience emotions intensely and may be more affected by stress or uncertainty.",
    ),
};

fn texts_for(trait_key: Trait) -> &'static TraitTexts {
    match trait_key {
        Trait::Openness => &OPENNESS,
        Trait::Conscientiousness => &CONSCIENTIOUSNESS,
        Trait::Extraversion => &EXTRAVERSION,
        Trait::Agreeableness => &AGREEABLENESS,
        Trait::Neuroticism => &NEUROTICISM,
    }
}

pub(crate) fn trait_text(trait_key: Trait, level: Level) -> TraitText {
    texts_for(trait_key).for_level(level)
}
