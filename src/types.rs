use once_cell::sync::Lazy;
use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
    fs,
    path::Path,
};
use strsim::jaro_winkler;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Base difficulty used when scoring a single session (before the
    /// intensity multiplier is applied).
    pub fn session_difficulty_base(self) -> f32 {
        match self {
            Self::Beginner => 2.0,
            Self::Intermediate => 5.0,
            Self::Advanced => 7.0,
        }
    }

    /// Base difficulty used when scoring a whole plan.
    pub fn plan_difficulty_base(self) -> f32 {
        match self {
            Self::Beginner => 3.0,
            Self::Intermediate => 6.0,
            Self::Advanced => 8.0,
        }
    }

    pub fn progression(self) -> Progression {
        match self {
            Self::Beginner => Progression::Linear,
            Self::Intermediate => Progression::Periodic,
            Self::Advanced => Progression::Maintenance,
        }
    }
}

impl Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };

        write!(f, "{}", s)
    }
}

/// Ordered low < medium < high so the weekly ratchet can use `max`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn skills_multiplier(self) -> f32 {
        match self {
            Self::Low => 0.8,
            Self::Medium => 1.0,
            Self::High => 1.2,
        }
    }

    pub fn strength_count_multiplier(self) -> f32 {
        match self {
            Self::Low => 0.7,
            Self::Medium => 1.0,
            Self::High => 1.3,
        }
    }

    pub fn strength_duration_multiplier(self) -> f32 {
        match self {
            Self::Low => 0.9,
            Self::Medium => 1.0,
            Self::High => 1.1,
        }
    }

    pub fn session_difficulty_multiplier(self) -> f32 {
        match self {
            Self::Low => 0.7,
            Self::Medium => 1.0,
            Self::High => 1.3,
        }
    }

    pub fn plan_difficulty_multiplier(self) -> f32 {
        match self {
            Self::Low => 0.8,
            Self::Medium => 1.0,
            Self::High => 1.2,
        }
    }

    pub fn calories_per_minute(self) -> u32 {
        match self {
            Self::Low => 4,
            Self::Medium => 6,
            Self::High => 8,
        }
    }

    pub fn skills_sets(self) -> u32 {
        match self {
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
        }
    }

    /// Rest between skill drills shrinks as intensity rises.
    pub fn skills_rest_minutes(self) -> f32 {
        match self {
            Self::Low => 2.0,
            Self::Medium => 1.5,
            Self::High => 1.0,
        }
    }

    /// Strength convention is the opposite of skills: heavier work means
    /// fewer reps and longer rest.
    pub fn strength_reps(self) -> u32 {
        match self {
            Self::Low => 12,
            Self::Medium => 10,
            Self::High => 8,
        }
    }

    pub fn strength_rest_minutes(self) -> f32 {
        match self {
            Self::Low => 2.0,
            Self::Medium => 2.5,
            Self::High => 3.0,
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };

        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    Skills,
    Strength,
    Conditioning,
    Mixed,
}

impl SessionType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Skills => "Skills",
            Self::Strength => "Strength",
            Self::Conditioning => "Conditioning",
            Self::Mixed => "Mixed",
        }
    }
}

impl Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Skills => "skills",
            Self::Strength => "strength",
            Self::Conditioning => "conditioning",
            Self::Mixed => "mixed",
        };

        write!(f, "{}", s)
    }
}

/// How a plan is meant to evolve over its weeks, derived from skill level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Progression {
    Linear,
    Periodic,
    Maintenance,
}

impl Display for Progression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Linear => "linear",
            Self::Periodic => "periodic",
            Self::Maintenance => "maintenance",
        };

        write!(f, "{}", s)
    }
}

pub static KNOWN_CATEGORIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "shooting",
        "ball handling",
        "passing",
        "defense",
        "rebounding",
        "footwork",
        "finishing",
        "conditioning",
        "strength",
        "warm-up",
        "cool-down",
    ])
});

/// Returns the canonical lowercase category name or `None` if unknown.
pub fn canonical_category<S: AsRef<str>>(c: S) -> Option<String> {
    let c = c.as_ref().to_ascii_lowercase();
    if KNOWN_CATEGORIES.contains(c.as_str()) {
        Some(c)
    } else {
        None
    }
}

/// Return the closest known category for `input`
/// if similarity is high *and* clearly better than the runner-up.
/// Otherwise return `None` (no suggestion shown).
pub fn best_category_suggestion(input: &str) -> Option<&'static str> {
    let inp = input.to_ascii_lowercase();
    if inp.trim().is_empty() {
        return None;
    }

    // Collect (category, score) pairs.
    let mut scores: Vec<(&'static str, f64)> = KNOWN_CATEGORIES
        .iter()
        .copied()
        .map(|c| (c, jaro_winkler(&inp, c)))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let (best, best_score) = scores[0];
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    // Tune these two constants to taste.
    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

/// Freeform key/value config persisted as TOML in the platform config dir.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub map: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
