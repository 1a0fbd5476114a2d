use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

use crate::types::{Intensity, Progression, SessionType, SkillLevel};

/// Everything the plan generator needs to know about the athlete.
/// Persisted as TOML in the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub skill_level: SkillLevel,
    pub goals: Vec<String>,
    /// Minutes available per session.
    pub available_minutes: u32,
    /// Sessions per week (1..=7).
    pub frequency: u32,
    pub focus_areas: Vec<String>,
    pub equipment: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub intensity: Intensity,
    pub session_type: SessionType,
    pub warmup_minutes: u32,
    pub cooldown_minutes: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            skill_level: SkillLevel::Beginner,
            goals: vec!["Improve overall game".into()],
            available_minutes: 60,
            frequency: 3,
            focus_areas: vec!["Shooting".into(), "Ball Handling".into()],
            equipment: vec!["Basketball".into()],
            limitations: Vec::new(),
            preferences: Preferences {
                intensity: Intensity::Medium,
                session_type: SessionType::Mixed,
                warmup_minutes: 10,
                cooldown_minutes: 5,
            },
        }
    }
}

impl UserProfile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Invalid profile file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write profile: {}", path.display()))
    }
}

/// One drill, exercise or stretch from the content catalog. Read-only:
/// the core never creates or mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub difficulty: SkillLevel,
    /// Recommended duration in minutes, if the source material gives one.
    pub minutes: Option<u32>,
    pub equipment: Option<String>,
    pub tip: Option<String>,
}

/// A warmup or cooldown entry inside a generated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineItem {
    pub id: String,
    pub name: String,
    pub minutes: u32,
}

/// A main-workout drill inside a generated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDrill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub minutes: u32,
    pub sets: Option<u32>,
    pub reps: Option<String>,
    pub rest_minutes: Option<f32>,
    pub notes: Option<String>,
}

/// One session inside a training plan. Built once by the generator,
/// immutable until the caller flattens it into a [`PlannedSession`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSession {
    pub id: String,
    pub name: String,
    pub session_type: SessionType,
    pub minutes: u32,
    pub intensity: Intensity,
    pub focus: String,
    pub warmup: Vec<RoutineItem>,
    pub main: Vec<WorkoutDrill>,
    pub cooldown: Vec<RoutineItem>,
    /// 1..=10.
    pub difficulty: u32,
    pub calories: u32,
    pub description: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weeks: u32,
    /// Week-major, slot-minor order. Downstream date assignment maps the
    /// list index straight to a calendar offset, so this order is stable.
    pub sessions: Vec<GeneratedSession>,
    pub progression: Progression,
    /// Weekday indices (1..=7) left free of training.
    pub rest_days: Vec<u32>,
    pub goals: Vec<String>,
    pub difficulty: u32,
    pub total_sessions: u32,
}

/// A drill as actually performed, embedded in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformedDrill {
    pub name: String,
    pub category: String,
    pub minutes: u32,
}

/// The durable session record and sole input to the progress aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedSession {
    pub id: String,
    pub date: NaiveDate,
    pub session_type: SessionType,
    pub drills: Vec<PerformedDrill>,
    pub minutes: u32,
    pub completed: bool,
}

/// One Monday-aligned calendar week, fully recomputed on every aggregator
/// run so it always matches the current session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub planned_sessions: u32,
    pub completed_sessions: u32,
    pub completed_minutes: u32,
    /// Drill category to summed completed minutes.
    pub category_minutes: BTreeMap<String, u32>,
    pub sessions: Vec<PlannedSession>,
    pub xp: u32,
    pub xp_per_session: f32,
    pub xp_per_drill: f32,
}

/// Rolling gamification record, fully recomputed from the whole history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub streak: u32,
    pub longest_streak: u32,
    pub xp: u64,
    pub level: u32,
    pub most_minutes: u32,
    pub most_shots: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub category: String,
    /// Sticky: preserved from the previous badge set on recomputation.
    pub earned_at: Option<DateTime<Local>>,
}
