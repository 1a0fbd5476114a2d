use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::models::{
    Badge, CatalogItem, PlannedSession, TrainingPlan, UserProgress, WeeklySummary,
};
use crate::progress::ProgressReport;

const SESSIONS_FILE: &str = "sessions.json";
const SUMMARIES_FILE: &str = "summaries.json";
const PROGRESS_FILE: &str = "progress.json";
const BADGES_FILE: &str = "badges.json";
const PLAN_FILE: &str = "plan.json";
const CATALOG_FILE: &str = "catalog.json";

/// On-disk shape of the user-imported catalog.
#[derive(Default, Serialize, Deserialize)]
struct CatalogDoc {
    drills: Vec<CatalogItem>,
    exercises: Vec<CatalogItem>,
    stretches: Vec<CatalogItem>,
}

/// JSON-document store under the platform data dir. One file per
/// collection so each save is a single write. The core modules never see
/// this type; they take snapshots and return derived collections, and
/// the command layer persists them here.
pub struct Store {
    base: PathBuf,
}

impl Store {
    pub fn open() -> Result<Self> {
        let base = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("courtside");
        Self::at(base)
    }

    pub fn at<P: Into<PathBuf>>(base: P) -> Result<Self> {
        let base = base.into();
        fs::create_dir_all(&base)
            .with_context(|| format!("Failed to create directory: {}", base.display()))?;
        Ok(Self { base })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base.join(file)
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.path(file);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    //
    // Session store
    //

    pub fn load_sessions(&self) -> Result<Vec<PlannedSession>> {
        self.read(SESSIONS_FILE)
    }

    pub fn save_sessions(&self, sessions: &[PlannedSession]) -> Result<()> {
        self.write(SESSIONS_FILE, &sessions)
    }

    //
    // Derived collections
    //

    pub fn load_summaries(&self) -> Result<Vec<WeeklySummary>> {
        self.read(SUMMARIES_FILE)
    }

    pub fn load_progress(&self) -> Result<Option<UserProgress>> {
        self.read(PROGRESS_FILE)
    }

    pub fn load_badges(&self) -> Result<Vec<Badge>> {
        self.read(BADGES_FILE)
    }

    /// One write per derived collection, so a rerun replaces the previous
    /// snapshot wholesale.
    pub fn save_report(&self, report: &ProgressReport) -> Result<()> {
        self.write(SUMMARIES_FILE, &report.weeks)?;
        self.write(PROGRESS_FILE, &report.progress)?;
        self.write(BADGES_FILE, &report.badges)
    }

    //
    // Last generated plan
    //

    pub fn load_plan(&self) -> Result<Option<TrainingPlan>> {
        self.read(PLAN_FILE)
    }

    pub fn save_plan(&self, plan: &TrainingPlan) -> Result<()> {
        self.write(PLAN_FILE, plan)
    }

    //
    // User-imported catalog items
    //

    pub fn load_imported_catalog(&self) -> Result<Catalog> {
        let doc: CatalogDoc = self.read(CATALOG_FILE)?;
        Ok(Catalog {
            drills: doc.drills,
            exercises: doc.exercises,
            stretches: doc.stretches,
        })
    }

    pub fn save_imported_catalog(&self, catalog: &Catalog) -> Result<()> {
        let doc = CatalogDoc {
            drills: catalog.drills.clone(),
            exercises: catalog.exercises.clone(),
            stretches: catalog.stretches.clone(),
        };
        self.write(CATALOG_FILE, &doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PerformedDrill;
    use crate::progress::update_progress;
    use crate::types::SessionType;
    use chrono::{Local, NaiveDate};
    use tempfile::tempdir;

    fn sample_session() -> PlannedSession {
        PlannedSession {
            id: "s1".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            session_type: SessionType::Skills,
            drills: vec![PerformedDrill {
                name: "Form Shooting".into(),
                category: "Shooting".into(),
                minutes: 20,
            }],
            minutes: 45,
            completed: true,
        }
    }

    #[test]
    fn sessions_round_trip_with_iso_dates() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path()).unwrap();

        store.save_sessions(&[sample_session()]).unwrap();

        // Dates persist as zero-padded ISO strings.
        let raw = std::fs::read_to_string(dir.path().join("sessions.json")).unwrap();
        assert!(raw.contains("2024-06-10"));

        let loaded = store.load_sessions().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    }

    #[test]
    fn missing_files_load_as_defaults() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path()).unwrap();

        assert!(store.load_sessions().unwrap().is_empty());
        assert!(store.load_summaries().unwrap().is_empty());
        assert!(store.load_progress().unwrap().is_none());
        assert!(store.load_badges().unwrap().is_empty());
        assert!(store.load_plan().unwrap().is_none());
    }

    #[test]
    fn report_persists_all_three_collections() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path()).unwrap();

        let sessions = vec![sample_session()];
        let report = update_progress(&sessions, &[], Local::now());
        store.save_report(&report).unwrap();

        assert_eq!(store.load_summaries().unwrap().len(), 1);
        assert!(store.load_progress().unwrap().is_some());
        assert!(!store.load_badges().unwrap().is_empty());

        // An empty history clears the derived state on the next save.
        let cleared = update_progress(&[], &store.load_badges().unwrap(), Local::now());
        store.save_report(&cleared).unwrap();
        assert!(store.load_summaries().unwrap().is_empty());
        assert!(store.load_progress().unwrap().is_none());
    }
}
