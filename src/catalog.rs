use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::models::CatalogItem;
use crate::types::SkillLevel;

/// The content catalog: basketball drills, strength exercises and
/// stretches. The generator only ever reads from it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub drills: Vec<CatalogItem>,
    pub exercises: Vec<CatalogItem>,
    pub stretches: Vec<CatalogItem>,
}

impl Catalog {
    /// Built-in content plus any user-imported items appended on top.
    pub fn assemble(imported: &Catalog) -> Catalog {
        let mut catalog = BUILTIN.clone();
        catalog.drills.extend(imported.drills.iter().cloned());
        catalog.exercises.extend(imported.exercises.iter().cloned());
        catalog.stretches.extend(imported.stretches.iter().cloned());
        catalog
    }

    pub fn warmup_stretches(&self) -> impl Iterator<Item = &CatalogItem> {
        self.stretches
            .iter()
            .filter(|s| s.category.eq_ignore_ascii_case("warm-up"))
    }

    pub fn cooldown_stretches(&self) -> impl Iterator<Item = &CatalogItem> {
        self.stretches
            .iter()
            .filter(|s| s.category.eq_ignore_ascii_case("cool-down"))
    }

    pub fn len(&self) -> usize {
        self.drills.len() + self.exercises.len() + self.stretches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn item(
    id: &str,
    name: &str,
    category: &str,
    difficulty: SkillLevel,
    minutes: u32,
    equipment: Option<&str>,
    tip: Option<&str>,
) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        difficulty,
        minutes: Some(minutes),
        equipment: equipment.map(Into::into),
        tip: tip.map(Into::into),
    }
}

pub static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    use SkillLevel::*;

    Catalog {
        drills: vec![
            item("form-shooting", "Form Shooting", "Shooting", Beginner, 8,
                 Some("Basketball"), Some("Start close to the rim and keep your elbow under the ball")),
            item("spot-shooting", "Spot Shooting", "Shooting", Beginner, 10,
                 Some("Basketball"), Some("Hold your follow-through until the ball hits the rim")),
            item("catch-and-shoot", "Catch and Shoot", "Shooting", Intermediate, 10,
                 Some("Basketball"), Some("Have your feet set before the catch")),
            item("off-dribble-shooting", "Off-the-Dribble Shooting", "Shooting", Advanced, 12,
                 Some("Basketball"), Some("One hard dribble into your shot pocket")),
            item("free-throw-routine", "Free Throw Routine", "Shooting", Beginner, 6,
                 Some("Basketball"), Some("Same routine every rep")),
            item("stationary-dribbling", "Stationary Dribbling Series", "Ball Handling", Beginner, 6,
                 Some("Basketball"), Some("Keep your eyes up the whole time")),
            item("two-ball-dribbling", "Two-Ball Dribbling", "Ball Handling", Intermediate, 8,
                 Some("Basketball"), None),
            item("cone-dribbling", "Cone Dribbling Course", "Ball Handling", Intermediate, 10,
                 Some("Cones"), Some("Change pace at every cone")),
            item("crossover-series", "Crossover Series", "Ball Handling", Advanced, 8,
                 Some("Basketball"), Some("Sell the fake with your shoulders")),
            item("wall-passing", "Wall Passing", "Passing", Beginner, 5,
                 Some("Basketball"), None),
            item("outlet-passing", "Outlet Passing", "Passing", Intermediate, 6,
                 Some("Basketball"), None),
            item("closeout-drill", "Closeout Drill", "Defense", Intermediate, 8,
                 None, Some("Sprint two-thirds, chop your feet the rest")),
            item("defensive-slides", "Defensive Slides", "Defense", Beginner, 6,
                 None, Some("Stay low, never cross your feet")),
            item("box-out-drill", "Box Out Drill", "Rebounding", Intermediate, 6,
                 Some("Basketball"), Some("Find a body first, then the ball")),
            item("mikan-drill", "Mikan Drill", "Finishing", Beginner, 6,
                 Some("Basketball"), Some("Use the backboard on every layup")),
            item("euro-step-finishing", "Euro Step Finishing", "Finishing", Advanced, 10,
                 Some("Basketball"), None),
            item("jump-stop-footwork", "Jump Stop Footwork", "Footwork", Beginner, 5,
                 None, Some("Land on two feet, ready to pivot either way")),
            item("pivot-series", "Pivot Series", "Footwork", Intermediate, 6,
                 Some("Basketball"), None),
        ],
        exercises: vec![
            item("bodyweight-squats", "Bodyweight Squats", "Strength", Beginner, 6, None,
                 Some("Full depth, knees tracking over toes")),
            item("push-ups", "Push-Ups", "Strength", Beginner, 6, None, None),
            item("walking-lunges", "Walking Lunges", "Strength", Beginner, 8, None, None),
            item("goblet-squats", "Goblet Squats", "Strength", Intermediate, 8,
                 Some("Dumbbell"), None),
            item("dumbbell-rows", "Dumbbell Rows", "Strength", Intermediate, 8,
                 Some("Dumbbell"), Some("Pull with your elbow, not your hand")),
            item("band-pull-aparts", "Band Pull-Aparts", "Strength", Beginner, 5,
                 Some("Resistance Band"), None),
            item("split-squats", "Split Squats", "Strength", Intermediate, 8, None, None),
            item("plank-series", "Plank Series", "Strength", Beginner, 6, None,
                 Some("Brace like you are about to take a charge")),
            item("calf-raises", "Calf Raises", "Strength", Beginner, 5, None, None),
            item("jump-rope", "Jump Rope", "Strength", Intermediate, 8,
                 Some("Jump Rope"), None),
        ],
        stretches: vec![
            item("leg-swings-stretch", "Standing Leg Swings", "Warm-up", Beginner, 2, None, None),
            item("walking-knee-hugs", "Walking Knee Hugs", "Warm-up", Beginner, 2, None, None),
            item("ankle-rolls", "Ankle Rolls", "Warm-up", Beginner, 2, None, None),
            item("wrist-warmup", "Wrist Circles", "Warm-up", Beginner, 2, None, None),
            item("high-knees-march", "High Knees March", "Warm-up", Beginner, 2, None, None),
            item("lateral-lunge-stretch", "Lateral Lunge Stretch", "Warm-up", Beginner, 2, None, None),
            item("hamstring-stretch", "Seated Hamstring Stretch", "Cool-down", Beginner, 2, None, None),
            item("quad-stretch", "Standing Quad Stretch", "Cool-down", Beginner, 2, None, None),
            item("calf-stretch", "Wall Calf Stretch", "Cool-down", Beginner, 2, None, None),
            item("hip-flexor-stretch", "Kneeling Hip Flexor Stretch", "Cool-down", Beginner, 2, None, None),
            item("shoulder-stretch", "Cross-Body Shoulder Stretch", "Cool-down", Beginner, 2, None, None),
            item("childs-pose", "Child's Pose", "Cool-down", Beginner, 2, None, None),
        ],
    }
});

//
// TOML import
//

#[derive(Deserialize)]
pub struct CatalogItemDef {
    pub id: String,
    pub name: String,
    pub category: String,
    pub difficulty: SkillLevel,
    pub minutes: Option<u32>,
    pub equipment: Option<String>,
    pub tip: Option<String>,
}

#[derive(Deserialize)]
pub struct CatalogImport {
    #[serde(default)]
    pub drill: Vec<CatalogItemDef>,
    #[serde(default)]
    pub exercise: Vec<CatalogItemDef>,
    #[serde(default)]
    pub stretch: Vec<CatalogItemDef>,
}

impl From<CatalogItemDef> for CatalogItem {
    fn from(def: CatalogItemDef) -> Self {
        CatalogItem {
            id: def.id,
            name: def.name,
            category: def.category,
            difficulty: def.difficulty,
            minutes: def.minutes,
            equipment: def.equipment,
            tip: def.tip,
        }
    }
}
