use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::{
    CatalogItem, GeneratedSession, RoutineItem, TrainingPlan, UserProfile, WorkoutDrill,
};
use crate::types::{Intensity, SessionType};

/// Fixed dynamic warmup inserted before any stretch work.
const DYNAMIC_WARMUP: [(&str, &str, u32); 4] = [
    ("light-jog", "Light Jog", 5),
    ("arm-circles", "Arm Circles", 2),
    ("leg-swings", "Leg Swings", 2),
    ("hip-circles", "Hip Circles", 2),
];

/// Conditioning draws from this inline list, not the catalog.
const CARDIO_DRILLS: [(&str, &str, u32); 5] = [
    ("suicide-runs", "Suicide Runs", 5),
    ("ladder-drills", "Ladder Drills", 4),
    ("box-jumps", "Box Jumps", 3),
    ("burpees", "Burpees", 3),
    ("mountain-climbers", "Mountain Climbers", 3),
];

/// Each stretch entry fills a two-minute slice of the warmup or cooldown.
const STRETCH_SLICE_MINUTES: u32 = 2;

/// Generate a full multi-week training plan for `profile`.
///
/// Sessions come out in week-major, slot-minor order; callers map the list
/// index straight to a calendar offset, so the order must stay stable.
/// Best effort by contract: an under-supplied catalog produces shorter
/// drill lists, never an error, and a session with an empty main block is
/// valid output.
pub fn generate_training_plan(
    profile: &UserProfile,
    weeks: u32,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> TrainingPlan {
    let weeks = weeks.max(1);
    let frequency = profile.frequency.clamp(1, 7);

    let mut sessions = Vec::with_capacity((weeks * frequency) as usize);
    for week in 1..=weeks {
        for slot in 1..=frequency {
            sessions.push(generate_session(profile, week, slot, frequency, catalog, rng));
        }
    }

    let base = profile.preferences.intensity;
    let difficulty = (profile.skill_level.plan_difficulty_base() * base.plan_difficulty_multiplier())
        .round()
        .min(10.0) as u32;

    TrainingPlan {
        id: Uuid::new_v4().to_string(),
        name: format!(
            "{}-Week {} Training Plan",
            weeks,
            profile.preferences.session_type.label()
        ),
        description: format!(
            "{} plan for a {} player, {} sessions per week",
            profile.skill_level.progression(),
            profile.skill_level,
            frequency
        ),
        weeks,
        sessions,
        progression: profile.skill_level.progression(),
        rest_days: rest_days(frequency),
        goals: profile.goals.clone(),
        difficulty,
        total_sessions: weeks * frequency,
    }
}

/// Weekday indices (1..=7) left free of training. Greedy fill from the
/// tail of the week; known simplification, rest days are not interleaved.
fn rest_days(frequency: u32) -> Vec<u32> {
    (frequency + 1..=7).collect()
}

fn generate_session(
    profile: &UserProfile,
    week: u32,
    slot: u32,
    frequency: u32,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> GeneratedSession {
    let session_type = resolve_session_type(profile, week, slot, frequency);
    let intensity = ratchet_intensity(profile.preferences.intensity, week);

    let warmup_budget = profile.preferences.warmup_minutes;
    let cooldown_budget = profile.preferences.cooldown_minutes;
    // A profile whose warmup + cooldown exceed the available time leaves
    // no main-workout budget; clamp instead of going negative.
    let main_budget = profile
        .available_minutes
        .saturating_sub(warmup_budget + cooldown_budget);

    let warmup = build_warmup(warmup_budget, catalog);
    let cooldown = build_cooldown(cooldown_budget, catalog);
    let main = main_block(profile, session_type, main_budget, intensity, catalog, rng);

    let difficulty = (profile.skill_level.session_difficulty_base()
        * intensity.session_difficulty_multiplier())
    .round()
    .clamp(1.0, 10.0) as u32;

    let focus = if profile.focus_areas.is_empty() {
        session_type.label().to_string()
    } else {
        profile.focus_areas.join(", ")
    };

    let mut tips: Vec<String> = main.iter().filter_map(|d| d.notes.clone()).collect();
    tips.extend(
        catalog
            .drills
            .iter()
            .chain(&catalog.exercises)
            .filter(|item| main.iter().any(|d| d.id == item.id))
            .filter_map(|item| item.tip.clone()),
    );
    tips.sort();
    tips.dedup();

    GeneratedSession {
        id: Uuid::new_v4().to_string(),
        name: format!("Week {} Session {}: {} Training", week, slot, session_type.label()),
        session_type,
        minutes: profile.available_minutes,
        intensity,
        focus: focus.clone(),
        warmup,
        main,
        cooldown,
        difficulty,
        calories: profile.available_minutes * intensity.calories_per_minute(),
        description: format!(
            "{} session focused on {} at {} intensity",
            session_type.label(),
            focus,
            intensity
        ),
        tips,
    }
}

/// A fixed preference pins every session to that type. `mixed` rotates
/// through skills/strength/conditioning on one continuously-advancing
/// counter across the whole plan, so types spread evenly no matter the
/// weekly frequency. `frequency` is the caller's clamped value, not the
/// raw profile field, so the counter stays in step with the emitted
/// session order.
fn resolve_session_type(
    profile: &UserProfile,
    week: u32,
    slot: u32,
    frequency: u32,
) -> SessionType {
    if profile.preferences.session_type != SessionType::Mixed {
        return profile.preferences.session_type;
    }

    const ROTATION: [SessionType; 3] = [
        SessionType::Skills,
        SessionType::Strength,
        SessionType::Conditioning,
    ];
    let index = (week - 1) * frequency + (slot - 1);
    ROTATION[(index % 3) as usize]
}

/// Progressive overload: weeks 1-2 keep the base, weeks 3-4 run at least
/// medium, weeks 5+ at high. One-way ratchet within a single plan call;
/// not history-aware.
fn ratchet_intensity(base: Intensity, week: u32) -> Intensity {
    let floor = match week {
        1..=2 => Intensity::Low,
        3..=4 => Intensity::Medium,
        _ => Intensity::High,
    };
    base.max(floor)
}

/// Dynamic sequence first, then two-minute stretch slices while at least
/// two minutes remain. May under-fill when the catalog runs out.
fn build_warmup(budget: u32, catalog: &Catalog) -> Vec<RoutineItem> {
    let mut items = Vec::new();
    let mut remaining = budget;

    for (id, name, minutes) in DYNAMIC_WARMUP {
        let take = minutes.min(remaining);
        if take == 0 {
            break;
        }
        items.push(RoutineItem {
            id: id.into(),
            name: name.into(),
            minutes: take,
        });
        remaining -= take;
    }

    for stretch in catalog.warmup_stretches() {
        if remaining < STRETCH_SLICE_MINUTES {
            break;
        }
        items.push(RoutineItem {
            id: stretch.id.clone(),
            name: stretch.name.clone(),
            minutes: STRETCH_SLICE_MINUTES,
        });
        remaining -= STRETCH_SLICE_MINUTES;
    }

    items
}

/// Two-minute stretch slices, then a single walking filler absorbing
/// whatever is left, so the cooldown always fills its budget exactly.
fn build_cooldown(budget: u32, catalog: &Catalog) -> Vec<RoutineItem> {
    let mut items = Vec::new();
    let mut remaining = budget;

    for stretch in catalog.cooldown_stretches() {
        if remaining < STRETCH_SLICE_MINUTES {
            break;
        }
        items.push(RoutineItem {
            id: stretch.id.clone(),
            name: stretch.name.clone(),
            minutes: STRETCH_SLICE_MINUTES,
        });
        remaining -= STRETCH_SLICE_MINUTES;
    }

    if remaining > 0 {
        items.push(RoutineItem {
            id: "light-walking".into(),
            name: "Light Walking".into(),
            minutes: remaining,
        });
    }

    items
}

fn main_block(
    profile: &UserProfile,
    session_type: SessionType,
    minutes: u32,
    intensity: Intensity,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> Vec<WorkoutDrill> {
    if minutes == 0 {
        return Vec::new();
    }

    match session_type {
        SessionType::Skills => skills_block(profile, minutes, intensity, catalog, rng),
        SessionType::Strength => strength_block(profile, minutes, intensity, catalog, rng),
        SessionType::Conditioning => conditioning_block(minutes, rng),
        SessionType::Mixed => {
            // 40% skills, 35% strength, conditioning takes the remainder.
            // The three sub-blocks round independently, so the combined
            // drill time may drift from the nominal budget. Known and
            // accepted.
            let skills_minutes = (minutes as f32 * 0.40).round() as u32;
            let strength_minutes = (minutes as f32 * 0.35).round() as u32;
            let conditioning_minutes = minutes.saturating_sub(skills_minutes + strength_minutes);

            let mut drills = skills_block(profile, skills_minutes, intensity, catalog, rng);
            drills.extend(strength_block(profile, strength_minutes, intensity, catalog, rng));
            drills.extend(conditioning_block(conditioning_minutes, rng));
            drills
        }
    }
}

/// Drills whose category matches any focus area, case-insensitive
/// substring match. Skill level does not narrow the pool further.
fn matches_focus(item: &CatalogItem, focus_areas: &[String]) -> bool {
    let category = item.category.to_lowercase();
    focus_areas
        .iter()
        .any(|f| category.contains(&f.to_lowercase()))
}

fn skills_block(
    profile: &UserProfile,
    minutes: u32,
    intensity: Intensity,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> Vec<WorkoutDrill> {
    if minutes == 0 {
        return Vec::new();
    }

    let multiplier = intensity.skills_multiplier();
    let candidates: Vec<&CatalogItem> = catalog
        .drills
        .iter()
        .filter(|d| matches_focus(d, &profile.focus_areas))
        .collect();

    let count = ((minutes as f32 / 8.0) * multiplier).round().max(3.0) as usize;
    let picked = pick_subset(&candidates, count, rng);

    let reps = (10.0 * multiplier).round() as u32;
    let mut remaining = minutes;
    let mut drills = Vec::new();

    for item in picked {
        let duration = (item.minutes.unwrap_or(5) as f32 * multiplier).round() as u32;
        if duration == 0 || duration > remaining {
            break;
        }
        remaining -= duration;

        drills.push(WorkoutDrill {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            minutes: duration,
            sets: Some(intensity.skills_sets()),
            reps: Some(reps.to_string()),
            rest_minutes: Some(intensity.skills_rest_minutes()),
            notes: Some(format!(
                "Work at a controlled pace suited to a {} player",
                profile.skill_level
            )),
        });
    }

    drills
}

fn strength_block(
    profile: &UserProfile,
    minutes: u32,
    intensity: Intensity,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> Vec<WorkoutDrill> {
    if minutes == 0 {
        return Vec::new();
    }

    let candidates: Vec<&CatalogItem> = catalog
        .exercises
        .iter()
        .filter(|e| match &e.equipment {
            None => true,
            Some(eq) => profile
                .equipment
                .iter()
                .any(|owned| owned.eq_ignore_ascii_case(eq)),
        })
        .collect();

    let count = ((minutes as f32 / 12.0) * intensity.strength_count_multiplier())
        .round()
        .max(4.0) as usize;
    let picked = pick_subset(&candidates, count, rng);

    let mut remaining = minutes;
    let mut drills = Vec::new();

    for item in picked {
        let duration =
            (item.minutes.unwrap_or(8) as f32 * intensity.strength_duration_multiplier()).round()
                as u32;
        if duration == 0 || duration > remaining {
            break;
        }
        remaining -= duration;

        drills.push(WorkoutDrill {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            minutes: duration,
            sets: Some(intensity.skills_sets()),
            reps: Some(intensity.strength_reps().to_string()),
            rest_minutes: Some(intensity.strength_rest_minutes()),
            notes: None,
        });
    }

    drills
}

/// Intensity does not change the conditioning prescription: fixed sets,
/// timed reps, one-minute rest.
fn conditioning_block(minutes: u32, rng: &mut impl Rng) -> Vec<WorkoutDrill> {
    if minutes == 0 {
        return Vec::new();
    }

    let count = (minutes as f32 / 4.0).ceil() as usize;
    let mut pool: Vec<&(&str, &str, u32)> = CARDIO_DRILLS.iter().collect();
    pool.shuffle(rng);
    pool.truncate(count);

    pool.into_iter()
        .map(|(id, name, drill_minutes)| WorkoutDrill {
            id: (*id).into(),
            name: (*name).into(),
            category: "Conditioning".into(),
            minutes: *drill_minutes,
            sets: Some(3),
            reps: Some("30 seconds".into()),
            rest_minutes: Some(1.0),
            notes: None,
        })
        .collect()
}

/// Pseudo-random subset of size `n` (or fewer when the pool is small).
fn pick_subset<'a>(
    candidates: &[&'a CatalogItem],
    n: usize,
    rng: &mut impl Rng,
) -> Vec<&'a CatalogItem> {
    let mut pool = candidates.to_vec();
    pool.shuffle(rng);
    pool.truncate(n);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BUILTIN;
    use crate::models::Preferences;
    use crate::types::SkillLevel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn profile(session_type: SessionType, intensity: Intensity) -> UserProfile {
        UserProfile {
            skill_level: SkillLevel::Beginner,
            goals: vec!["Make the team".into()],
            available_minutes: 60,
            frequency: 3,
            focus_areas: vec!["Shooting".into(), "Ball Handling".into()],
            equipment: vec!["Basketball".into(), "Dumbbell".into()],
            limitations: Vec::new(),
            preferences: Preferences {
                intensity,
                session_type,
                warmup_minutes: 10,
                cooldown_minutes: 10,
            },
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn plan_has_frequency_times_weeks_sessions_in_order() {
        let profile = profile(SessionType::Skills, Intensity::Medium);
        let plan = generate_training_plan(&profile, 4, &BUILTIN, &mut rng());

        assert_eq!(plan.sessions.len(), 12);
        assert_eq!(plan.total_sessions, 12);

        // Week-major, slot-minor ordering.
        for (i, session) in plan.sessions.iter().enumerate() {
            let week = i as u32 / 3 + 1;
            let slot = i as u32 % 3 + 1;
            assert!(session.name.starts_with(&format!("Week {} Session {}", week, slot)));
        }
    }

    #[test]
    fn mixed_preference_rotates_on_a_single_counter() {
        let profile = profile(SessionType::Mixed, Intensity::Medium);
        let plan = generate_training_plan(&profile, 2, &BUILTIN, &mut rng());

        const ROTATION: [SessionType; 3] = [
            SessionType::Skills,
            SessionType::Strength,
            SessionType::Conditioning,
        ];
        for (i, session) in plan.sessions.iter().enumerate() {
            assert_eq!(session.session_type, ROTATION[i % 3], "session {}", i);
        }
    }

    #[test]
    fn rotation_counter_uses_the_clamped_frequency() {
        // A hand-edited profile can carry an out-of-range frequency. The
        // plan clamps it to 7 sessions per week, and the rotation counter
        // must advance on the same clamped value or the types drift from
        // the emitted session order.
        let mut profile = profile(SessionType::Mixed, Intensity::Medium);
        profile.frequency = 9;
        let plan = generate_training_plan(&profile, 2, &BUILTIN, &mut rng());

        assert_eq!(plan.sessions.len(), 14);

        const ROTATION: [SessionType; 3] = [
            SessionType::Skills,
            SessionType::Strength,
            SessionType::Conditioning,
        ];
        for (i, session) in plan.sessions.iter().enumerate() {
            assert_eq!(session.session_type, ROTATION[i % 3], "session {}", i);
        }
    }

    #[test]
    fn fixed_preference_pins_every_session() {
        let profile = profile(SessionType::Strength, Intensity::Medium);
        let plan = generate_training_plan(&profile, 2, &BUILTIN, &mut rng());
        assert!(plan
            .sessions
            .iter()
            .all(|s| s.session_type == SessionType::Strength));
    }

    #[test]
    fn intensity_ratchets_up_and_never_down() {
        assert_eq!(ratchet_intensity(Intensity::Low, 1), Intensity::Low);
        assert_eq!(ratchet_intensity(Intensity::Low, 2), Intensity::Low);
        assert_eq!(ratchet_intensity(Intensity::Low, 3), Intensity::Medium);
        assert_eq!(ratchet_intensity(Intensity::Low, 4), Intensity::Medium);
        assert_eq!(ratchet_intensity(Intensity::Low, 5), Intensity::High);
        assert_eq!(ratchet_intensity(Intensity::Low, 9), Intensity::High);

        // High base never decreases.
        for week in 1..=8 {
            assert_eq!(ratchet_intensity(Intensity::High, week), Intensity::High);
        }
    }

    #[test]
    fn warmup_respects_budget_and_cooldown_fills_exactly() {
        let profile = profile(SessionType::Skills, Intensity::Medium);
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

        for session in &plan.sessions {
            let warmup: u32 = session.warmup.iter().map(|i| i.minutes).sum();
            let cooldown: u32 = session.cooldown.iter().map(|i| i.minutes).sum();
            assert!(warmup <= 10);
            assert_eq!(cooldown, 10);
        }
    }

    #[test]
    fn cooldown_filler_absorbs_odd_minutes() {
        let items = build_cooldown(7, &BUILTIN);
        let total: u32 = items.iter().map(|i| i.minutes).sum();
        assert_eq!(total, 7);
        assert_eq!(items.last().unwrap().name, "Light Walking");
        assert_eq!(items.last().unwrap().minutes, 1);
    }

    #[test]
    fn difficulty_in_range_and_calories_exact() {
        for (intensity, per_minute) in [
            (Intensity::Low, 4),
            (Intensity::Medium, 6),
            (Intensity::High, 8),
        ] {
            let profile = profile(SessionType::Skills, intensity);
            let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

            for session in &plan.sessions {
                assert!((1..=10).contains(&session.difficulty));
                // Weeks 1-2 keep the base intensity, so calories match it.
                assert_eq!(session.calories, 60 * per_minute);
            }
        }
    }

    #[test]
    fn zero_main_budget_yields_empty_main_block() {
        let mut profile = profile(SessionType::Skills, Intensity::Medium);
        profile.available_minutes = 20;
        // Warmup + cooldown consume the whole session; must not underflow.
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

        for session in &plan.sessions {
            assert!(session.main.is_empty());
        }
    }

    #[test]
    fn unmatched_focus_areas_degrade_to_no_drills() {
        let mut profile = profile(SessionType::Skills, Intensity::Medium);
        profile.focus_areas = vec!["Curling".into()];
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

        for session in &plan.sessions {
            assert!(session.main.is_empty());
        }
    }

    #[test]
    fn strength_block_honors_owned_equipment() {
        let mut profile = profile(SessionType::Strength, Intensity::Medium);
        profile.equipment = Vec::new();
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

        let owned_only = plan
            .sessions
            .iter()
            .flat_map(|s| &s.main)
            .all(|d| BUILTIN
                .exercises
                .iter()
                .find(|e| e.id == d.id)
                .is_some_and(|e| e.equipment.is_none()));
        assert!(owned_only);
    }

    #[test]
    fn strength_reps_decrease_and_rest_increases_with_intensity() {
        assert_eq!(Intensity::Low.strength_reps(), 12);
        assert_eq!(Intensity::High.strength_reps(), 8);
        assert!(Intensity::Low.strength_rest_minutes() < Intensity::High.strength_rest_minutes());
        // Skills convention is the opposite.
        assert!(Intensity::Low.skills_rest_minutes() > Intensity::High.skills_rest_minutes());
    }

    #[test]
    fn conditioning_uses_fixed_prescription() {
        let drills = conditioning_block(16, &mut rng());
        assert_eq!(drills.len(), 4);
        for d in &drills {
            assert_eq!(d.sets, Some(3));
            assert_eq!(d.reps.as_deref(), Some("30 seconds"));
            assert_eq!(d.rest_minutes, Some(1.0));
        }
    }

    #[test]
    fn mixed_main_block_concatenates_all_three_kinds() {
        let profile = profile(SessionType::Mixed, Intensity::Medium);
        let drills = main_block(
            &profile,
            SessionType::Mixed,
            60,
            Intensity::Medium,
            &BUILTIN,
            &mut rng(),
        );

        assert!(drills.iter().any(|d| d.category == "Conditioning"));
        assert!(drills.iter().any(|d| d.category == "Strength"));
        assert!(drills
            .iter()
            .any(|d| d.category == "Shooting" || d.category == "Ball Handling"));
    }

    #[test]
    fn same_seed_reproduces_the_same_plan() {
        let profile = profile(SessionType::Skills, Intensity::Medium);
        let a = generate_training_plan(&profile, 2, &BUILTIN, &mut StdRng::seed_from_u64(7));
        let b = generate_training_plan(&profile, 2, &BUILTIN, &mut StdRng::seed_from_u64(7));

        let ids = |plan: &TrainingPlan| -> Vec<String> {
            plan.sessions
                .iter()
                .flat_map(|s| s.main.iter().map(|d| d.id.clone()))
                .collect()
        };
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn plan_aggregates_follow_skill_level() {
        use crate::types::Progression;

        let mut profile = profile(SessionType::Skills, Intensity::Medium);
        profile.frequency = 5;
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

        assert_eq!(plan.progression, Progression::Linear);
        // Greedy fill from the tail of the week.
        assert_eq!(plan.rest_days, vec![6, 7]);
        assert_eq!(plan.difficulty, 3); // round(3.0 * 1.0)

        profile.skill_level = SkillLevel::Advanced;
        profile.preferences.intensity = Intensity::High;
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());
        assert_eq!(plan.progression, Progression::Maintenance);
        assert_eq!(plan.difficulty, 10); // round(8.0 * 1.2) = 10
    }

    #[test]
    fn worked_example_beginner_skills_plan() {
        let mut profile = profile(SessionType::Skills, Intensity::Low);
        profile.preferences.cooldown_minutes = 10;
        let plan = generate_training_plan(&profile, 1, &BUILTIN, &mut rng());

        assert_eq!(plan.sessions.len(), 3);
        for session in &plan.sessions {
            assert_eq!(session.session_type, SessionType::Skills);
            let warmup: u32 = session.warmup.iter().map(|i| i.minutes).sum();
            let cooldown: u32 = session.cooldown.iter().map(|i| i.minutes).sum();
            assert!(warmup <= 10);
            assert_eq!(cooldown, 10);
            assert_eq!(session.calories, 60 * 4);
        }
    }
}
