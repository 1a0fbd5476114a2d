use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::cli::{GenerateArgs, PlanCmd};
use crate::commands::{profile, refresh_progress};
use crate::generator::generate_training_plan;
use crate::models::{PerformedDrill, PlannedSession, TrainingPlan, UserProfile};
use crate::store::Store;
use crate::utils::format_minutes;

pub fn handle(cmd: PlanCmd, store: &Store) -> Result<()> {
    match cmd {
        PlanCmd::Generate(args) => generate(args, store),

        PlanCmd::Show => {
            match store.load_plan()? {
                Some(plan) => print_plan(&plan),
                None => println!(
                    "{} no plan generated yet, run `plan generate`",
                    "warning:".yellow().bold()
                ),
            }
            Ok(())
        }

        PlanCmd::Apply { start } => apply(store, start.as_deref()),
    }
}

fn generate(args: GenerateArgs, store: &Store) -> Result<()> {
    if args.weeks < 1 {
        println!("{} weeks must be at least 1", "error:".red().bold());
        return Ok(());
    }

    let profile = UserProfile::load(&profile::profile_path()?)?;
    if profile.frequency < 1 || profile.frequency > 7 {
        println!(
            "{} profile frequency must be between 1 and 7 sessions per week",
            "error:".red().bold()
        );
        return Ok(());
    }

    let catalog = Catalog::assemble(&store.load_imported_catalog()?);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = generate_training_plan(&profile, args.weeks, &catalog, &mut rng);
    print_plan(&plan);
    store.save_plan(&plan)?;

    if args.apply {
        apply(store, args.start.as_deref())?;
    } else {
        println!(
            "\n{} plan saved, run `plan apply` to schedule it",
            "ok:".green().bold()
        );
    }

    Ok(())
}

/// Flatten the last generated plan into the session store. Session order
/// is week-major/slot-minor, so the list index maps straight to a
/// calendar offset from the start date.
fn apply(store: &Store, start: Option<&str>) -> Result<()> {
    let Some(plan) = store.load_plan()? else {
        println!(
            "{} no plan generated yet, run `plan generate`",
            "warning:".yellow().bold()
        );
        return Ok(());
    };

    let start_date = match start {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                println!(
                    "{} invalid date `{}`, expected YYYY-MM-DD",
                    "error:".red().bold(),
                    s
                );
                return Ok(());
            }
        },
        None => Local::now().date_naive(),
    };

    let frequency = (plan.total_sessions / plan.weeks).max(1);
    let mut sessions = store.load_sessions()?;

    for (index, generated) in plan.sessions.iter().enumerate() {
        let week = index as u32 / frequency;
        let slot = index as u32 % frequency;
        let date = start_date + Duration::days((week * 7 + slot) as i64);

        let mut drills: Vec<PerformedDrill> = Vec::new();
        drills.extend(generated.warmup.iter().map(|w| PerformedDrill {
            name: w.name.clone(),
            category: "Warm-up".into(),
            minutes: w.minutes,
        }));
        drills.extend(generated.main.iter().map(|d| PerformedDrill {
            name: d.name.clone(),
            category: d.category.clone(),
            minutes: d.minutes,
        }));
        drills.extend(generated.cooldown.iter().map(|c| PerformedDrill {
            name: c.name.clone(),
            category: "Cool-down".into(),
            minutes: c.minutes,
        }));

        sessions.push(PlannedSession {
            id: Uuid::new_v4().to_string(),
            date,
            session_type: generated.session_type,
            drills,
            minutes: generated.minutes,
            completed: false,
        });
    }

    store.save_sessions(&sessions)?;
    refresh_progress(store)?;

    println!(
        "{} scheduled {} sessions starting {}",
        "ok:".green().bold(),
        plan.sessions.len(),
        start_date
    );
    Ok(())
}

fn print_plan(plan: &TrainingPlan) {
    println!("{} {}", "Plan:".cyan().bold(), plan.name.bold());
    println!("  {}", plan.description.dimmed());
    println!(
        "  {} {} | {} {}/10 | {} {}",
        "progression:".cyan(),
        plan.progression,
        "difficulty:".cyan(),
        plan.difficulty,
        "rest days:".cyan(),
        plan.rest_days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    for session in &plan.sessions {
        println!(
            "\n{} ({}, {}, {} intensity, {} kcal)",
            session.name.bold(),
            session.session_type,
            format_minutes(session.minutes),
            session.intensity,
            session.calories
        );

        if !session.warmup.is_empty() {
            let total: u32 = session.warmup.iter().map(|i| i.minutes).sum();
            println!("  {} ({})", "Warmup".yellow(), format_minutes(total));
            for item in &session.warmup {
                println!("    • {} — {}", item.name, format_minutes(item.minutes));
            }
        }

        if session.main.is_empty() {
            println!("  {}", "(no main drills fit the time budget)".dimmed());
        } else {
            println!("  {}", "Main".green());
            for drill in &session.main {
                let sets_reps = match (&drill.sets, &drill.reps) {
                    (Some(sets), Some(reps)) => format!(" — {} x {}", sets, reps),
                    _ => String::new(),
                };
                println!(
                    "    • {} ({}, {}){}",
                    drill.name.bold(),
                    drill.category.yellow(),
                    format_minutes(drill.minutes),
                    sets_reps
                );
            }
        }

        if !session.cooldown.is_empty() {
            let total: u32 = session.cooldown.iter().map(|i| i.minutes).sum();
            println!("  {} ({})", "Cooldown".blue(), format_minutes(total));
            for item in &session.cooldown {
                println!("    • {} — {}", item.name, format_minutes(item.minutes));
            }
        }
    }
}
