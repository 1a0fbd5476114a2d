use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::{ProfileCmd, SetProfileArgs};
use crate::models::UserProfile;
use crate::utils::{config_file, format_minutes};

pub fn profile_path() -> Result<PathBuf> {
    config_file("profile.toml")
}

pub fn handle(cmd: ProfileCmd) -> Result<()> {
    let path = profile_path()?;
    let mut profile = UserProfile::load(&path)?;

    match cmd {
        ProfileCmd::Show => show(&profile),

        ProfileCmd::Set(args) => {
            apply(&mut profile, args);

            if profile.frequency < 1 || profile.frequency > 7 {
                println!(
                    "{} frequency must be between 1 and 7 sessions per week",
                    "error:".red().bold()
                );
                return Ok(());
            }
            let prefs = &profile.preferences;
            if prefs.warmup_minutes + prefs.cooldown_minutes > profile.available_minutes {
                // The generator clamps the main block to zero in this case;
                // warn rather than reject.
                println!(
                    "{} warmup + cooldown exceed available minutes, sessions will have no main block",
                    "warning:".yellow().bold()
                );
            }

            profile.save(&path)?;
            println!("{} profile updated", "ok:".green().bold());
        }
    }

    Ok(())
}

fn split_labels(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn apply(profile: &mut UserProfile, args: SetProfileArgs) {
    if let Some(level) = args.skill_level {
        profile.skill_level = level;
    }
    if let Some(minutes) = args.minutes {
        profile.available_minutes = minutes;
    }
    if let Some(frequency) = args.frequency {
        profile.frequency = frequency;
    }
    if let Some(goals) = &args.goals {
        profile.goals = split_labels(goals);
    }
    if let Some(focus) = &args.focus {
        profile.focus_areas = split_labels(focus);
    }
    if let Some(equipment) = &args.equipment {
        profile.equipment = split_labels(equipment);
    }
    if let Some(limitations) = &args.limitations {
        profile.limitations = split_labels(limitations);
    }
    if let Some(intensity) = args.intensity {
        profile.preferences.intensity = intensity;
    }
    if let Some(session_type) = args.session_type {
        profile.preferences.session_type = session_type;
    }
    if let Some(warmup) = args.warmup {
        profile.preferences.warmup_minutes = warmup;
    }
    if let Some(cooldown) = args.cooldown {
        profile.preferences.cooldown_minutes = cooldown;
    }
}

fn show(profile: &UserProfile) {
    println!("{}", "Profile:".cyan().bold());
    println!("  {} {}", "skill level:".cyan(), profile.skill_level);
    println!(
        "  {} {} per session, {} sessions/week",
        "time:".cyan(),
        format_minutes(profile.available_minutes),
        profile.frequency
    );
    println!("  {} {}", "goals:".cyan(), profile.goals.join(", "));
    println!("  {} {}", "focus areas:".cyan(), profile.focus_areas.join(", "));
    println!("  {} {}", "equipment:".cyan(), profile.equipment.join(", "));
    if !profile.limitations.is_empty() {
        println!("  {} {}", "limitations:".cyan(), profile.limitations.join(", "));
    }

    let prefs = &profile.preferences;
    println!(
        "  {} {} intensity, {} sessions, warmup {}, cooldown {}",
        "preferences:".cyan(),
        prefs.intensity,
        prefs.session_type,
        format_minutes(prefs.warmup_minutes),
        format_minutes(prefs.cooldown_minutes)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Intensity, SessionType, SkillLevel};

    #[test]
    fn set_only_touches_provided_fields() {
        let mut profile = UserProfile::default();
        let args = SetProfileArgs {
            skill_level: Some(SkillLevel::Advanced),
            minutes: None,
            frequency: Some(5),
            goals: None,
            focus: Some("Shooting, Defense".into()),
            equipment: None,
            limitations: None,
            intensity: Some(Intensity::High),
            session_type: None,
            warmup: None,
            cooldown: None,
        };

        apply(&mut profile, args);

        assert_eq!(profile.skill_level, SkillLevel::Advanced);
        assert_eq!(profile.frequency, 5);
        assert_eq!(profile.focus_areas, vec!["Shooting", "Defense"]);
        assert_eq!(profile.preferences.intensity, Intensity::High);
        // Untouched fields keep their defaults.
        assert_eq!(profile.available_minutes, 60);
        assert_eq!(profile.preferences.session_type, SessionType::Mixed);
    }

    #[test]
    fn label_lists_split_on_commas_and_trim() {
        assert_eq!(
            split_labels(" Shooting ,  Ball Handling ,"),
            vec!["Shooting", "Ball Handling"]
        );
        assert!(split_labels("  ").is_empty());
    }
}
