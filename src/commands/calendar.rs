use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use std::collections::HashMap;

use crate::models::PlannedSession;
use crate::store::Store;
use crate::utils::format_minutes;

pub fn handle(store: &Store, year: Option<i32>, month: Option<u32>) -> Result<()> {
    // Get current date if year/month not specified
    let now = chrono::Local::now();
    let year = year.unwrap_or(now.year());
    let month = month.unwrap_or(now.month());

    // Validate month
    if !(1..=12).contains(&month) {
        println!("{} month must be between 1 and 12", "error:".red().bold());
        return Ok(());
    }

    // First and last day of the month; both constructions are in range.
    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        println!("{} invalid year {}", "error:".red().bold(), year);
        return Ok(());
    };
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .and_then(|d| d.pred_opt())
    .unwrap_or(first_day);

    let all = store.load_sessions()?;
    let mut sessions: Vec<&PlannedSession> = all
        .iter()
        .filter(|s| s.date >= first_day && s.date <= last_day)
        .collect();
    sessions.sort_by_key(|s| s.date);

    // Print calendar header
    let month_name = first_day.format("%B %Y").to_string();
    println!("\n{}", month_name.bold().cyan());
    println!("{}", "Su Mo Tu We Th Fr Sa".dimmed());

    // Get the day of week for the first day (0 = Sunday)
    let first_weekday = first_day.weekday().num_days_from_sunday() as usize;

    // Print leading spaces
    print!("{}", "   ".repeat(first_weekday));

    // Map day-of-month to its sessions
    let mut sessions_by_day: HashMap<u32, Vec<&PlannedSession>> = HashMap::new();
    for session in &sessions {
        sessions_by_day
            .entry(session.date.day())
            .or_default()
            .push(session);
    }

    // Print calendar days
    for day in 1..=last_day.day() {
        match sessions_by_day.get(&day) {
            // Completed sessions in green, planned-only in yellow
            Some(on_day) if on_day.iter().any(|s| s.completed) => {
                print!("{:>2} ", day.to_string().green().bold())
            }
            Some(_) => print!("{:>2} ", day.to_string().yellow().bold()),
            None => print!("{:2} ", day),
        }

        // New line at end of week
        if (first_weekday + day as usize) % 7 == 0 {
            println!();
        }
    }
    println!("\n");

    // Print session details
    if !sessions.is_empty() {
        println!("{}", "Sessions:".bold().cyan());
        for session in sessions {
            let mark = if session.completed {
                "✓".green().bold().to_string()
            } else {
                "·".dimmed().to_string()
            };
            println!(
                "  {} {} — {} ({})",
                mark,
                session.date.format("%a %b %d").to_string().green(),
                session.session_type,
                format_minutes(session.minutes)
            );
        }
    }

    Ok(())
}
