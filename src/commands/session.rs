use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use uuid::Uuid;

use crate::cli::SessionCmd;
use crate::commands::refresh_progress;
use crate::models::{PerformedDrill, PlannedSession};
use crate::store::Store;
use crate::types::SessionType;
use crate::utils::format_minutes;

pub fn handle(cmd: SessionCmd, store: &Store) -> Result<()> {
    match cmd {
        SessionCmd::Add {
            date,
            session_type,
            minutes,
            drills,
            completed,
        } => add(store, date.as_deref(), session_type, minutes, &drills, completed),

        SessionCmd::List => list(store),

        SessionCmd::Complete { session } => toggle_complete(store, session),

        SessionCmd::Delete { session } => delete(store, session),

        SessionCmd::Log { date } => log(store, &date),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Drill entries come in as NAME:CATEGORY:MINUTES.
fn parse_drill(entry: &str) -> Option<PerformedDrill> {
    let mut parts = entry.splitn(3, ':');
    let name = parts.next()?.trim();
    let category = parts.next()?.trim();
    let minutes: u32 = parts.next()?.trim().parse().ok()?;

    if name.is_empty() {
        return None;
    }

    Some(PerformedDrill {
        name: name.into(),
        category: category.into(),
        minutes,
    })
}

fn add(
    store: &Store,
    date: Option<&str>,
    session_type: SessionType,
    minutes: u32,
    drill_entries: &[String],
    completed: bool,
) -> Result<()> {
    let date = match date {
        Some(s) => match parse_date(s) {
            Some(d) => d,
            None => {
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

    let mut drills = Vec::new();
    for entry in drill_entries {
        match parse_drill(entry) {
            Some(d) => drills.push(d),
            None => {
                println!(
                    "{} invalid drill `{}`, expected NAME:CATEGORY:MINUTES",
                    "error:".red().bold(),
                    entry
                );
                return Ok(());
            }
        }
    }

    let session = PlannedSession {
        id: Uuid::new_v4().to_string(),
        date,
        session_type,
        drills,
        minutes,
        completed,
    };

    let mut sessions = store.load_sessions()?;
    sessions.push(session);
    store.save_sessions(&sessions)?;
    refresh_progress(store)?;

    println!("{} session added on {}", "ok:".green().bold(), date);
    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let mut sessions = store.load_sessions()?;
    sessions.sort_by_key(|s| s.date);

    if sessions.is_empty() {
        println!("{}", "(no sessions yet)".dimmed());
        return Ok(());
    }

    println!("{}", "Sessions:".cyan().bold());
    for (i, session) in sessions.iter().enumerate() {
        let idx = format!("{}", i + 1).yellow();
        let mark = if session.completed {
            "✓".green().bold()
        } else {
            "·".dimmed()
        };
        println!(
            " {} {} {} — {} ({}, {} drills)",
            idx,
            mark,
            session.date.to_string().bold(),
            session.session_type,
            format_minutes(session.minutes),
            session.drills.len()
        );
    }
    Ok(())
}

/// Resolve a 1-based `session list` index against the date-sorted view,
/// then find that session in the stored order.
fn resolve_index(sessions: &[PlannedSession], index: usize) -> Option<String> {
    let mut sorted: Vec<&PlannedSession> = sessions.iter().collect();
    sorted.sort_by_key(|s| s.date);
    sorted.get(index.checked_sub(1)?).map(|s| s.id.clone())
}

fn toggle_complete(store: &Store, index: usize) -> Result<()> {
    let mut sessions = store.load_sessions()?;

    let Some(id) = resolve_index(&sessions, index) else {
        println!("{} no session at index {}", "error:".red().bold(), index);
        return Ok(());
    };

    let Some(session) = sessions.iter_mut().find(|s| s.id == id) else {
        println!("{} no session at index {}", "error:".red().bold(), index);
        return Ok(());
    };
    session.completed = !session.completed;
    let state = if session.completed {
        "completed"
    } else {
        "not completed"
    };
    let date = session.date;

    store.save_sessions(&sessions)?;
    refresh_progress(store)?;

    println!(
        "{} marked session on {} as {}",
        "ok:".green().bold(),
        date,
        state
    );
    Ok(())
}

fn delete(store: &Store, index: usize) -> Result<()> {
    let mut sessions = store.load_sessions()?;

    let Some(id) = resolve_index(&sessions, index) else {
        println!("{} no session at index {}", "error:".red().bold(), index);
        return Ok(());
    };

    sessions.retain(|s| s.id != id);
    store.save_sessions(&sessions)?;
    refresh_progress(store)?;

    println!("{} session deleted", "ok:".green().bold());
    Ok(())
}

fn log(store: &Store, date: &str) -> Result<()> {
    let Some(date) = parse_date(date) else {
        println!(
            "{} invalid date `{}`, expected YYYY-MM-DD",
            "error:".red().bold(),
            date
        );
        return Ok(());
    };

    let sessions = store.load_sessions()?;
    let on_day: Vec<&PlannedSession> = sessions.iter().filter(|s| s.date == date).collect();

    if on_day.is_empty() {
        println!("{} no sessions on {}", "warning:".yellow().bold(), date);
        return Ok(());
    }

    for session in on_day {
        let mark = if session.completed {
            "completed".green().bold().to_string()
        } else {
            "planned".dimmed().to_string()
        };
        println!(
            "{} {} — {} ({})",
            "Session:".cyan().bold(),
            session.date,
            session.session_type,
            mark
        );

        for drill in &session.drills {
            println!(
                "  • {} ({}) — {}",
                drill.name.bold(),
                drill.category.yellow(),
                format_minutes(drill.minutes)
            );
        }
    }
    Ok(())
}
