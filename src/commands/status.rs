use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use crate::commands::refresh_progress;
use crate::models::{Badge, UserProgress, WeeklySummary};
use crate::store::Store;
use crate::utils::format_minutes;

pub fn handle(store: &Store, show_graph: bool, weeks: usize) -> Result<()> {
    let report = refresh_progress(store)?;

    if report.weeks.is_empty() {
        println!(
            "{} no sessions yet, add one with `session add` or apply a plan",
            "warning:".yellow().bold()
        );
        return Ok(());
    }

    // Streaks, XP and badges stay lifetime figures; only the weekly view
    // is windowed.
    let recent = recent_weeks(&report.weeks, weeks);
    print_weeks(recent);

    if let Some(progress) = &report.progress {
        print_progress(progress);
    }

    if !report.badges.is_empty() {
        print_badges(&report.badges);
    }

    if show_graph {
        let data: Vec<(NaiveDate, f32)> = recent
            .iter()
            .map(|w| (w.week_start, w.completed_minutes as f32))
            .collect();

        let (term_width, term_height) = term_size::dimensions().unwrap_or((80, 24));
        let width = (term_width / 2).min(60);
        let height = (term_height / 2).min(15);

        for line in create_ascii_graph(&data, width, height, "Weekly Minutes") {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Last `n` week buckets in ascending order. The summaries come out of
/// the aggregator oldest first, so the tail is the most recent weeks.
fn recent_weeks(weeks: &[WeeklySummary], n: usize) -> &[WeeklySummary] {
    let n = n.max(1);
    &weeks[weeks.len().saturating_sub(n)..]
}

fn print_weeks(weeks: &[WeeklySummary]) {
    println!("{}", "Weekly summary:".cyan().bold());
    for week in weeks {
        println!(
            "  {} – {}  {}/{} sessions completed, {}",
            week.week_start.to_string().bold(),
            week.week_end,
            week.completed_sessions,
            week.planned_sessions,
            format_minutes(week.completed_minutes)
        );

        if !week.category_minutes.is_empty() {
            let breakdown = week
                .category_minutes
                .iter()
                .map(|(category, minutes)| format!("{} {}", category, format_minutes(*minutes)))
                .collect::<Vec<_>>()
                .join(", ");
            println!("    {}", breakdown.dimmed());
        }

        println!(
            "    {} {} xp ({:.0}/session, {:.0}/drill)",
            "xp:".cyan(),
            week.xp,
            week.xp_per_session,
            week.xp_per_drill
        );
    }
}

fn print_progress(progress: &UserProgress) {
    println!();
    println!("{}", "Progress:".cyan().bold());
    println!(
        "  {} {} | {} {} days (best {})",
        "level:".cyan().bold(),
        progress.level,
        "streak:".cyan().bold(),
        progress.streak,
        progress.longest_streak
    );
    println!(
        "  {} {} | {} {} | {} ~{} shots",
        "xp:".cyan().bold(),
        progress.xp,
        "longest session:".cyan().bold(),
        format_minutes(progress.most_minutes),
        "shot volume:".cyan().bold(),
        progress.most_shots
    );
}

fn print_badges(badges: &[Badge]) {
    println!();
    println!("{}", "Badges:".cyan().bold());
    for badge in badges {
        let earned = match badge.earned_at {
            Some(at) => format!("earned {}", at.format("%Y-%m-%d")),
            None => "earned".to_string(),
        };
        println!(
            "  {} {} — {} ({})",
            badge.icon,
            badge.name.bold(),
            badge.description,
            earned.dimmed()
        );
    }
}

fn create_ascii_graph(
    data: &[(NaiveDate, f32)],
    width: usize,
    height: usize,
    title: &str,
) -> Vec<String> {
    if data.is_empty() {
        return vec!["No data available".to_string()];
    }

    let min_value = data.iter().map(|(_, v)| *v).fold(f32::INFINITY, f32::min);
    let max_value = data
        .iter()
        .map(|(_, v)| *v)
        .fold(f32::NEG_INFINITY, f32::max);
    let range = max_value - min_value;

    if range == 0.0 || data.len() < 2 {
        return vec!["Not enough variation to graph".to_string()];
    }

    // Create the graph grid
    let mut grid = vec![vec![' '; width]; height];

    // Draw the data points and lines
    for i in 0..data.len() {
        let (_, value) = data[i];
        let x = (i as f32 / (data.len() - 1) as f32 * (width - 1) as f32) as usize;
        let y = ((value - min_value) / range * (height - 1) as f32) as usize;
        let y = height - 1 - y; // Flip the y-axis

        if y < height && x < width {
            grid[y][x] = '●';
        }

        // Draw connecting lines
        if i > 0 {
            let prev_x = ((i - 1) as f32 / (data.len() - 1) as f32 * (width - 1) as f32) as usize;
            let prev_y = ((data[i - 1].1 - min_value) / range * (height - 1) as f32) as usize;
            let prev_y = height - 1 - prev_y;

            // Draw line between points
            let dx = x as isize - prev_x as isize;
            let dy = y as isize - prev_y as isize;
            let steps = dx.abs().max(dy.abs());

            for step in 1..steps {
                let px = prev_x as isize + (dx * step / steps);
                let py = prev_y as isize + (dy * step / steps);

                if px >= 0 && px < width as isize && py >= 0 && py < height as isize {
                    let px = px as usize;
                    let py = py as usize;
                    if grid[py][px] == ' ' {
                        grid[py][px] = '·';
                    }
                }
            }
        }
    }

    // Convert grid to strings with y-axis labels
    let mut result = Vec::new();
    let step = range / (height - 1) as f32;

    // Add title
    result.push(format!("\n{}", title.bold()));
    result.push("─".repeat(width + 7));

    // Add the graph with y-axis labels
    for (i, row) in grid.iter().enumerate() {
        let value = min_value + step * (height - 1 - i) as f32;
        let label = format!("{:4.0} │{}", value, row.iter().collect::<String>());
        result.push(label);
    }

    // Add x-axis
    result.push(format!("     └{}", "─".repeat(width)));

    // Add date labels
    let first_date = data.first().map(|(d, _)| d.to_string()).unwrap_or_default();
    let last_date = data.last().map(|(d, _)| d.to_string()).unwrap_or_default();
    result.push(format!("     {}  {}", first_date, last_date));

    result
}
