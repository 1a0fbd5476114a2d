use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use itertools::Itertools;
use std::collections::BTreeMap;

use crate::models::{Badge, PlannedSession, UserProgress, WeeklySummary};

/// XP awarded per completed training minute.
const XP_PER_MINUTE: u32 = 2;
/// XP needed to advance one level.
const XP_PER_LEVEL: u64 = 2000;
/// Shot estimate per shooting drill.
const SHOTS_PER_DRILL: u32 = 10;

/// Everything the aggregator derives from one session-store snapshot.
/// The caller persists each collection; the aggregator never writes.
#[derive(Debug, Clone, Default)]
pub struct ProgressReport {
    pub weeks: Vec<WeeklySummary>,
    pub progress: Option<UserProgress>,
    pub badges: Vec<Badge>,
}

/// Full recomputation over the whole session history. An empty history
/// clears all derived state. Idempotent apart from badge timestamps,
/// which are merged from `previous_badges` so award dates stay put.
pub fn update_progress(
    sessions: &[PlannedSession],
    previous_badges: &[Badge],
    now: DateTime<Local>,
) -> ProgressReport {
    if sessions.is_empty() {
        return ProgressReport::default();
    }

    let weeks = weekly_summaries(sessions);
    let progress = user_progress(sessions);
    let badges = award_badges(&progress, sessions, previous_badges, now);

    ProgressReport {
        weeks,
        progress: Some(progress),
        badges,
    }
}

/// Monday-aligned start of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Group the history into ISO-style weeks and compute per-week stats.
/// A BTreeMap keyed by week start gives the ascending output order.
fn weekly_summaries(sessions: &[PlannedSession]) -> Vec<WeeklySummary> {
    let mut buckets: BTreeMap<NaiveDate, Vec<PlannedSession>> = BTreeMap::new();
    for session in sessions {
        buckets
            .entry(week_start(session.date))
            .or_default()
            .push(session.clone());
    }

    buckets
        .into_iter()
        .map(|(start, bucket)| {
            let completed: Vec<&PlannedSession> =
                bucket.iter().filter(|s| s.completed).collect();
            let completed_minutes: u32 = completed.iter().map(|s| s.minutes).sum();

            let mut category_minutes: BTreeMap<String, u32> = BTreeMap::new();
            let mut drill_count: u32 = 0;
            for session in &completed {
                for drill in &session.drills {
                    let category = if drill.category.trim().is_empty() {
                        "Other".to_string()
                    } else {
                        drill.category.clone()
                    };
                    *category_minutes.entry(category).or_insert(0) += drill.minutes;
                    drill_count += 1;
                }
            }

            let xp = completed_minutes * XP_PER_MINUTE;
            let per = |count: u32| if count == 0 { 0.0 } else { xp as f32 / count as f32 };

            WeeklySummary {
                week_start: start,
                week_end: start + Duration::days(6),
                planned_sessions: bucket.len() as u32,
                completed_sessions: completed.len() as u32,
                completed_minutes,
                category_minutes,
                xp,
                xp_per_session: per(completed.len() as u32),
                xp_per_drill: per(drill_count),
                sessions: bucket,
            }
        })
        .collect()
}

fn user_progress(sessions: &[PlannedSession]) -> UserProgress {
    let completed: Vec<&PlannedSession> = sessions.iter().filter(|s| s.completed).collect();

    let dates: Vec<NaiveDate> = completed
        .iter()
        .map(|s| s.date)
        .sorted()
        .dedup()
        .collect();

    let xp: u64 = completed
        .iter()
        .map(|s| (s.minutes * XP_PER_MINUTE) as u64)
        .sum();

    let most_shots: u32 = completed
        .iter()
        .map(|s| {
            let shooting_drills = s
                .drills
                .iter()
                .filter(|d| {
                    d.category.to_lowercase().contains("shoot")
                        || d.name.to_lowercase().contains("shoot")
                })
                .count() as u32;
            shooting_drills * SHOTS_PER_DRILL
        })
        .sum();

    UserProgress {
        streak: current_streak(&dates),
        longest_streak: longest_streak(&dates),
        xp,
        level: (xp / XP_PER_LEVEL) as u32 + 1,
        most_minutes: completed.iter().map(|s| s.minutes).max().unwrap_or(0),
        most_shots,
    }
}

/// Consecutive training days counted backward from the most recent date.
/// Stops at the first gap larger than one day. `dates` must be sorted
/// ascending and deduplicated.
fn current_streak(dates: &[NaiveDate]) -> u32 {
    let mut streak = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates.iter().rev() {
        match previous {
            None => streak = 1,
            Some(prev) if prev - date <= Duration::days(1) => streak += 1,
            Some(_) => break,
        }
        previous = Some(date);
    }

    streak
}

/// Longest run of strictly consecutive days anywhere in the history.
fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}

struct BadgeRule {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
    category: &'static str,
    earned: fn(&UserProgress, &[PlannedSession]) -> bool,
}

const BADGE_RULES: [BadgeRule; 8] = [
    BadgeRule {
        id: "first-session",
        name: "First Bucket",
        icon: "🏀",
        description: "Complete your first training session",
        category: "milestone",
        earned: |_, sessions| sessions.iter().any(|s| s.completed),
    },
    BadgeRule {
        id: "streak-3",
        name: "Heating Up",
        icon: "🔥",
        description: "Train three days in a row",
        category: "streak",
        earned: |p, _| p.streak >= 3,
    },
    BadgeRule {
        id: "streak-7",
        name: "On Fire",
        icon: "🔥",
        description: "Train seven days in a row",
        category: "streak",
        earned: |p, _| p.streak >= 7,
    },
    BadgeRule {
        id: "streak-30",
        name: "Unstoppable",
        icon: "🏆",
        description: "Train thirty days in a row",
        category: "streak",
        earned: |p, _| p.streak >= 30,
    },
    BadgeRule {
        id: "xp-1000",
        name: "Grinder",
        icon: "⚡",
        description: "Earn 1,000 XP",
        category: "xp",
        earned: |p, _| p.xp >= 1000,
    },
    BadgeRule {
        id: "xp-5000",
        name: "Gym Rat",
        icon: "💎",
        description: "Earn 5,000 XP",
        category: "xp",
        earned: |p, _| p.xp >= 5000,
    },
    BadgeRule {
        id: "shots-100",
        name: "Shooter",
        icon: "🎯",
        description: "Put up an estimated 100 shots",
        category: "shooting",
        earned: |p, _| p.most_shots >= 100,
    },
    BadgeRule {
        id: "shots-500",
        name: "Sniper",
        icon: "🎖",
        description: "Put up an estimated 500 shots",
        category: "shooting",
        earned: |p, _| p.most_shots >= 500,
    },
];

/// Evaluate the fixed rule list and merge earned-at timestamps from the
/// previous badge set: once a badge carries an award date, recomputation
/// never moves it.
fn award_badges(
    progress: &UserProgress,
    sessions: &[PlannedSession],
    previous: &[Badge],
    now: DateTime<Local>,
) -> Vec<Badge> {
    let earned_before: BTreeMap<&str, Option<DateTime<Local>>> = previous
        .iter()
        .map(|b| (b.id.as_str(), b.earned_at))
        .collect();

    BADGE_RULES
        .iter()
        .filter(|rule| (rule.earned)(progress, sessions))
        .unique_by(|rule| rule.id)
        .map(|rule| Badge {
            id: rule.id.into(),
            name: rule.name.into(),
            icon: rule.icon.into(),
            description: rule.description.into(),
            category: rule.category.into(),
            earned_at: earned_before
                .get(rule.id)
                .copied()
                .unwrap_or(Some(now)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PerformedDrill;
    use crate::types::SessionType;
    use chrono::TimeZone;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn session(id: &str, date: &str, minutes: u32, completed: bool) -> PlannedSession {
        PlannedSession {
            id: id.into(),
            date: day(date),
            session_type: SessionType::Skills,
            drills: vec![
                PerformedDrill {
                    name: "Form Shooting".into(),
                    category: "Shooting".into(),
                    minutes: minutes / 2,
                },
                PerformedDrill {
                    name: "Cone Dribbling".into(),
                    category: "Ball Handling".into(),
                    minutes: minutes - minutes / 2,
                },
            ],
            minutes,
            completed,
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 12, 18, 0, 0).unwrap()
    }

    #[test]
    fn empty_history_clears_everything() {
        let report = update_progress(&[], &[], now());
        assert!(report.weeks.is_empty());
        assert!(report.progress.is_none());
        assert!(report.badges.is_empty());
    }

    #[test]
    fn sessions_group_into_monday_aligned_weeks() {
        // 2024-06-10 is a Monday; 2024-06-17 starts the next week.
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("b", "2024-06-13", 45, false),
            session("c", "2024-06-18", 30, true),
        ];

        let report = update_progress(&sessions, &[], now());
        assert_eq!(report.weeks.len(), 2);

        let first = &report.weeks[0];
        assert_eq!(first.week_start, day("2024-06-10"));
        assert_eq!(first.week_end, day("2024-06-16"));
        assert_eq!(first.planned_sessions, 2);
        assert_eq!(first.completed_sessions, 1);
        assert_eq!(first.completed_minutes, 60);

        let second = &report.weeks[1];
        assert_eq!(second.week_start, day("2024-06-17"));
        assert_eq!(second.planned_sessions, 1);

        assert!(report.weeks[0].week_start < report.weeks[1].week_start);
    }

    #[test]
    fn week_start_rolls_sunday_back_six_days() {
        // 2024-06-16 is a Sunday.
        assert_eq!(week_start(day("2024-06-16")), day("2024-06-10"));
        assert_eq!(week_start(day("2024-06-10")), day("2024-06-10"));
    }

    #[test]
    fn weekly_xp_and_per_unit_figures() {
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("b", "2024-06-11", 30, true),
        ];

        let report = update_progress(&sessions, &[], now());
        let week = &report.weeks[0];

        assert_eq!(week.xp, 180); // 90 completed minutes * 2
        assert_eq!(week.xp_per_session, 90.0);
        assert_eq!(week.xp_per_drill, 45.0); // 4 drills
        assert_eq!(week.category_minutes["Shooting"], 45);
        assert_eq!(week.category_minutes["Ball Handling"], 45);
    }

    #[test]
    fn per_unit_xp_guards_divide_by_zero() {
        let sessions = vec![session("a", "2024-06-10", 60, false)];
        let report = update_progress(&sessions, &[], now());
        let week = &report.weeks[0];

        assert_eq!(week.xp, 0);
        assert_eq!(week.xp_per_session, 0.0);
        assert_eq!(week.xp_per_drill, 0.0);
    }

    #[test]
    fn blank_drill_category_falls_back_to_other() {
        let mut s = session("a", "2024-06-10", 60, true);
        s.drills[0].category = "".into();
        let report = update_progress(&[s], &[], now());
        assert!(report.weeks[0].category_minutes.contains_key("Other"));
    }

    #[test]
    fn streak_counts_consecutive_days_back_from_latest() {
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("b", "2024-06-11", 60, true),
            session("c", "2024-06-12", 60, true),
        ];
        let report = update_progress(&sessions, &[], now());
        assert_eq!(report.progress.unwrap().streak, 3);
    }

    #[test]
    fn streak_stops_at_the_first_gap() {
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("c", "2024-06-12", 60, true),
        ];
        let report = update_progress(&sessions, &[], now());
        let progress = report.progress.unwrap();
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.longest_streak, 1);
    }

    #[test]
    fn longest_streak_survives_later_gaps() {
        let sessions = vec![
            session("a", "2024-06-01", 60, true),
            session("b", "2024-06-02", 60, true),
            session("c", "2024-06-03", 60, true),
            session("d", "2024-06-10", 60, true),
        ];
        let report = update_progress(&sessions, &[], now());
        let progress = report.progress.unwrap();
        assert_eq!(progress.longest_streak, 3);
        assert_eq!(progress.streak, 1);
    }

    #[test]
    fn duplicate_dates_count_once_in_streaks() {
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("b", "2024-06-10", 30, true),
            session("c", "2024-06-11", 60, true),
        ];
        let report = update_progress(&sessions, &[], now());
        assert_eq!(report.progress.unwrap().streak, 2);
    }

    #[test]
    fn lifetime_xp_level_and_records() {
        let sessions = vec![
            session("a", "2024-06-10", 90, true),
            session("b", "2024-06-11", 60, true),
            session("c", "2024-06-12", 45, false), // not completed, no XP
        ];
        let report = update_progress(&sessions, &[], now());
        let progress = report.progress.unwrap();

        assert_eq!(progress.xp, 300); // (90 + 60) * 2
        assert_eq!(progress.level, 1);
        assert_eq!(progress.most_minutes, 90);
        // One shooting drill per completed session, 10 shots each.
        assert_eq!(progress.most_shots, 20);
    }

    #[test]
    fn level_advances_every_2000_xp() {
        // 1050 completed minutes => 2100 XP => level 2.
        let sessions: Vec<PlannedSession> = (1..=21)
            .map(|i| session(&format!("s{}", i), "2024-06-10", 50, true))
            .collect();
        let report = update_progress(&sessions, &[], now());
        assert_eq!(report.progress.unwrap().level, 2);
    }

    #[test]
    fn badges_follow_the_rule_list() {
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("b", "2024-06-11", 60, true),
            session("c", "2024-06-12", 60, true),
        ];
        let report = update_progress(&sessions, &[], now());
        let ids: Vec<&str> = report.badges.iter().map(|b| b.id.as_str()).collect();

        assert!(ids.contains(&"first-session"));
        assert!(ids.contains(&"streak-3"));
        assert!(!ids.contains(&"streak-7"));
        assert!(!ids.contains(&"xp-1000"));
    }

    #[test]
    fn badge_earned_at_is_sticky_across_reruns() {
        let sessions = vec![session("a", "2024-06-10", 60, true)];
        let first = update_progress(&sessions, &[], now());
        let earned_at = first.badges[0].earned_at;
        assert!(earned_at.is_some());

        // Append an unrelated session and rerun much later.
        let mut more = sessions.clone();
        more.push(session("b", "2024-07-01", 30, true));
        let later = Local.with_ymd_and_hms(2024, 7, 1, 20, 0, 0).unwrap();
        let second = update_progress(&more, &first.badges, later);

        let badge = second
            .badges
            .iter()
            .find(|b| b.id == "first-session")
            .unwrap();
        assert_eq!(badge.earned_at, earned_at);
    }

    #[test]
    fn rerun_with_identical_input_is_idempotent() {
        let sessions = vec![
            session("a", "2024-06-10", 60, true),
            session("b", "2024-06-11", 45, false),
        ];
        let first = update_progress(&sessions, &[], now());
        let second = update_progress(&sessions, &first.badges, now());

        assert_eq!(first.weeks.len(), second.weeks.len());
        assert_eq!(first.progress, second.progress);
        assert_eq!(first.badges.len(), second.badges.len());
    }
}
