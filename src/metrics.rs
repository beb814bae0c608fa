use crate::calendar::MonthWindow;
use crate::models::{CompletionLog, Habit, HabitId};
use crate::streak::{Celebration, LogAdded, detect_celebration};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

const MOMENTUM_DAYS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub day_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitProgress {
    pub habit_id: HabitId,
    pub title: String,
    pub goal: i64,
    pub completions: u64,
    pub progress: u32,
}

/// Everything the dashboard shows for one month.
///
/// `success_rate` is the raw ratio and may exceed 100 when habits are logged
/// past their goal; `clamped_success_rate` is capped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsBundle {
    pub month: MonthSummary,
    pub daily_counts: Vec<DailyCount>,
    pub per_habit_progress: Vec<HabitProgress>,
    pub total_possible: u64,
    pub total_completed: u64,
    pub success_rate: u32,
    pub clamped_success_rate: u32,
    pub days_passed: usize,
    pub normalized_progress: u32,
    pub momentum: u32,
    pub celebration: Option<Celebration>,
}

pub fn build_metrics(
    habits: &[Habit],
    logs: &[CompletionLog],
    window: &MonthWindow,
    added: Option<LogAdded>,
) -> MetricsBundle {
    build_metrics_at(Local::now().date_naive(), habits, logs, window, added)
}

pub fn build_metrics_at(
    today: NaiveDate,
    habits: &[Habit],
    logs: &[CompletionLog],
    window: &MonthWindow,
    added: Option<LogAdded>,
) -> MetricsBundle {
    let completions = completed_in_window(habits, logs, window);
    let daily_counts = daily_counts(window, &completions);

    let per_habit_progress = habits
        .iter()
        .map(|habit| {
            let done = completions
                .iter()
                .filter(|(habit_id, _)| *habit_id == habit.id)
                .count() as u64;
            HabitProgress {
                habit_id: habit.id,
                title: habit.title.clone(),
                goal: habit.goal,
                completions: done,
                progress: habit_progress(done, habit.goal),
            }
        })
        .collect();

    let total_possible = habits
        .iter()
        .map(|habit| habit.goal.max(0) as u64)
        .fold(0u64, |acc, goal| acc.saturating_add(goal));
    let total_completed = completions.len() as u64;
    let success_rate = percent(total_completed, total_possible);

    let passed = window.days_through(today);
    let days_passed = passed.len().max(1);
    let normalized_progress = normalized_progress(
        total_completed,
        total_possible,
        days_passed as u64,
        window.day_count() as u64,
    );

    let recent_days = &passed[passed.len().saturating_sub(MOMENTUM_DAYS)..];
    let recent: u64 = daily_counts
        .iter()
        .filter(|point| recent_days.contains(&point.date))
        .map(|point| point.count)
        .sum();
    let momentum = percent(recent, (habits.len() * MOMENTUM_DAYS) as u64);

    let celebration = added.and_then(|event| detect_celebration(habits, logs, window, event));

    MetricsBundle {
        month: MonthSummary {
            year: window.year,
            month: window.month,
            first_day: window.first_day(),
            last_day: window.last_day(),
            day_count: window.day_count(),
        },
        daily_counts,
        per_habit_progress,
        total_possible,
        total_completed,
        success_rate,
        clamped_success_rate: success_rate.min(100),
        days_passed,
        normalized_progress,
        momentum,
        celebration,
    }
}

/// Distinct (habit, day) completions inside the window for known habits.
fn completed_in_window(
    habits: &[Habit],
    logs: &[CompletionLog],
    window: &MonthWindow,
) -> BTreeSet<(HabitId, NaiveDate)> {
    let known: HashSet<HabitId> = habits.iter().map(|habit| habit.id).collect();
    logs.iter()
        .filter(|log| known.contains(&log.habit_id) && window.contains(log.date))
        .map(|log| (log.habit_id, log.date))
        .collect()
}

fn daily_counts(window: &MonthWindow, completions: &BTreeSet<(HabitId, NaiveDate)>) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for (_, date) in completions {
        *by_day.entry(*date).or_default() += 1;
    }

    window
        .days
        .iter()
        .map(|date| DailyCount {
            date: *date,
            count: by_day.get(date).copied().unwrap_or(0),
        })
        .collect()
}

fn habit_progress(done: u64, goal: i64) -> u32 {
    if goal <= 0 {
        return 0;
    }
    let goal = goal as u64;
    if done >= goal {
        100
    } else {
        // Plain rounding would show 100 for e.g. 199/200; a full bar only
        // ever means the goal was met, so unmet goals stop at 99.
        percent(done, goal).min(99)
    }
}

fn normalized_progress(completed: u64, possible: u64, days_passed: u64, days_in_month: u64) -> u32 {
    // completed / (possible * days_passed / days_in_month), kept in integers
    let numerator = completed.saturating_mul(days_in_month);
    let denominator = possible.saturating_mul(days_passed);
    if denominator == 0 {
        return 0;
    }
    if numerator >= denominator {
        100
    } else {
        percent(numerator, denominator)
    }
}

/// `round(part / whole * 100)`, half rounding up; 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part as u128 * 200 + whole as u128) / (whole as u128 * 2);
    scaled.min(u32::MAX as u128) as u32
}
