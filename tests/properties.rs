use chrono::{Local, NaiveDate};
use habit_tracker::models::{CompletionLog, Habit};
use habit_tracker::{MonthWindow, build_metrics_at};
use proptest::prelude::*;

fn habits(goals: &[i64]) -> Vec<Habit> {
    goals
        .iter()
        .enumerate()
        .map(|(idx, goal)| Habit {
            id: idx as u64 + 1,
            owner: "prop".to_string(),
            title: format!("habit {idx}"),
            goal: *goal,
            color: "#4ade80".to_string(),
            created_at: Local::now(),
        })
        .collect()
}

/// Logs may repeat a (habit, day) pair, point at unknown habits or spill
/// outside the month.
fn logs(window: &MonthWindow, raw: &[(u64, i64)]) -> Vec<CompletionLog> {
    raw.iter()
        .enumerate()
        .map(|(idx, (habit_id, offset))| CompletionLog {
            id: idx as u64 + 1,
            habit_id: *habit_id,
            owner: "prop".to_string(),
            date: window.first_day() + chrono::Duration::days(*offset),
        })
        .collect()
}

fn snapshot() -> impl Strategy<Value = (i32, u32, Vec<i64>, Vec<(u64, i64)>, i64)> {
    (
        2020i32..2030,
        1u32..=12,
        prop::collection::vec(-2i64..40, 0..6),
        prop::collection::vec((1u64..8, -3i64..34), 0..120),
        -5i64..40,
    )
}

proptest! {
    #[test]
    fn daily_counts_sum_to_total((year, month, goals, raw, today_offset) in snapshot()) {
        let window = MonthWindow::for_month(year, month).unwrap();
        let today: NaiveDate = window.first_day() + chrono::Duration::days(today_offset);
        let metrics = build_metrics_at(today, &habits(&goals), &logs(&window, &raw), &window, None);

        let sum: u64 = metrics.daily_counts.iter().map(|point| point.count).sum();
        prop_assert_eq!(sum, metrics.total_completed);
        prop_assert_eq!(metrics.daily_counts.len(), window.day_count());
    }

    #[test]
    fn percentages_stay_in_range((year, month, goals, raw, today_offset) in snapshot()) {
        let window = MonthWindow::for_month(year, month).unwrap();
        let today: NaiveDate = window.first_day() + chrono::Duration::days(today_offset);
        let metrics = build_metrics_at(today, &habits(&goals), &logs(&window, &raw), &window, None);

        prop_assert!(metrics.clamped_success_rate <= 100);
        prop_assert!(metrics.normalized_progress <= 100);
        prop_assert!(metrics.momentum <= 100);
        for entry in &metrics.per_habit_progress {
            prop_assert!(entry.progress <= 100);
            if entry.goal > 0 {
                prop_assert_eq!(entry.progress == 100, entry.completions >= entry.goal as u64);
            } else {
                prop_assert_eq!(entry.progress, 0);
            }
        }
    }

    #[test]
    fn recomputation_is_stable((year, month, goals, raw, today_offset) in snapshot()) {
        let window = MonthWindow::for_month(year, month).unwrap();
        let today: NaiveDate = window.first_day() + chrono::Duration::days(today_offset);
        let habits = habits(&goals);
        let logs = logs(&window, &raw);

        let first = build_metrics_at(today, &habits, &logs, &window, None);
        let second = build_metrics_at(today, &habits, &logs, &window, None);
        prop_assert_eq!(first, second);
    }
}
