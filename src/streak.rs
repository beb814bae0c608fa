use crate::calendar::MonthWindow;
use crate::models::{CompletionLog, Habit, HabitId};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

const FIXED_MILESTONES: [usize; 6] = [5, 10, 15, 20, 25, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Milestone,
    FullMonth,
}

impl MilestoneKind {
    pub fn message(self) -> &'static str {
        match self {
            MilestoneKind::Milestone => "Milestone reached! Keep the streak going.",
            MilestoneKind::FullMonth => "Full month completed! Every single day.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celebration {
    pub habit_id: HabitId,
    pub habit_title: String,
    pub streak_length: usize,
    pub kind: MilestoneKind,
    pub message: String,
}

/// A completion that was just added for `habit_id` on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogAdded {
    pub habit_id: HabitId,
    pub date: NaiveDate,
}

/// Length of the run of consecutive dates in `completed` that contains `day`.
/// `day` itself always counts.
pub fn streak_length(completed: &HashSet<NaiveDate>, day: NaiveDate) -> usize {
    let mut backward = 0;
    let mut cursor = day;
    while let Some(prev) = cursor.pred_opt() {
        if !completed.contains(&prev) {
            break;
        }
        backward += 1;
        cursor = prev;
    }

    let mut forward = 0;
    let mut cursor = day;
    while let Some(next) = cursor.succ_opt() {
        if !completed.contains(&next) {
            break;
        }
        forward += 1;
        cursor = next;
    }

    1 + backward + forward
}

pub fn milestones(days_in_month: usize) -> BTreeSet<usize> {
    let mut set: BTreeSet<usize> = FIXED_MILESTONES.into_iter().collect();
    set.insert(days_in_month);
    set
}

pub fn classify(streak: usize, days_in_month: usize) -> Option<MilestoneKind> {
    if !milestones(days_in_month).contains(&streak) {
        return None;
    }
    if streak >= days_in_month {
        Some(MilestoneKind::FullMonth)
    } else {
        Some(MilestoneKind::Milestone)
    }
}

/// Celebration for a freshly added log, if its streak lands on a milestone.
///
/// Only logs inside `window` are consulted, so a run that started in the
/// previous month is counted from the first of this month.
pub fn detect_celebration(
    habits: &[Habit],
    logs: &[CompletionLog],
    window: &MonthWindow,
    added: LogAdded,
) -> Option<Celebration> {
    if !window.contains(added.date) {
        return None;
    }
    let habit = habits.iter().find(|habit| habit.id == added.habit_id)?;

    let mut completed: HashSet<NaiveDate> = logs
        .iter()
        .filter(|log| log.habit_id == habit.id && window.contains(log.date))
        .map(|log| log.date)
        .collect();
    completed.insert(added.date);

    let streak = streak_length(&completed, added.date);
    let kind = classify(streak, window.day_count())?;

    Some(Celebration {
        habit_id: habit.id,
        habit_title: habit.title.clone(),
        streak_length: streak,
        kind,
        message: kind.message().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn habit(id: HabitId, goal: i64) -> Habit {
        Habit {
            id,
            owner: "tester".to_string(),
            title: format!("habit {id}"),
            goal,
            color: "#2dd4bf".to_string(),
            created_at: Local::now(),
        }
    }

    fn logs_for(habit_id: HabitId, window: &MonthWindow, days: impl IntoIterator<Item = u32>) -> Vec<CompletionLog> {
        days.into_iter()
            .enumerate()
            .map(|(idx, day)| CompletionLog {
                id: idx as u64 + 100,
                habit_id,
                owner: "tester".to_string(),
                date: window.days[day as usize - 1],
            })
            .collect()
    }

    #[test]
    fn fifth_consecutive_day_is_a_milestone() {
        let window = MonthWindow::for_month(2026, 3).unwrap();
        let habits = vec![habit(1, 10)];
        let logs = logs_for(1, &window, 1..=4);
        let added = LogAdded { habit_id: 1, date: window.days[4] };

        let celebration = detect_celebration(&habits, &logs, &window, added).expect("celebration");
        assert_eq!(celebration.streak_length, 5);
        assert_eq!(celebration.kind, MilestoneKind::Milestone);
        assert_eq!(celebration.habit_title, "habit 1");
    }

    #[test]
    fn last_day_of_fully_logged_month_is_full_month() {
        for (year, month) in [(2026, 2), (2024, 2), (2026, 4), (2026, 7)] {
            let window = MonthWindow::for_month(year, month).unwrap();
            let n = window.day_count() as u32;
            let habits = vec![habit(1, 10)];
            let logs = logs_for(1, &window, 1..n);
            let added = LogAdded { habit_id: 1, date: window.last_day() };

            let celebration = detect_celebration(&habits, &logs, &window, added).expect("celebration");
            assert_eq!(celebration.streak_length, n as usize);
            assert_eq!(celebration.kind, MilestoneKind::FullMonth);
            assert_eq!(celebration.message, MilestoneKind::FullMonth.message());
        }
    }

    #[test]
    fn fourth_day_does_not_celebrate() {
        let window = MonthWindow::for_month(2026, 3).unwrap();
        let habits = vec![habit(1, 10)];
        let logs = logs_for(1, &window, 1..=3);
        let added = LogAdded { habit_id: 1, date: window.days[3] };

        assert!(detect_celebration(&habits, &logs, &window, added).is_none());
    }

    #[test]
    fn filling_a_gap_joins_both_runs() {
        let window = MonthWindow::for_month(2026, 3).unwrap();
        let habits = vec![habit(1, 10)];
        let logs = logs_for(1, &window, [1, 2, 3, 4, 6, 7, 8, 9, 10]);
        let added = LogAdded { habit_id: 1, date: window.days[4] };

        let celebration = detect_celebration(&habits, &logs, &window, added).expect("celebration");
        assert_eq!(celebration.streak_length, 10);
    }

    #[test]
    fn other_habits_do_not_extend_the_run() {
        let window = MonthWindow::for_month(2026, 3).unwrap();
        let habits = vec![habit(1, 10), habit(2, 10)];
        let mut logs = logs_for(2, &window, 1..=4);
        logs.extend(logs_for(1, &window, [2, 3, 4]));
        let added = LogAdded { habit_id: 1, date: window.days[4] };

        assert!(detect_celebration(&habits, &logs, &window, added).is_none());
    }

    #[test]
    fn streak_does_not_reach_into_previous_month() {
        let window = MonthWindow::for_month(2026, 3).unwrap();
        let previous = window.shifted(-1).unwrap();
        let habits = vec![habit(1, 10)];
        let mut logs = logs_for(1, &previous, 25..=28);
        logs.extend(logs_for(1, &window, 1..=4));
        let added = LogAdded { habit_id: 1, date: window.days[4] };

        let celebration = detect_celebration(&habits, &logs, &window, added).expect("celebration");
        assert_eq!(celebration.streak_length, 5);
    }

    #[test]
    fn thirty_day_month_holds_thirty_once() {
        let set = milestones(30);
        assert_eq!(set.len(), 6);
        assert_eq!(classify(30, 30), Some(MilestoneKind::FullMonth));
        assert_eq!(classify(30, 31), Some(MilestoneKind::Milestone));
        assert_eq!(classify(28, 28), Some(MilestoneKind::FullMonth));
        assert_eq!(classify(7, 31), None);
    }

    #[test]
    fn unknown_habit_or_outside_window_is_ignored() {
        let window = MonthWindow::for_month(2026, 3).unwrap();
        let habits = vec![habit(1, 10)];
        let logs = logs_for(1, &window, 1..=4);

        let unknown = LogAdded { habit_id: 9, date: window.days[4] };
        assert!(detect_celebration(&habits, &logs, &window, unknown).is_none());

        let outside = LogAdded {
            habit_id: 1,
            date: window.last_day().succ_opt().unwrap(),
        };
        assert!(detect_celebration(&habits, &logs, &window, outside).is_none());
    }
}
