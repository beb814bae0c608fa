use crate::models::{AppData, CompletionLog, Habit, HabitId};
use chrono::{DateTime, Local, NaiveDate};

pub const DEFAULT_GOAL: i64 = 10;
pub const MAX_GOAL: i64 = 31;

const PALETTE: [&str; 7] = [
    "#2dd4bf", "#818cf8", "#facc15", "#f87171", "#4ade80", "#fb923c", "#e879f9",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Added(CompletionLog),
    Removed(Vec<CompletionLog>),
}

impl AppData {
    /// Owner's habits in creation order.
    pub fn habits_for(&self, owner: &str) -> Vec<Habit> {
        let mut habits: Vec<Habit> = self
            .habits
            .iter()
            .filter(|habit| habit.owner == owner)
            .cloned()
            .collect();
        habits.sort_by_key(|habit| habit.id);
        habits
    }

    /// Owner's logs dated within `start..=end`.
    pub fn logs_between(&self, owner: &str, start: NaiveDate, end: NaiveDate) -> Vec<CompletionLog> {
        self.logs
            .iter()
            .filter(|log| log.owner == owner && log.date >= start && log.date <= end)
            .cloned()
            .collect()
    }

    pub fn create_habit(&mut self, owner: &str, title: &str, goal: i64, now: DateTime<Local>) -> Habit {
        let existing = self.habits.iter().filter(|habit| habit.owner == owner).count();
        let habit = Habit {
            id: self.allocate_id(),
            owner: owner.to_string(),
            title: title.trim().to_string(),
            goal,
            color: PALETTE[existing % PALETTE.len()].to_string(),
            created_at: now,
        };
        self.habits.push(habit.clone());
        habit
    }

    /// Removes the habit together with every log that points at it.
    pub fn delete_habit(&mut self, owner: &str, habit_id: HabitId) -> Option<Habit> {
        let index = self
            .habits
            .iter()
            .position(|habit| habit.id == habit_id && habit.owner == owner)?;
        let removed = self.habits.remove(index);
        self.logs.retain(|log| log.habit_id != habit_id);
        Some(removed)
    }

    /// Flips the completion state of `habit_id` on `date`. Every duplicate log
    /// for that day goes away on removal.
    pub fn toggle_log(&mut self, owner: &str, habit_id: HabitId, date: NaiveDate) -> Option<Toggle> {
        if !self
            .habits
            .iter()
            .any(|habit| habit.id == habit_id && habit.owner == owner)
        {
            return None;
        }

        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.logs)
            .into_iter()
            .partition(|log| log.habit_id == habit_id && log.date == date);
        self.logs = rest;

        if !matching.is_empty() {
            return Some(Toggle::Removed(matching));
        }

        let log = CompletionLog {
            id: self.allocate_id(),
            habit_id,
            owner: owner.to_string(),
            date,
        };
        self.logs.push(log.clone());
        Some(Toggle::Added(log))
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        self.next_id
    }
}
