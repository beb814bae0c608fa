use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::metrics::MetricsBundle;

pub type HabitId = u64;
pub type LogId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub owner: String,
    pub title: String,
    /// Target completions per month. Zero or negative means no target.
    pub goal: i64,
    pub color: String,
    pub created_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionLog {
    pub id: LogId,
    pub habit_id: HabitId,
    pub owner: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub logs: Vec<CompletionLog>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub title: String,
    pub goal: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit_id: HabitId,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Months to step from the selected month, e.g. `-1` for the previous one.
    pub offset: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub completed: bool,
    pub log: Option<CompletionLog>,
    pub metrics: MetricsBundle,
}
