use crate::calendar::MonthWindow;
use crate::errors::AppError;
use crate::metrics::{MetricsBundle, build_metrics};
use crate::models::{
    AppData, CompletionLog, CreateHabitRequest, Habit, HabitId, MonthQuery, ToggleRequest,
    ToggleResponse,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::store::{DEFAULT_GOAL, MAX_GOAL, Toggle};
use crate::streak::LogAdded;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, error, info};

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    let data = state.data.lock().await;
    Json(data.habits_for(&state.owner))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }
    let goal = payload.goal.unwrap_or(DEFAULT_GOAL);
    if !(1..=MAX_GOAL).contains(&goal) {
        return Err(AppError::bad_request(format!(
            "goal must be between 1 and {MAX_GOAL}"
        )));
    }

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let habit = next.create_habit(&state.owner, title, goal, Local::now());
    commit(&state, &mut data, next).await?;

    info!(habit_id = habit.id, goal, "habit created");
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<HabitId>,
) -> Result<Json<Habit>, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let removed = next
        .delete_habit(&state.owner, habit_id)
        .ok_or_else(|| habit_not_found(habit_id))?;
    commit(&state, &mut data, next).await?;

    info!(habit_id, "habit deleted with its history");
    Ok(Json(removed))
}

pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CompletionLog>>, AppError> {
    let window = resolve_window(&query, today())?;
    let data = state.data.lock().await;
    Ok(Json(data.logs_between(
        &state.owner,
        window.first_day(),
        window.last_day(),
    )))
}

pub async fn toggle_log(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    if payload.date > today() {
        return Err(AppError::bad_request("cannot log a day in the future"));
    }

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let toggle = next
        .toggle_log(&state.owner, payload.habit_id, payload.date)
        .ok_or_else(|| habit_not_found(payload.habit_id))?;
    commit(&state, &mut data, next).await?;

    let (completed, log) = match toggle {
        Toggle::Added(log) => (true, Some(log)),
        Toggle::Removed(logs) => {
            debug!(habit_id = payload.habit_id, removed = logs.len(), "completion cleared");
            (false, None)
        }
    };
    let added = log.as_ref().map(|log| LogAdded {
        habit_id: log.habit_id,
        date: log.date,
    });

    let window = MonthWindow::containing(payload.date);
    let metrics = month_metrics(&data, &state.owner, &window, added);
    if let Some(celebration) = &metrics.celebration {
        info!(
            habit_id = celebration.habit_id,
            streak = celebration.streak_length,
            "streak milestone reached"
        );
    }

    Ok(Json(ToggleResponse {
        completed,
        log,
        metrics,
    }))
}

pub async fn get_metrics(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MetricsBundle>, AppError> {
    let window = resolve_window(&query, today())?;
    let data = state.data.lock().await;
    Ok(Json(month_metrics(&data, &state.owner, &window, None)))
}

fn month_metrics(
    data: &AppData,
    owner: &str,
    window: &MonthWindow,
    added: Option<LogAdded>,
) -> MetricsBundle {
    let habits = data.habits_for(owner);
    let logs = data.logs_between(owner, window.first_day(), window.last_day());
    build_metrics(&habits, &logs, window, added)
}

/// Persists `next` and only then makes it the live snapshot.
async fn commit(state: &AppState, live: &mut AppData, next: AppData) -> Result<(), AppError> {
    if let Err(err) = persist_data(&state.data_path, &next).await {
        error!("failed to persist data, change discarded: {}", err.message);
        return Err(err);
    }
    *live = next;
    Ok(())
}

fn resolve_window(query: &MonthQuery, today: NaiveDate) -> Result<MonthWindow, AppError> {
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let selected = MonthWindow::for_month(year, month)
        .ok_or_else(|| AppError::bad_request(format!("no such month: {year}-{month:02}")))?;
    match query.offset {
        Some(offset) => selected
            .shifted(offset)
            .ok_or_else(|| AppError::bad_request(format!("month offset {offset} is out of range"))),
        None => Ok(selected),
    }
}

fn habit_not_found(habit_id: HabitId) -> AppError {
    AppError::not_found(format!("habit {habit_id} not found"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
