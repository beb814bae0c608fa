use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/logs", get(handlers::list_logs))
        .route("/api/logs/toggle", post(handlers::toggle_log))
        .route("/api/metrics", get(handlers::get_metrics))
        .with_state(state)
}
