pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod streak;

pub use app::router;
pub use calendar::MonthWindow;
pub use config::Config;
pub use metrics::{MetricsBundle, build_metrics, build_metrics_at};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
pub use streak::{Celebration, LogAdded, MilestoneKind};
