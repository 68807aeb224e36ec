use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/log", get(handlers::log_form).post(handlers::log_submit))
        .route("/entries", get(handlers::view_entries))
        .route("/reports", get(handlers::reports))
        .route("/settings", get(handlers::settings))
        .route("/api/categories", get(handlers::get_categories))
        .route("/api/config", get(handlers::get_config).put(handlers::put_config))
        .route("/api/entries", get(handlers::get_entries).post(handlers::create_entry))
        .route("/api/reports", get(handlers::get_report))
        .with_state(state)
}
