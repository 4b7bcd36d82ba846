use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/daily", get(handlers::daily_page))
        .route("/weekly", get(handlers::weekly_page))
        .route("/api/today", get(handlers::get_today))
        .route("/api/members", get(handlers::get_members))
        .route("/api/members/:id", put(handlers::rename_member))
        .route("/api/reports/:date", get(handlers::get_reports))
        .route("/api/reports/:date/:member", put(handlers::save_report))
        .route("/api/reports/:date/:member/completion", post(handlers::set_completion))
        .route("/api/save-all", post(handlers::save_all))
        .route("/api/weeks/:date", get(handlers::get_week))
        .with_state(state)
}
