use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/slide/next", post(handlers::next_slide))
        .route("/slide/prev", post(handlers::prev_slide))
        .route("/slide/:index", post(handlers::jump_to_slide))
        .route("/filters/month", post(handlers::select_month))
        .route("/filters/limit", post(handlers::commit_limit))
        .route("/filters/limit/draft", post(handlers::set_limit_draft))
        .route("/weekday/:day", post(handlers::select_day))
        .with_state(state)
}
