use crate::carousel::Slide;
use crate::errors::AppError;
use crate::models::{DayOfWeek, Month};
use crate::session::Snapshot;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MonthForm {
    #[serde(default)]
    pub month: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitForm {
    #[serde(default)]
    pub limit: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.session.snapshot().await;
    Html(render_index(&snapshot))
}

pub async fn get_state(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.session.snapshot().await)
}

pub async fn next_slide(State(state): State<AppState>) -> Redirect {
    state.session.next_slide().await;
    Redirect::to("/")
}

pub async fn prev_slide(State(state): State<AppState>) -> Redirect {
    state.session.prev_slide().await;
    Redirect::to("/")
}

pub async fn jump_to_slide(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    if index >= Slide::ALL.len() {
        return Err(AppError::bad_request(format!(
            "slide must be between 0 and {}",
            Slide::ALL.len() - 1
        )));
    }

    state.session.jump_to_slide(index).await;
    Ok(Redirect::to("/"))
}

pub async fn select_month(
    State(state): State<AppState>,
    Form(form): Form<MonthForm>,
) -> Result<Redirect, AppError> {
    let month = parse_month(&form.month)?;
    state.session.spawn_select_month(month).await;
    Ok(Redirect::to("/"))
}

pub async fn set_limit_draft(
    State(state): State<AppState>,
    Form(form): Form<LimitForm>,
) -> Redirect {
    state.session.set_limit_draft(&form.limit).await;
    Redirect::to("/")
}

pub async fn commit_limit(
    State(state): State<AppState>,
    Form(form): Form<LimitForm>,
) -> Redirect {
    state.session.set_limit_draft(&form.limit).await;
    state.session.spawn_commit_limit().await;
    Redirect::to("/")
}

pub async fn select_day(
    State(state): State<AppState>,
    Path(day): Path<u8>,
) -> Result<Redirect, AppError> {
    let day = DayOfWeek::new(day)
        .ok_or_else(|| AppError::bad_request("day must be between 0 and 6"))?;
    state.session.select_day(day).await;
    Ok(Redirect::to("/"))
}

/// Empty input selects all months.
fn parse_month(input: &str) -> Result<Option<Month>, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    input
        .parse::<u8>()
        .ok()
        .and_then(Month::new)
        .map(Some)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))
}
