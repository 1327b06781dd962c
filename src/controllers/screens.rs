use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use super::{loadable_status, ApiError};
use crate::{
    models::EntityId,
    services::submission::{SubmitOutcome, SuggestionForm},
    views::ScreenPage,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/theaters/{city}/{id}/screens/{screen_id}", get(screen_detail))
        .route(
            "/theaters/{city}/{id}/screens/{screen_id}/suggestions",
            post(submit_suggestion),
        )
        .route("/suggestions/validate", post(validate_suggestion))
}

/// Верхняя граница размера тела; правила формы проверяет машина состояний.
#[derive(Debug, Deserialize, Validate)]
pub struct SuggestionRequest {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub suggested_seat: String,
    #[validate(length(max = 2000))]
    pub user_notes: Option<String>,
}

async fn load_page(state: &AppState, city: String, id: String, screen_id: String) -> ScreenPage {
    ScreenPage::load(
        &state.client,
        city,
        EntityId::new(id),
        EntityId::new(screen_id),
        state.config.suggestions,
    )
    .await
}

// GET /api/theaters/{city}/{id}/screens/{screen_id}
async fn screen_detail(
    State(state): State<Arc<AppState>>,
    Path((city, id, screen_id)): Path<(String, String, String)>,
) -> Response {
    let page = load_page(&state, city, id, screen_id).await;
    let status = loadable_status(page.view());
    (
        status,
        Json(json!({
            "success": status != StatusCode::BAD_GATEWAY,
            "page": page.snapshot(),
        })),
    )
        .into_response()
}

// POST /api/theaters/{city}/{id}/screens/{screen_id}/suggestions
async fn submit_suggestion(
    State(state): State<Arc<AppState>>,
    Path((city, id, screen_id)): Path<(String, String, String)>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Response, ApiError> {
    req.validate()?;

    let mut page = load_page(&state, city, id, screen_id).await;
    if !page.view().is_ready() {
        let status = loadable_status(page.view());
        return Ok((status, Json(json!({ "success": false, "page": page.snapshot() }))).into_response());
    }

    page.toggle_form();
    page.edit_seat(&req.suggested_seat);
    page.edit_notes(req.user_notes.as_deref().unwrap_or_default());
    let outcome = page.submit(&state.client).await;

    let status = match outcome {
        SubmitOutcome::Accepted { .. } => StatusCode::CREATED,
        SubmitOutcome::Blocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Rejected { .. } => StatusCode::BAD_REQUEST,
    };

    Ok((
        status,
        Json(json!({
            "success": status == StatusCode::CREATED,
            "outcome": outcome,
            "page": page.snapshot(),
        })),
    )
        .into_response())
}

// POST /api/suggestions/validate
// Проверка "на каждое нажатие": возвращает ошибки полей и остаток символов
async fn validate_suggestion(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Response, ApiError> {
    req.validate()?;

    let mut form = SuggestionForm::new(state.config.suggestions);
    form.open();
    form.edit_seat(&req.suggested_seat);
    form.edit_notes(req.user_notes.as_deref().unwrap_or_default());

    Ok(Json(json!({
        "success": true,
        "draft": form.draft(),
    }))
    .into_response())
}
