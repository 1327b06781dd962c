pub mod screens;
pub mod search;
pub mod theaters;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::views::Loadable;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(search::routes())
        .merge(theaters::routes())
        .merge(screens::routes())
}

/// Full application router with shared state applied.
pub fn app(state: Arc<crate::AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "BestSeat view API v0.1" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", routes())
        // Pass the application state to the router
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/* ---------- helpers ---------- */

/// Ошибка обработчика в формате `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "success": false,
                "error": self.message,
            })),
        )
            .into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::unprocessable(errors.to_string())
    }
}

pub(crate) fn loadable_status<T>(loadable: &Loadable<T>) -> StatusCode {
    match loadable {
        Loadable::Ready(_) | Loadable::Loading => StatusCode::OK,
        Loadable::NotFound(_) => StatusCode::NOT_FOUND,
        Loadable::Failed(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Page view as JSON. Absence is a 404 with a neutral message, not an error body.
pub(crate) fn page_response<T: Serialize>(page: Loadable<T>) -> Response {
    let status = loadable_status(&page);
    (
        status,
        Json(json!({
            "success": !matches!(page, Loadable::Failed(_)),
            "page": page,
        })),
    )
        .into_response()
}
