use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use super::ApiError;
use crate::{
    models::TheaterId,
    search::{theater_route, SearchBox},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search/cities", get(city_suggestions))
        .route("/search/theaters", get(theater_suggestions))
        .route("/search/go", post(go))
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct TheaterSuggestion {
    pub id: TheaterId,
    pub name: String,
    pub city: Option<String>,
    /// `None` when picking this theater leads nowhere (no city on record).
    pub path: Option<String>,
}

// Если стартовый прогрев не удался, пробуем ещё раз на каждом запросе
async fn ensure_catalog(state: &AppState) {
    if state.catalog.is_loaded() {
        return;
    }
    if let Err(e) = state.catalog.warmup(&state.client).await {
        warn!("Catalog still unavailable, serving empty suggestions: {}", e);
    }
}

// GET /api/search/cities?q=
async fn city_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Json<Value> {
    ensure_catalog(&state).await;
    let suggestions = state.catalog.city_suggestions(&params.q);
    Json(json!({
        "success": true,
        "catalog_loaded": state.catalog.is_loaded(),
        "suggestions": suggestions,
    }))
}

// GET /api/search/theaters?q=
async fn theater_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Json<Value> {
    ensure_catalog(&state).await;
    let suggestions: Vec<TheaterSuggestion> = state
        .catalog
        .theater_suggestions(&params.q)
        .into_iter()
        .map(|t| TheaterSuggestion {
            id: t.id.clone(),
            name: t.name.clone(),
            city: t.city().map(str::to_string),
            path: theater_route(t).map(|r| r.path()),
        })
        .collect();

    Json(json!({
        "success": true,
        "catalog_loaded": state.catalog.is_loaded(),
        "suggestions": suggestions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GoRequest {
    #[serde(default)]
    pub city_query: Option<String>,
    #[serde(default)]
    pub theater_query: Option<String>,
}

// POST /api/search/go
async fn go(Json(req): Json<GoRequest>) -> Result<Json<Value>, ApiError> {
    let mut search = SearchBox::new();
    match (req.city_query, req.theater_query) {
        (Some(city), _) if !city.trim().is_empty() => search.type_city(city),
        (_, Some(theater)) => search.type_theater(theater),
        _ => {}
    }

    let route = search
        .submit()
        .ok_or_else(|| ApiError::unprocessable("Enter a city or a theater name"))?;

    Ok(Json(json!({
        "success": true,
        "path": route.path(),
        "route": route,
    })))
}
