use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::page_response;
use crate::{
    views::{results::display_query, ChainFilter, CityListing, SearchResults, TheaterDetail},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/theaters/search/{query}", get(search_results))
        .route("/theaters/{city}", get(city_listing))
        .route("/theaters/{city}/{id}", get(theater_detail))
}

#[derive(Debug, Deserialize)]
pub struct CityListingQuery {
    pub chain: Option<String>,
}

// GET /api/theaters/search/{query}
// Axum уже декодировал сегмент пути, остаётся заменить дефисы
async fn search_results(State(state): State<Arc<AppState>>, Path(query): Path<String>) -> Response {
    let query = display_query(&query);
    page_response(SearchResults::load(&state.client, &query).await)
}

// GET /api/theaters/{city}?chain=
async fn city_listing(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
    Query(params): Query<CityListingQuery>,
) -> Response {
    let filter = ChainFilter::parse(params.chain.as_deref());
    page_response(CityListing::load(&state.client, &city, &filter).await)
}

// GET /api/theaters/{city}/{id}
async fn theater_detail(
    State(state): State<Arc<AppState>>,
    Path((city, id)): Path<(String, String)>,
) -> Response {
    page_response(TheaterDetail::load(&state.client, &city, &id).await)
}
