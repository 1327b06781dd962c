use serde::Serialize;
use tracing::error;

use super::{screens_label, Loadable};
use crate::{
    api_client::ApiClient,
    models::{Theater, TheaterId},
    routes::Route,
    search::theater_route,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub id: TheaterId,
    pub name: String,
    pub brand: Option<String>,
    pub address: String,
    pub screens: String,
    /// `None` when the theater has no city to route under.
    pub route: Option<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<ResultCard>,
}

/// Query text as shown on the results page. Hyphens read as spaces.
pub fn display_query(decoded: &str) -> String {
    decoded.replace('-', " ")
}

impl SearchResults {
    /// Every theater whose name contains `query`, case-insensitive and uncapped.
    pub fn build(query: &str, theaters: &[Theater]) -> Self {
        let needle = query.to_lowercase();
        let results = theaters
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .map(|t| ResultCard {
                id: t.id.clone(),
                name: t.name.clone(),
                brand: t.brand.clone(),
                address: t.address.formatted(),
                screens: screens_label(t.screens_count),
                route: theater_route(t),
            })
            .collect();

        Self {
            query: query.to_string(),
            results,
        }
    }

    pub async fn load(client: &ApiClient, query: &str) -> Loadable<Self> {
        match client.list_all_theaters().await {
            Ok(theaters) => Loadable::Ready(Self::build(query, &theaters)),
            Err(e) => {
                error!("Theater search for {:?} failed: {}", query, e);
                Loadable::Failed(e.user_message())
            }
        }
    }
}
