use serde::Serialize;
use std::collections::BTreeSet;
use tracing::error;

use super::{screens_label, Loadable};
use crate::{
    api_client::ApiClient,
    models::{Theater, TheaterId},
    routes::Route,
};

/// `chain` query parameter of the city listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainFilter {
    #[default]
    All,
    /// Theaters without a usable brand.
    Unknown,
    /// Lowercase brand name.
    Named(String),
}

impl ChainFilter {
    pub fn parse(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_lowercase()) {
            None => ChainFilter::All,
            Some(p) if p.is_empty() || p == "all" => ChainFilter::All,
            Some(p) if p == "unknown" => ChainFilter::Unknown,
            Some(p) => ChainFilter::Named(p),
        }
    }

    pub fn as_param(&self) -> Option<String> {
        match self {
            ChainFilter::All => None,
            ChainFilter::Unknown => Some("unknown".to_string()),
            ChainFilter::Named(name) => Some(name.clone()),
        }
    }

    pub fn matches(&self, theater: &Theater) -> bool {
        match self {
            ChainFilter::All => true,
            ChainFilter::Unknown => theater.brand.is_none(),
            ChainFilter::Named(name) => theater
                .brand
                .as_deref()
                .is_some_and(|brand| brand.to_lowercase() == *name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TheaterCard {
    pub id: TheaterId,
    pub name: String,
    pub brand: Option<String>,
    pub address: String,
    pub screens: String,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityListing {
    pub city_slug: String,
    pub title: String,
    pub chain_filter: Option<String>,
    /// Sorted brand labels of every theater in the city, "Unknown" included.
    pub available_chains: Vec<String>,
    pub theaters: Vec<TheaterCard>,
}

/// "new-york" → "New York".
pub fn city_title(city_slug: &str) -> String {
    let spaced = city_slug.replace('-', " ");
    let mut title = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    title
}

impl CityListing {
    pub fn build(city_slug: &str, theaters: &[Theater], filter: &ChainFilter) -> Self {
        let available_chains = theaters
            .iter()
            .map(|t| t.brand_label().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let cards = theaters
            .iter()
            .filter(|t| filter.matches(t))
            .map(|t| TheaterCard {
                id: t.id.clone(),
                name: t.name.clone(),
                brand: t.brand.clone(),
                address: t.address.formatted(),
                screens: screens_label(t.screens_count),
                route: Route::TheaterDetail {
                    city_slug: city_slug.to_string(),
                    theater_id: t.id.clone(),
                },
            })
            .collect();

        Self {
            city_slug: city_slug.to_string(),
            title: city_title(city_slug),
            chain_filter: filter.as_param(),
            available_chains,
            theaters: cards,
        }
    }

    /// Theaters with at least one screen in the city, narrowed by `filter`.
    pub async fn load(client: &ApiClient, city_slug: &str, filter: &ChainFilter) -> Loadable<Self> {
        match client.get_theaters_by_city(city_slug).await {
            Ok(theaters) if theaters.is_empty() => Loadable::NotFound(format!(
                "No theaters found in {}",
                city_title(city_slug)
            )),
            Ok(theaters) => Loadable::Ready(Self::build(city_slug, &theaters, filter)),
            Err(e) => {
                error!("Failed to load theaters for {}: {}", city_slug, e);
                Loadable::Failed(e.user_message())
            }
        }
    }

    /// Target for picking a different chain in the filter dropdown.
    pub fn chain_route(&self, chain: &str) -> Route {
        Route::CityListing {
            city_slug: self.city_slug.clone(),
            chain: ChainFilter::parse(Some(chain)).as_param(),
        }
    }
}
