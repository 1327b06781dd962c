use serde::Serialize;
use tracing::debug;

use crate::models::Theater;
use crate::routes::Route;

/// Autocomplete never shows more than this many entries.
pub const SUGGESTION_LIMIT: usize = 5;

/// URL-safe city slug: trimmed, lowercased, whitespace runs collapsed to `-`.
pub fn slugify(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Cities containing `query` (case-insensitive), in source order.
pub fn filter_cities<'a>(cities: &'a [String], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    cities
        .iter()
        .filter(|city| city.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .map(String::as_str)
        .collect()
}

/// Same rule as [`filter_cities`], matched against the theater name.
pub fn filter_theaters<'a>(theaters: &'a [Theater], query: &str) -> Vec<&'a Theater> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    theaters
        .iter()
        .filter(|theater| theater.name.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}

/// Theater detail target, or `None` when the theater has no city to route under.
pub fn theater_route(theater: &Theater) -> Option<Route> {
    let city_slug = slugify(theater.city()?);
    if city_slug.is_empty() {
        return None;
    }
    Some(Route::TheaterDetail {
        city_slug,
        theater_id: theater.id.clone(),
    })
}

/// State of the two home-page search fields. Typing into one field
/// replaces the other, so at most one query is ever active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchBox {
    #[default]
    Empty,
    City {
        query: String,
        suggestions_visible: bool,
    },
    Theater {
        query: String,
        suggestions_visible: bool,
    },
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_city(&mut self, query: impl Into<String>) {
        *self = SearchBox::City {
            query: query.into(),
            suggestions_visible: true,
        };
    }

    pub fn type_theater(&mut self, query: impl Into<String>) {
        *self = SearchBox::Theater {
            query: query.into(),
            suggestions_visible: true,
        };
    }

    pub fn focus_city(&mut self) {
        if let SearchBox::City {
            suggestions_visible,
            ..
        } = self
        {
            *suggestions_visible = true;
        }
    }

    pub fn focus_theater(&mut self) {
        if let SearchBox::Theater {
            suggestions_visible,
            ..
        } = self
        {
            *suggestions_visible = true;
        }
    }

    pub fn blur(&mut self) {
        match self {
            SearchBox::City {
                suggestions_visible,
                ..
            }
            | SearchBox::Theater {
                suggestions_visible,
                ..
            } => *suggestions_visible = false,
            SearchBox::Empty => {}
        }
    }

    pub fn city_query(&self) -> &str {
        match self {
            SearchBox::City { query, .. } => query,
            _ => "",
        }
    }

    pub fn theater_query(&self) -> &str {
        match self {
            SearchBox::Theater { query, .. } => query,
            _ => "",
        }
    }

    /// City dropdown contents; empty while hidden or before the catalog loads.
    pub fn visible_city_suggestions<'a>(&self, cities: &'a [String]) -> Vec<&'a str> {
        match self {
            SearchBox::City {
                query,
                suggestions_visible: true,
            } => filter_cities(cities, query),
            _ => Vec::new(),
        }
    }

    pub fn visible_theater_suggestions<'a>(&self, theaters: &'a [Theater]) -> Vec<&'a Theater> {
        match self {
            SearchBox::Theater {
                query,
                suggestions_visible: true,
            } => filter_theaters(theaters, query),
            _ => Vec::new(),
        }
    }

    /// The Go action is disabled while both fields are blank.
    pub fn can_submit(&self) -> bool {
        !self.city_query().trim().is_empty() || !self.theater_query().trim().is_empty()
    }

    /// Enter key or Go button.
    pub fn submit(&self) -> Option<Route> {
        if !self.can_submit() {
            return None;
        }
        match self {
            SearchBox::City { query, .. } => Some(Route::city(slugify(query))),
            SearchBox::Theater { query, .. } => Some(Route::TheaterSearchResults {
                raw_query: query.clone(),
            }),
            SearchBox::Empty => None,
        }
    }

    pub fn select_city(&mut self, city: &str) -> Route {
        *self = SearchBox::City {
            query: city.to_string(),
            suggestions_visible: false,
        };
        Route::city(slugify(city))
    }

    /// Picks a theater from the dropdown. A theater without a city goes nowhere.
    pub fn select_theater(&mut self, theater: &Theater) -> Option<Route> {
        *self = SearchBox::Theater {
            query: theater.name.clone(),
            suggestions_visible: false,
        };
        let route = theater_route(theater);
        if route.is_none() {
            debug!("Theater {} has no city, staying on search", theater.id);
        }
        route
    }
}
