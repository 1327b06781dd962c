//! View state for each page, ready for a renderer to display.

use serde::Serialize;

pub mod city;
pub mod results;
pub mod screen;
pub mod theater;

pub use city::{ChainFilter, CityListing};
pub use results::SearchResults;
pub use screen::{BestSeatDisplay, ScreenPage, ScreenView};
pub use theater::TheaterDetail;

/// Outcome of loading a page. `NotFound` is a neutral empty state, only
/// `Failed` is shown as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    NotFound(String),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// "1 Screen", "12 Screens".
pub fn screens_label(count: u32) -> String {
    if count == 1 {
        "1 Screen".to_string()
    } else {
        format!("{} Screens", count)
    }
}
