//! Navigation targets the views hand to the renderer.

use serde::Serialize;

use crate::models::{ScreenId, TheaterId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Route {
    Home,
    CityListing {
        city_slug: String,
        /// Lowercase chain name, `None` for all chains.
        chain: Option<String>,
    },
    TheaterDetail {
        city_slug: String,
        theater_id: TheaterId,
    },
    ScreenDetail {
        city_slug: String,
        theater_id: TheaterId,
        screen_id: ScreenId,
    },
    /// Raw user text. Decoded on the results page, never slugified.
    TheaterSearchResults { raw_query: String },
}

impl Route {
    pub fn city(city_slug: impl Into<String>) -> Self {
        Route::CityListing {
            city_slug: city_slug.into(),
            chain: None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CityListing { city_slug, chain } => match chain {
                Some(chain) => format!(
                    "/theaters/{}?chain={}",
                    city_slug,
                    urlencoding::encode(chain)
                ),
                None => format!("/theaters/{}", city_slug),
            },
            Route::TheaterDetail {
                city_slug,
                theater_id,
            } => format!("/theaters/{}/{}", city_slug, theater_id),
            Route::ScreenDetail {
                city_slug,
                theater_id,
                screen_id,
            } => format!(
                "/theaters/{}/{}/screens/{}",
                city_slug, theater_id, screen_id
            ),
            Route::TheaterSearchResults { raw_query } => {
                format!("/theaters/search/{}", urlencoding::encode(raw_query))
            }
        }
    }
}
