use serde::Serialize;
use tracing::error;

use super::{screens_label, Loadable};
use crate::{
    api_client::ApiClient,
    models::{ScreenId, Theater, TheaterId},
    routes::Route,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenCard {
    pub id: ScreenId,
    pub name: String,
    pub screen_type: Option<String>,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TheaterDetail {
    pub id: TheaterId,
    pub name: String,
    pub brand: String,
    pub address: String,
    pub screens_label: String,
    pub screens: Vec<ScreenCard>,
}

impl TheaterDetail {
    pub fn build(city_slug: &str, theater: &Theater) -> Self {
        let screens = theater
            .screens
            .iter()
            .map(|screen| ScreenCard {
                id: screen.id.clone(),
                name: screen.display_name(),
                screen_type: screen.screen_type.clone(),
                route: Route::ScreenDetail {
                    city_slug: city_slug.to_string(),
                    theater_id: theater.id.clone(),
                    screen_id: screen.id.clone(),
                },
            })
            .collect();

        Self {
            id: theater.id.clone(),
            name: theater.name.clone(),
            brand: theater.brand_label().to_string(),
            address: theater.address.formatted(),
            screens_label: screens_label(theater.screens_count),
            screens,
        }
    }

    pub async fn load(client: &ApiClient, city_slug: &str, theater_id: &str) -> Loadable<Self> {
        match client.get_theater_by_id(theater_id).await {
            Ok(Some(theater)) => Loadable::Ready(Self::build(city_slug, &theater)),
            Ok(None) => Loadable::NotFound("Theater not found".to_string()),
            Err(e) => {
                error!("Failed to load theater {}: {}", theater_id, e);
                Loadable::Failed(e.user_message())
            }
        }
    }
}
