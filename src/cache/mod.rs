//! Справочники для автодополнения на главной странице.
//!
//! Города и кинотеатры загружаются один раз за время жизни `Catalog`.
//! До окончания загрузки читатели видят пустые списки.

use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::{api_client::ApiClient, error::ClientError, models::Theater};

pub mod cities;
pub mod theaters;

#[derive(Debug, Default)]
pub struct Catalog {
    cities: OnceCell<Vec<String>>,
    theaters: OnceCell<Vec<Theater>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with lists already in place, e.g. for tests or a restored session.
    pub fn preloaded(cities: Vec<String>, theaters: Vec<Theater>) -> Self {
        Self {
            cities: OnceCell::new_with(Some(cities)),
            theaters: OnceCell::new_with(Some(theaters)),
        }
    }

    // Прогрев при старте: оба списка грузятся параллельно.
    // Повторный вызов догружает только то, что не загрузилось.
    pub async fn warmup(&self, client: &ApiClient) -> Result<(), ClientError> {
        info!("Starting catalog warmup...");

        let (cities, theaters) = tokio::join!(
            self.cities.get_or_try_init(|| client.list_cities()),
            self.theaters.get_or_try_init(|| client.list_all_theaters()),
        );

        if let Err(e) = &cities {
            error!("Catalog cities failed to load: {}", e);
        }
        if let Err(e) = &theaters {
            error!("Catalog theaters failed to load: {}", e);
        }

        cities?;
        theaters?;
        info!("Catalog warmup done");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.cities.initialized() && self.theaters.initialized()
    }

    /// Current city snapshot, empty until warmup succeeds.
    pub fn cities(&self) -> &[String] {
        self.cities.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn theaters(&self) -> &[Theater] {
        self.theaters.get().map(Vec::as_slice).unwrap_or(&[])
    }
}
