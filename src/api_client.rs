//! api_client.rs
//!
//! Единственная точка общения с удалённым BestSeat API.
//!
//! Все чтения идемпотентны. `submit_suggestion` дописывает новую запись без
//! ключа идемпотентности, поэтому повтор запроса может создать дубликат.
//! Отсутствие данных (404, "ещё нет рекомендации") возвращается как `None`,
//! а не как ошибка.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::ApiConfig,
    error::{ClientError, Operation},
    models::{BestSeatSuggestion, Theater},
};

/// Тело запроса на новую рекомендацию.
#[derive(Debug, Serialize)]
struct SuggestBestSeatRequest<'a> {
    suggested_seat: &'a str,
    user_notes: Option<&'a str>,
}

/// Ответ API на принятую рекомендацию.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    #[serde(default)]
    pub suggestion_id: Option<crate::models::EntityId>,
}

/// Тело ошибки FastAPI: `detail` бывает строкой или списком ошибок валидации.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Клиент BestSeat API.
#[derive(Clone)]
pub struct ApiClient {
    /// Базовый URL без завершающего слэша.
    base_url: String,
    /// Асинхронный HTTP-клиент.
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Создает клиент на основе настроек приложения.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client: builder.build().map_err(ClientError::Build)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET с разбором JSON. `None` при 404, когда вызывающий считает это отсутствием.
    async fn get_json<T>(&self, operation: Operation, path: &str) -> Result<Option<T>, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http_client
            .get(self.url(path))
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} returned 404 for {}", operation, path);
            return Ok(None);
        }
        if !status.is_success() {
            warn!("{} returned HTTP {} for {}", operation, status, path);
            return Err(ClientError::UnexpectedStatus { operation, status });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|source| ClientError::Transport { operation, source })
    }

    /// Список всех городов, в которых есть кинотеатры.
    pub async fn list_cities(&self) -> Result<Vec<String>, ClientError> {
        info!("Fetching city list");
        let cities: Vec<String> = self
            .get_json(Operation::ListCities, "/cities")
            .await?
            .unwrap_or_default();
        info!("Loaded {} cities", cities.len());
        Ok(cities)
    }

    /// Полный список кинотеатров для автодополнения.
    pub async fn list_all_theaters(&self) -> Result<Vec<Theater>, ClientError> {
        info!("Fetching all theaters");
        let theaters: Vec<Theater> = self
            .get_json(Operation::ListTheaters, "/theaters")
            .await?
            .unwrap_or_default();
        info!("Loaded {} theaters", theaters.len());
        Ok(theaters)
    }

    /// Кинотеатр вместе с залами. `None`, если такого нет.
    pub async fn get_theater_by_id(&self, id: &str) -> Result<Option<Theater>, ClientError> {
        info!("Fetching theater {}", id);
        self.get_json(
            Operation::TheaterDetail,
            &format!("/theaters/{}", urlencoding::encode(id)),
        )
        .await
    }

    /// Кинотеатры города; без залов не показываем.
    pub async fn get_theaters_by_city(&self, city_slug: &str) -> Result<Vec<Theater>, ClientError> {
        info!("Fetching theaters for city {}", city_slug);
        let theaters: Vec<Theater> = self
            .get_json(
                Operation::TheatersByCity,
                &format!("/theaters/by_city/{}", urlencoding::encode(city_slug)),
            )
            .await?
            .unwrap_or_default();

        let total = theaters.len();
        let with_screens: Vec<Theater> = theaters.into_iter().filter(Theater::has_screens).collect();
        debug!(
            "City {}: {} theaters, {} with screens",
            city_slug,
            total,
            with_screens.len()
        );
        Ok(with_screens)
    }

    /// Текущая лучшая рекомендация зала. Любой не-2xx ответ значит "пока нет".
    pub async fn get_best_seat(
        &self,
        screen_id: &str,
    ) -> Result<Option<BestSeatSuggestion>, ClientError> {
        let operation = Operation::BestSeat;
        let path = format!("/screens/{}/best_seat", urlencoding::encode(screen_id));
        info!("Fetching best seat for screen {}", screen_id);

        let response = self
            .http_client
            .get(self.url(&path))
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                warn!("Best seat for screen {} returned HTTP {}", screen_id, status);
            }
            return Ok(None);
        }

        response
            .json::<BestSeatSuggestion>()
            .await
            .map(Some)
            .map_err(|source| ClientError::Transport { operation, source })
    }

    /// Отправляет новую рекомендацию. Ошибка API с `detail` возвращается как есть.
    pub async fn submit_suggestion(
        &self,
        screen_id: &str,
        seat: &str,
        notes: Option<&str>,
    ) -> Result<SubmissionReceipt, ClientError> {
        let operation = Operation::SubmitSuggestion;
        let path = format!(
            "/screens/{}/suggest_best_seat",
            urlencoding::encode(screen_id)
        );
        let request = SuggestBestSeatRequest {
            suggested_seat: seat,
            user_notes: notes,
        };

        info!("Submitting best seat {} for screen {}", seat, screen_id);

        let response = self
            .http_client
            .post(self.url(&path))
            .json(&request)
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SubmissionReceipt>()
                .await
                .map_err(|source| ClientError::Transport { operation, source });
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .and_then(|detail| match detail {
                serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
                _ => None,
            });

        match detail {
            Some(detail) => {
                warn!("Suggestion for screen {} rejected: {}", screen_id, detail);
                Err(ClientError::Submission { detail })
            }
            None => {
                warn!("Suggestion for screen {} failed with HTTP {}", screen_id, status);
                Err(ClientError::UnexpectedStatus { operation, status })
            }
        }
    }
}
