use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub suggestions: SuggestionConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки удалённого BestSeat API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` leaves the bound to the transport itself.
    pub timeout_seconds: Option<u64>,
}

// Ограничения формы предложения лучшего места
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct SuggestionConfig {
    pub seat_max_length: usize,
    pub notes_max_length: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            seat_max_length: 5,
            notes_max_length: 200,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SuggestionConfig::default();

        let base_url = env::var("BESTSEAT_API_URL")
            .unwrap_or_else(|_| "https://bestseat.fly.dev".to_string())
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Empty { name: "BESTSEAT_API_URL" });
        }

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", 8000)?,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "bestseat=debug,tower_http=debug".to_string()),
            },
            api: ApiConfig {
                base_url,
                timeout_seconds: parse_optional_var("BESTSEAT_API_TIMEOUT_SECONDS")?,
            },
            suggestions: SuggestionConfig {
                seat_max_length: parse_var("SEAT_MAX_LENGTH", defaults.seat_max_length)?,
                notes_max_length: parse_var("NOTES_MAX_LENGTH", defaults.notes_max_length)?,
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(parse_optional_var(name)?.unwrap_or(default))
}

fn parse_optional_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        _ => Ok(None),
    }
}
