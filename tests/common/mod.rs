#![allow(dead_code)]

use bestseat::{
    api_client::ApiClient,
    config::{ApiConfig, AppConfig, Config, SuggestionConfig},
};
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::from_config(&ApiConfig::new(server.uri())).expect("client builds")
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "bestseat=debug".to_string(),
        },
        api: ApiConfig::new(server.uri()),
        suggestions: SuggestionConfig::default(),
    }
}

/// Theater detail payload as the backend sends it.
pub fn theater_json(best_seat_suggestions: Value) -> Value {
    json!({
        "id": 42,
        "name": "Regal Union Square",
        "brand": "Regal",
        "address": {
            "street": "850 Broadway",
            "city": "New York",
            "state": "NY",
            "postcode": "10003",
            "country": "US"
        },
        "screens_count": 2,
        "screens": [
            {
                "id": 7,
                "name": null,
                "screen_number": 1,
                "is_imax": true,
                "suggestions": best_seat_suggestions
            },
            {
                "id": 8,
                "name": "Screen Two",
                "screen_number": 2,
                "is_imax": false
            }
        ]
    })
}
