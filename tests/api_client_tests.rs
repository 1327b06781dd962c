mod common;

use bestseat::{
    api_client::ApiClient,
    config::ApiConfig,
    error::{ClientError, Operation},
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use common::{client_for, theater_json};

#[tokio::test]
async fn lists_cities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Austin", "New York"])))
        .mount(&server)
        .await;

    let cities = client_for(&server).list_cities().await.unwrap();

    assert_eq!(cities, vec!["Austin".to_string(), "New York".to_string()]);
}

#[tokio::test]
async fn city_listing_drops_theaters_without_screens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/by_city/new-york"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "AMC Empire 25", "city": "New York", "brand": "AMC", "screens_count": 25},
            {"id": 2, "name": "Closed Cinema", "city": "New York", "screens_count": 0},
            {"id": 3, "name": "Film Forum", "street": "209 W Houston St", "city": "New York", "screens_count": 4}
        ])))
        .mount(&server)
        .await;

    let theaters = client_for(&server)
        .get_theaters_by_city("new-york")
        .await
        .unwrap();

    let ids: Vec<&str> = theaters.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(theaters[1].address.formatted(), "209 W Houston St, New York");
    assert_eq!(theaters[1].brand_label(), "Unknown");
}

#[tokio::test]
async fn unknown_city_is_an_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/by_city/atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let theaters = client_for(&server)
        .get_theaters_by_city("atlantis")
        .await
        .unwrap();

    assert!(theaters.is_empty());
}

#[tokio::test]
async fn missing_theater_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Theater not found"})))
        .mount(&server)
        .await;

    let theater = client_for(&server).get_theater_by_id("999").await.unwrap();

    assert!(theater.is_none());
}

#[tokio::test]
async fn theater_detail_normalizes_address_and_screens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater_json(json!([]))))
        .mount(&server)
        .await;

    let theater = client_for(&server)
        .get_theater_by_id("42")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(theater.city(), Some("New York"));
    assert_eq!(
        theater.address.formatted(),
        "850 Broadway, New York, NY, 10003, US"
    );
    assert!(theater.screens_consistent());

    let imax = theater.find_screen("7").unwrap();
    assert_eq!(imax.display_name(), "Screen 1");
    assert_eq!(imax.screen_type.as_deref(), Some("IMAX"));
    assert_eq!(theater.find_screen("8").unwrap().display_name(), "Screen Two");
}

#[tokio::test]
async fn string_address_is_kept_as_a_single_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5",
            "name": "Nitehawk",
            "address": "136 Metropolitan Ave",
            "city": "Brooklyn",
            "chain": "Nitehawk Cinema",
            "screens_count": 3
        })))
        .mount(&server)
        .await;

    let theater = client_for(&server)
        .get_theater_by_id("5")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(theater.address.formatted(), "136 Metropolitan Ave, Brooklyn");
    assert_eq!(theater.brand.as_deref(), Some("Nitehawk Cinema"));
}

#[tokio::test]
async fn server_error_on_detail_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).get_theater_by_id("42").await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.user_message(), "Failed to fetch theater details");
}

#[tokio::test]
async fn best_seat_absent_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let best = client_for(&server).get_best_seat("7").await.unwrap();

    assert!(best.is_none());
}

#[tokio::test]
async fn best_seat_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "suggested_seat": "F10",
            "user_notes": "Dead center",
            "timestamp": "2024-05-01T18:30:00"
        })))
        .mount(&server)
        .await;

    let best = client_for(&server).get_best_seat("7").await.unwrap().unwrap();

    assert_eq!(best.suggested_seat, "F10");
    assert_eq!(best.user_notes.as_deref(), Some("Dead center"));
    assert!(best.timestamp.is_some());
}

#[tokio::test]
async fn submit_sends_seat_and_notes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .and(body_json(json!({"suggested_seat": "F10", "user_notes": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Best seat suggestion submitted successfully",
            "suggestion_id": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .submit_suggestion("7", "F10", None)
        .await
        .unwrap();

    assert_eq!(receipt.message, "Best seat suggestion submitted successfully");
    assert_eq!(receipt.suggestion_id.as_ref().map(|id| id.as_str()), Some("11"));
}

#[tokio::test]
async fn submit_rejection_carries_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Seat does not exist"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_suggestion("7", "Z99", Some("front"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Submission { .. }));
    assert!(!err.is_transport());
    assert_eq!(err.user_message(), "Seat does not exist");
}

#[tokio::test]
async fn submit_without_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "suggested_seat"], "msg": "field required"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_suggestion("7", "F10", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::UnexpectedStatus {
            operation: Operation::SubmitSuggestion,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Failed to submit suggestion.");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let client = ApiClient::from_config(&ApiConfig::new("http://127.0.0.1:1")).unwrap();

    let err = client.list_cities().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Transport {
            operation: Operation::ListCities,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Failed to load cities");
}
