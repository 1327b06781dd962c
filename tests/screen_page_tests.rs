mod common;

use bestseat::{
    api_client::ApiClient,
    config::{ApiConfig, SuggestionConfig},
    models::EntityId,
    services::submission::{SubmissionState, SubmitBlocked, SubmitOutcome},
    validation::ValidationError,
    views::{screen::fetch_screen_view, BestSeatDisplay, Loadable, ScreenPage},
};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use common::{client_for, theater_json};

async fn mount_theater(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater_json(json!([]))))
        .mount(server)
        .await;
}

fn new_page() -> ScreenPage {
    ScreenPage::new(
        "new-york",
        EntityId::from(42),
        EntityId::from(7),
        SuggestionConfig::default(),
    )
}

fn best_seat_text(page: &ScreenPage) -> String {
    page.view()
        .ready()
        .map(|view| view.best_seat_text.clone())
        .unwrap_or_default()
}

#[tokio::test]
async fn shows_placeholder_without_recommendation() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = ScreenPage::load(
        &client,
        "new-york",
        EntityId::from(42),
        EntityId::from(7),
        SuggestionConfig::default(),
    )
    .await;

    let view = page.view().ready().unwrap();
    assert_eq!(view.heading, "Regal Union Square - Screen 1");
    assert_eq!(view.screen_type.as_deref(), Some("IMAX"));
    assert_eq!(view.best_seat, BestSeatDisplay::NoneYet);
    assert_eq!(view.best_seat_text, "No best seat recommendation yet");
    assert_eq!(page.city_slug(), "new-york");
}

#[tokio::test]
async fn shows_current_recommendation() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggested_seat": "F10",
            "user_notes": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();
    assert_eq!(page.view(), &Loadable::Loading);

    assert!(page.reload(&client).await);
    assert_eq!(best_seat_text(&page), "Best Seat - F10");
}

#[tokio::test]
async fn falls_back_to_embedded_suggestion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater_json(json!([
            {"id": 2, "suggested_seat": "H12", "user_notes": "aisle"},
            {"id": 1, "suggested_seat": "A1", "user_notes": null}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let view = fetch_screen_view(&client_for(&server), "42", "7").await;

    assert_eq!(view.ready().unwrap().best_seat_text, "Best Seat - H12");
}

#[tokio::test]
async fn falls_back_to_seat_on_screen_row() {
    let mut theater = theater_json(json!([]));
    theater["screens"][0]["best_seat"] = json!("D4");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let view = fetch_screen_view(&client_for(&server), "42", "7").await;

    assert_eq!(view.ready().unwrap().best_seat_text, "Best Seat - D4");
}

#[tokio::test]
async fn undecodable_best_seat_is_a_failure_not_absence() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let view = fetch_screen_view(&client_for(&server), "42", "7").await;

    let view = view.ready().unwrap();
    assert_eq!(
        view.best_seat,
        BestSeatDisplay::Failed {
            message: "Failed to fetch best seat".to_string()
        }
    );
    assert_eq!(view.best_seat_text, "Failed to fetch best seat");
}

#[tokio::test]
async fn best_seat_timeout_is_a_failure() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"suggested_seat": "F10"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ApiConfig {
        base_url: server.uri(),
        timeout_seconds: Some(1),
    };
    let client = ApiClient::from_config(&config).unwrap();

    let view = fetch_screen_view(&client, "42", "7").await;

    assert_eq!(
        view.ready().unwrap().best_seat_text,
        "Failed to fetch best seat"
    );
}

#[tokio::test]
async fn failed_best_seat_still_shows_embedded_suggestion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater_json(json!([
            {"suggested_seat": "K8"}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let view = fetch_screen_view(&client_for(&server), "42", "7").await;

    assert_eq!(view.ready().unwrap().best_seat_text, "Best Seat - K8");
}

#[tokio::test]
async fn unknown_screen_is_not_found() {
    let server = MockServer::start().await;
    mount_theater(&server).await;

    let view = fetch_screen_view(&client_for(&server), "42", "99").await;

    assert_eq!(view, Loadable::NotFound("Screen not found".to_string()));
}

#[tokio::test]
async fn accepted_suggestion_refreshes_best_seat() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .and(body_json(json!({"suggested_seat": "F10", "user_notes": "Great view"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Best seat suggestion submitted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();
    page.reload(&client).await;
    assert_eq!(best_seat_text(&page), "No best seat recommendation yet");

    // Once the suggestion lands the backend starts returning it.
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggested_seat": "F10",
            "user_notes": "Great view"
        })))
        .mount(&server)
        .await;

    assert!(page.toggle_form());
    assert!(page.edit_seat("f10"));
    assert!(page.edit_notes("  Great view  "));

    let outcome = page.submit(&client).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            message: "Best seat suggestion submitted successfully".to_string()
        }
    );
    assert_eq!(best_seat_text(&page), "Best Seat - F10");
    assert_eq!(
        page.form().state(),
        &SubmissionState::Idle {
            notice: Some("Best seat suggestion submitted successfully".to_string())
        }
    );
}

#[tokio::test]
async fn theater_refetch_after_submit_updates_best_seat() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater_json(json!([]))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/theaters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(theater_json(json!([
            {"suggested_seat": "F10"}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .and(body_json(json!({"suggested_seat": "F10", "user_notes": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Best seat suggestion submitted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();
    page.reload(&client).await;
    assert_eq!(best_seat_text(&page), "No best seat recommendation yet");

    page.toggle_form();
    page.edit_seat("f10");
    let outcome = page.submit(&client).await;

    assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
    assert_eq!(best_seat_text(&page), "Best Seat - F10");
}

#[tokio::test]
async fn rejected_suggestion_keeps_form_open() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Seat does not exist"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();
    page.reload(&client).await;
    page.toggle_form();
    page.edit_seat("Z9");

    let outcome = page.submit(&client).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "Seat does not exist".to_string()
        }
    );
    match page.form().state() {
        SubmissionState::FormOpen { draft, failure } => {
            assert_eq!(draft.seat, "Z9");
            assert_eq!(failure.as_deref(), Some("Seat does not exist"));
        }
        other => panic!("expected open form, got {:?}", other),
    }
    assert_eq!(best_seat_text(&page), "No best seat recommendation yet");
}

#[tokio::test]
async fn invalid_input_never_reaches_the_backend() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/screens/7/suggest_best_seat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();
    page.reload(&client).await;

    // Form closed: nothing to submit.
    assert_eq!(
        page.submit(&client).await,
        SubmitOutcome::Blocked(SubmitBlocked::NotEditing)
    );

    page.toggle_form();
    page.edit_seat("10F");
    page.edit_notes("this seat is shit");

    let outcome = page.submit(&client).await;

    match outcome {
        SubmitOutcome::Blocked(SubmitBlocked::Invalid { errors }) => {
            assert!(errors.contains(&ValidationError::SeatFormat));
            assert!(errors.contains(&ValidationError::NotesInappropriate));
        }
        other => panic!("expected validation block, got {:?}", other),
    }
    assert!(page.form().is_open());

    page.edit_seat("");
    page.edit_notes("");
    match page.submit(&client).await {
        SubmitOutcome::Blocked(SubmitBlocked::Invalid { errors }) => {
            assert_eq!(errors, vec![ValidationError::SeatRequired]);
        }
        other => panic!("expected required seat, got {:?}", other),
    }
}

#[tokio::test]
async fn stale_refresh_is_discarded() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"suggested_seat": "B2"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();

    let older = page.begin_refresh();
    let newer = page.begin_refresh();

    let fresh = fetch_screen_view(&client, "42", "7").await;
    assert!(page.apply_refresh(newer, fresh));
    assert_eq!(best_seat_text(&page), "Best Seat - B2");

    let late = Loadable::NotFound("Theater not found".to_string());
    assert!(!page.apply_refresh(older, late));
    assert_eq!(best_seat_text(&page), "Best Seat - B2");
}

#[tokio::test]
async fn failed_refresh_keeps_loaded_view() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"suggested_seat": "C3"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();
    page.reload(&client).await;

    let ticket = page.begin_refresh();
    let failed = Loadable::Failed("Failed to fetch theater details".to_string());

    assert!(!page.apply_refresh(ticket, failed));
    assert_eq!(best_seat_text(&page), "Best Seat - C3");
}

#[tokio::test]
async fn unmounted_page_ignores_late_responses() {
    let server = MockServer::start().await;
    mount_theater(&server).await;
    Mock::given(method("GET"))
        .and(path("/screens/7/best_seat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = new_page();

    let ticket = page.begin_refresh();
    page.unmount();

    let view = fetch_screen_view(&client, "42", "7").await;
    assert!(!page.apply_refresh(ticket, view));
    assert_eq!(page.view(), &Loadable::Loading);
}
