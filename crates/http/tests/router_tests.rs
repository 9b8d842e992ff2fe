//! End-to-end router tests: in-memory database, mocked AI API.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use valora_http::{AppState, Pages, create_router};
use valora_llm::LlmClient;
use valora_service::{EstimateService, InquiryService};
use valora_storage::SqliteStorage;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DRAFT: &str = "lot_size=40&lot_size_unit=acres&region=Hudson+Valley";

struct TestApp {
    router: Router,
    inquiries: Arc<InquiryService>,
}

async fn test_app(server: Option<&MockServer>) -> TestApp {
    let storage = Arc::new(SqliteStorage::in_memory().await.unwrap());
    let llm = server.map(|s| Arc::new(LlmClient::new("test-key".to_owned(), s.uri()).unwrap()));
    let inquiries = Arc::new(InquiryService::new(Arc::clone(&storage)));
    let state = AppState {
        inquiry_service: Arc::clone(&inquiries),
        estimate_service: Arc::new(EstimateService::new(storage, llm)),
        pages: Pages::new().unwrap(),
    };
    TestApp { router: create_router(Arc::new(state)), inquiries }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

/// Walk all four steps and return the redirect target.
async fn complete_questionnaire(app: &TestApp) -> String {
    let body = format!(
        "{DRAFT}&step=4&answer=Keep+the+old+orchard\
         &current_property=Hay+fields&property_goals=Orchard+and+pasture\
         &investment_capacity=%24200k"
    );
    let (status, location, _) = send(app, post_form("/estimate", &body)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    location.unwrap()
}

fn estimate_reply() -> Value {
    let content = json!({
        "project_name": "Hudson Orchard Pasture",
        "project_description": "Apple and pear orchard grazed by sheep.",
        "confidence_score": 0.81,
        "timeline": "5 years",
        "cash_flow_projection": [-30000, -10000, 5000, 15000, 25000, 30000, 35000, 40000, 45000, 50000],
        "revenue_breakdown": {"agricultural_sales": [1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000]},
        "cost_breakdown": {"infrastructure": [25000, 5000, 0, 0, 0, 0, 0, 0, 0, 0]}
    });
    json!({
        "model": "gpt-4.1-mini",
        "choices": [{"message": {"role": "assistant", "content": content.to_string()}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 600, "completion_tokens": 400, "total_tokens": 1000}
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app(None).await;
    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn landing_page_renders_form() {
    let app = test_app(None).await;
    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<form method="post" action="/">"#));
    assert!(body.contains("name=\"region\""));
}

#[tokio::test]
async fn invalid_landing_keeps_entered_values() {
    let app = test_app(None).await;
    let (status, _, body) =
        send(&app, post_form("/", "lot_size=-5&lot_size_unit=hectares&region=Tuscany")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(valora_core::INVALID_LOT_SIZE));
    assert!(body.contains(r#"value="Tuscany""#));
    assert!(body.contains(r#"<option value="hectares" selected>"#));
}

#[tokio::test]
async fn missing_region_is_rejected() {
    let app = test_app(None).await;
    let (_, _, body) = send(&app, post_form("/", "lot_size=10&lot_size_unit=acres&region=")).await;
    assert!(body.contains(valora_core::MISSING_LANDING_FIELDS));
}

#[tokio::test]
async fn overlong_region_is_rejected_at_landing() {
    let app = test_app(None).await;
    let body = format!("lot_size=10&lot_size_unit=acres&region={}", "r".repeat(101));
    let (status, _, page) = send(&app, post_form("/", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Region must be at most 100 characters."));
    assert!(!page.contains("Step 1 of 4"));
}

#[tokio::test]
async fn valid_landing_shows_first_step() {
    let app = test_app(None).await;
    let (status, _, body) = send(&app, post_form("/", DRAFT)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Step 1 of 4"));
    assert!(body.contains(r#"name="step" value="1""#));
    assert!(body.contains(r#"name="region" value="Hudson Valley""#));
}

#[tokio::test]
async fn get_estimate_without_draft_redirects_home() {
    let app = test_app(None).await;
    let (status, location, _) = send(&app, get("/estimate")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
}

#[tokio::test]
async fn step_post_without_landing_details_redirects_home() {
    let app = test_app(None).await;
    let (status, location, _) = send(&app, post_form("/estimate", "step=2&answer=x")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
}

#[tokio::test]
async fn blank_answer_repeats_step_with_error() {
    let app = test_app(None).await;
    let body = format!("{DRAFT}&step=2&answer=+++&current_property=Hay+fields");
    let (status, _, page) = send(&app, post_form("/estimate", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Step 2 of 4"));
    assert!(page.contains(valora_core::MISSING_ANSWER));
    assert!(page.contains(r#"name="current_property" value="Hay fields""#));
}

#[tokio::test]
async fn answered_step_advances_and_carries_answer() {
    let app = test_app(None).await;
    let body = format!("{DRAFT}&step=1&answer=Hay+fields");
    let (status, _, page) = send(&app, post_form("/estimate", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Step 2 of 4"));
    assert!(page.contains(r#"name="current_property" value="Hay fields""#));
    assert_eq!(app.inquiries.list(10).await.unwrap().len(), 0);
}

#[tokio::test]
async fn last_step_with_gap_returns_to_missing_step() {
    let app = test_app(None).await;
    let body = format!("{DRAFT}&step=4&answer=None&current_property=Hay+fields");
    let (status, _, page) = send(&app, post_form("/estimate", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Step 2 of 4"));
    assert!(page.contains(valora_core::MISSING_ANSWER));
    assert!(app.inquiries.list(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn final_step_stores_inquiry_and_redirects_to_loading() {
    let app = test_app(None).await;
    let location = complete_questionnaire(&app).await;

    let stored = app.inquiries.list(10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(location, format!("/loading-estimate/{}", stored[0].id));
    assert_eq!(stored[0].address, "Property in Hudson Valley");
    assert_eq!(stored[0].preferences_concerns, "Keep the old orchard");

    let (status, _, page) = send(&app, get(&location)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(&format!("/api/generate-estimate/{}", stored[0].id)));
}

#[tokio::test]
async fn unknown_ids_redirect_home() {
    let app = test_app(None).await;
    for uri in ["/loading-estimate/999", "/estimate-results/999", "/estimate-results/abc"] {
        let (status, location, _) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location.as_deref(), Some("/"), "{uri}");
    }
}

#[tokio::test]
async fn results_before_generation_shows_placeholder() {
    let app = test_app(None).await;
    let location = complete_questionnaire(&app).await;
    let id = location.rsplit('/').next().unwrap();

    let (status, _, page) = send(&app, get(&format!("/estimate-results/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("No estimate yet"));
}

#[tokio::test]
async fn generate_without_api_key_is_unavailable() {
    let app = test_app(None).await;
    let location = complete_questionnaire(&app).await;
    let id = location.rsplit('/').next().unwrap();

    let (status, _, body) = send(&app, post_empty(&format!("/api/generate-estimate/{id}"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], valora_http::api_error::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn generate_unknown_inquiry_is_not_found() {
    let app = test_app(None).await;
    for uri in ["/api/generate-estimate/404", "/api/generate-estimate/nope"] {
        let (status, _, body) = send(&app, post_empty(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], valora_http::api_error::INQUIRY_NOT_FOUND);
    }
}

#[tokio::test]
async fn generate_then_results_page_shows_projection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(estimate_reply()))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(Some(&server)).await;
    let location = complete_questionnaire(&app).await;
    let id = location.rsplit('/').next().unwrap();

    let (status, _, body) = send(&app, post_empty(&format!("/api/generate-estimate/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["estimate"]["project_name"], "Hudson Orchard Pasture");
    assert_eq!(body["estimate"]["cash_flow_projection"].as_array().unwrap().len(), 10);
    assert!(body["estimate"].get("ai_response_raw").is_none());
    assert!(body["estimate"].get("risk_assessment").is_none());

    // a second call reuses the stored estimate
    let (status, _, _) = send(&app, post_empty(&format!("/api/generate-estimate/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, page) = send(&app, get(&format!("/estimate-results/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Hudson Orchard Pasture"));
    assert!(page.contains("81%"));
    assert!(page.contains("$205,000"));
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway_with_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("secret upstream detail"))
        .mount(&server)
        .await;
    let app = test_app(Some(&server)).await;
    let location = complete_questionnaire(&app).await;
    let id: i64 = location.rsplit('/').next().unwrap().parse().unwrap();

    let (status, _, body) = send(&app, post_empty(&format!("/api/generate-estimate/{id}"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body.contains("secret upstream detail"));
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], valora_http::api_error::GENERATION_FAILED);

    let logs = app.inquiries.logs(id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].success);
}

#[tokio::test]
async fn results_page_survives_extreme_projection_values() {
    let server = MockServer::start().await;
    let content = json!({
        "project_name": "Overflow Farm",
        "cash_flow_projection": vec![1.7e308; 10],
        "revenue_breakdown": {"agricultural_sales": vec![1.7e308; 10], "ecosystem_services": vec![1.7e308; 10]},
        "cost_breakdown": {"maintenance": vec![-1.7e308; 10]}
    });
    let reply = json!({
        "model": "gpt-4.1-mini",
        "choices": [{"message": {"role": "assistant", "content": content.to_string()}}],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(&server)
        .await;
    let app = test_app(Some(&server)).await;
    let location = complete_questionnaire(&app).await;
    let id = location.rsplit('/').next().unwrap();

    let (status, _, _) = send(&app, post_empty(&format!("/api/generate-estimate/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, page) = send(&app, get(&format!("/estimate-results/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Overflow Farm"));
    assert!(page.contains("$10,000,000,000,000"));
}
