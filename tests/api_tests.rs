use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use bizflow_api::api::{create_router, AppState};
use bizflow_api::services::{
    providers::OfflineClient, ConsultationService, ContentGenerator, RecommendationEngine,
};

fn create_test_server() -> TestServer {
    let consultation = ConsultationService::new(
        Arc::new(RecommendationEngine::default()),
        ContentGenerator::new(Arc::new(OfflineClient::new())),
    );
    let app = create_router(AppState::new(consultation));
    TestServer::new(app).unwrap()
}

fn platform_names(body: &Value) -> Vec<String> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["platform"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_list_platforms_in_catalog_order() {
    let server = create_test_server();
    let response = server.get("/api/v1/platforms").await;
    response.assert_status_ok();

    let platforms: Vec<Value> = response.json();
    assert_eq!(platforms.len(), 8);
    assert_eq!(platforms[0]["platform"], "Instagram");
    assert_eq!(platforms[3]["platform"], "Google My Business");
}

#[tokio::test]
async fn test_recommendations_for_local_retail() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "type": "retail",
            "description": "Handmade candles",
            "location": "Austin, TX",
            "budget": 80,
            "goal": "awareness"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        platform_names(&body),
        vec!["Instagram", "TikTok", "Facebook"]
    );
    assert_eq!(body["recommendations"][0]["rank"], 1);
    assert_eq!(body["recommendations"][0]["score"], 0.95);
    assert!(body.get("advisory").is_none());
    assert!(body["filter_explanation"]["location"].is_string());
}

#[tokio::test]
async fn test_recommendations_for_online_service_with_low_budget() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "type": "service",
            "description": "Bookkeeping for freelancers",
            "location": "online",
            "budget": 30,
            "goal": "sales"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        platform_names(&body),
        vec!["Google My Business", "WhatsApp Business", "Facebook"]
    );
}

#[tokio::test]
async fn test_recommendations_accept_original_field_names() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "business_type": "digital",
            "description": "Online yoga classes",
            "location": "",
            "monthly_budget": 120,
            "goal": "awareness",
            "channels": ["instagram"]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        platform_names(&body),
        vec!["Instagram", "Email/Newsletter", "LinkedIn"]
    );
}

#[tokio::test]
async fn test_consult_returns_full_result() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/consult")
        .json(&json!({
            "type": "retail",
            "description": "Handmade candles",
            "location": "Austin, TX",
            "budget": 80,
            "goal": "awareness"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 3);
    assert!(recommendations[0]["content_template"]["hook"].is_string());
    assert!(recommendations[1].get("content_template").is_none());
    assert!(recommendations
        .iter()
        .all(|r| !r["reasoning"].as_str().unwrap().is_empty()));
    assert!(!body["strategic_advice"].as_str().unwrap().is_empty());
    assert!(!body["persona"].as_str().unwrap().is_empty());
    assert_eq!(body["risks"].as_array().unwrap().len(), 3);
    assert!(body.get("consultation_id").is_none());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .content_type("application/json")
        .text("{\"type\": \"retail\",")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_business_type_is_bad_request() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/consult")
        .json(&json!({
            "type": "manufacturing",
            "description": "Widgets",
            "location": "Detroit",
            "budget": 100,
            "goal": "awareness"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_budget_is_bad_request() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "type": "retail",
            "description": "Shoes",
            "location": "Austin",
            "budget": -5,
            "goal": "sales"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "type": "retail" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
