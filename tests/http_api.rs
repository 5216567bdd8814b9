//! HTTP API integration tests
//!
//! Exercises the axum router with a fake generation model so no weights
//! are needed.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use souschef::config::GenerationConfig;
use souschef::engine::RecipePipeline;
use souschef::model::Generator;
use souschef::server::{api_routes, AppState, ServiceStatus};

/// Generator that returns one well-formed raw output per request
struct FakeGenerator;

impl Generator for FakeGenerator {
    fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<Vec<String>> {
        Ok(vec![
            "title: garlic butter chicken <section> ingredients: 2 chicken \
             breasts <sep> 3 cloves garlic <sep> 2 tablespoons butter \
             <section> directions: melt the butter in a skillet. <sep> add \
             the garlic and cook until fragrant. <sep> add the chicken and \
             cook through."
                .to_string(),
        ])
    }
}

/// Generator that only produces unusable text
struct NoisyGenerator;

impl Generator for NoisyGenerator {
    fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<Vec<String>> {
        Ok(vec!["static noise with no structure".to_string()])
    }
}

fn app(generator: Arc<dyn Generator>) -> Router {
    let pipeline = Arc::new(RecipePipeline::new(
        generator,
        None,
        GenerationConfig::default(),
    ));
    let status = ServiceStatus::new(
        "test-model".to_string(),
        "cpu".to_string(),
        pipeline.enhancement_enabled(),
    );
    let state = Arc::new(AppState { pipeline, status });
    Router::new().merge(api_routes()).with_state(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_service_facts() {
    let app = app(Arc::new(FakeGenerator));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["enhancement"], false);
}

#[tokio::test]
async fn app_page_is_served() {
    let app = app(Arc::new(FakeGenerator));
    let response = app
        .oneshot(Request::builder().uri("/app").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn generate_returns_scored_recipe_array() {
    let app = app(Arc::new(FakeGenerator));
    let response = app
        .oneshot(post_json(
            "/generate_recipes",
            r#"["chicken", "garlic", "butter"]"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let recipes = body.as_array().expect("response must be a bare array");
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["title"], "Garlic butter chicken");
    assert!(recipes[0]["ingredients"].as_array().unwrap().len() >= 3);
    assert!(recipes[0]["score"]["overall"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn empty_ingredient_list_is_rejected() {
    let app = app(Arc::new(FakeGenerator));
    let response = app
        .oneshot(post_json("/generate_recipes", "[]"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn junk_only_ingredients_are_rejected() {
    let app = app(Arc::new(FakeGenerator));
    let response = app
        .oneshot(post_json("/generate_recipes", r#"["", " ", "x"]"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unusable_model_output_yields_empty_array() {
    let app = app(Arc::new(NoisyGenerator));
    let response = app
        .oneshot(post_json("/generate_recipes", r#"["chicken"]"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
