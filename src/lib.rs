pub mod config;
pub mod data;
pub mod error;
pub mod game;
pub mod handlers;
pub mod llm;
pub mod prompts;
pub mod state;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use handlers::rest;
use llm::TextGenerator;
use state::AppState;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_app(generator: Arc<dyn TextGenerator>) -> Router {
    let state = Arc::new(AppState { generator });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/classes", get(rest::list_classes_handler))
        .route("/campaign", post(rest::generate_campaign_handler))
        .route("/character", post(rest::generate_character_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(false)))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, Result as LlmResult};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn complete(&self, prompt: &str) -> LlmResult<String> {
            Ok(format!("echo: {}", prompt))
        }
    }

    struct BusyGenerator;

    #[async_trait]
    impl TextGenerator for BusyGenerator {
        async fn complete(&self, _prompt: &str) -> LlmResult<String> {
            Err(LlmError::RateLimited { retry_after_secs: 12 })
        }
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_app_initialization() {
        let app = create_app(Arc::new(EchoGenerator));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_character_route_returns_sheet() {
        let app = create_app(Arc::new(EchoGenerator));
        let response = app
            .oneshot(post_json(
                "/character",
                serde_json::json!({ "name": "Orla", "race": "Dwarf", "class": "Barbarian", "age": 88 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let sheet = json_body(response).await;
        assert_eq!(sheet["hit_die"], 12);
        assert_eq!(sheet["age"], "88");
        assert_eq!(sheet["ability_scores"].as_object().unwrap().len(), 6);
        assert_eq!(sheet["modifiers"].as_object().unwrap().len(), 6);
        assert!(sheet["ability_scores"]["Constitution"].is_u64());
        assert!(sheet["hit_points"].is_i64());
        assert!(sheet["backstory"].as_str().unwrap().contains("Dwarf Barbarian named Orla"));
    }

    #[tokio::test]
    async fn test_character_route_rejects_missing_class() {
        let app = create_app(Arc::new(EchoGenerator));
        let response = app
            .oneshot(post_json("/character", serde_json::json!({ "name": "Orla", "race": "Dwarf" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Missing required field: class");
    }

    #[tokio::test]
    async fn test_form_text_fields_are_accepted() {
        let app = create_app(Arc::new(EchoGenerator));
        let response = app
            .clone()
            .oneshot(post_json(
                "/character",
                serde_json::json!({ "name": "Orla", "race": "Dwarf", "class": "Barbarian", "age": "eighty" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["age"], "eighty");

        let response = app
            .oneshot(post_json(
                "/campaign",
                serde_json::json!({
                    "name": "Ashfall",
                    "player_count": "4",
                    "format": "sandbox",
                    "session_length_hours": "3",
                    "theme_description": "Volcanoes"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["prompt"].as_str().unwrap().contains("for 4 players"));
    }

    #[tokio::test]
    async fn test_unparseable_player_count_is_missing_field() {
        let app = create_app(Arc::new(EchoGenerator));
        let response = app
            .oneshot(post_json(
                "/campaign",
                serde_json::json!({
                    "name": "Ashfall",
                    "player_count": "a few",
                    "format": "sandbox",
                    "session_length_hours": 3,
                    "theme_description": "Volcanoes"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Missing required field: player_count");
    }

    #[tokio::test]
    async fn test_campaign_route_surfaces_rate_limit() {
        let app = create_app(Arc::new(BusyGenerator));
        let response = app
            .oneshot(post_json(
                "/campaign",
                serde_json::json!({
                    "name": "Ashfall",
                    "player_count": 3,
                    "format": "sandbox",
                    "session_length_hours": 4,
                    "theme_description": "Volcanoes"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }

    #[tokio::test]
    async fn test_classes_route() {
        let app = create_app(Arc::new(EchoGenerator));
        let response = app
            .oneshot(Request::builder().uri("/classes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let table = json_body(response).await;
        assert_eq!(table["default_hit_die"], 8);
        assert_eq!(table["classes"].as_array().unwrap().len(), 11);
    }
}
