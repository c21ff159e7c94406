//! HTTP surface: chat, vision chat, diagnosis, health and OpenAPI routes

pub mod chat;
pub mod cors;
pub mod diagnosis;
pub mod error;
pub mod health;
pub mod openapi;

use actix_web::web;

/// Register all routes and the shared JSON extractor config
pub fn configure(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(error::json_config(max_body_bytes));
        chat::configure(cfg);
        diagnosis::configure(cfg);
        health::configure(cfg);
        openapi::configure(cfg);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::app::AppState;
    use crate::model::Config;
    use crate::service::CompletionProvider;
    use crate::service::test_support::StubProvider;

    macro_rules! test_app {
        ($state:expr) => {
            test_app!($state, Config::default().max_body_bytes)
        };
        ($state:expr, $max_body_bytes:expr) => {{
            let state: AppState = $state;
            test::init_service(
                App::new()
                    .wrap(super::cors::headers())
                    .app_data(web::Data::from(Arc::clone(&state.relay_service)))
                    .app_data(web::Data::from(Arc::clone(&state.diagnosis_service)))
                    .configure(super::configure($max_body_bytes))
                    .default_service(web::to(super::cors::preflight_or_not_found)),
            )
            .await
        }};
    }

    fn state_with(provider: StubProvider) -> AppState {
        let provider = Arc::new(provider) as Arc<dyn CompletionProvider>;
        AppState::with_provider(Some(provider), &Config::default())
    }

    fn state_without_provider() -> AppState {
        AppState::with_provider(None, &Config::default())
    }

    #[actix_web::test]
    async fn test_chat_success_with_cors() {
        let app = test_app!(state_with(StubProvider::replying("Drusen are deposits.")));

        let req = test::TestRequest::post()
            .uri("/v1/chat")
            .set_json(json!({
                "message": "What is drusen?",
                "conversationHistory": [{"role": "user", "content": "hi"}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"response": "Drusen are deposits."}));
    }

    #[actix_web::test]
    async fn test_chat_missing_message_is_400() {
        let app = test_app!(state_with(StubProvider::replying("unused")));

        let req = test::TestRequest::post()
            .uri("/v1/chat")
            .set_json(json!({"message": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Message is required");
    }

    #[actix_web::test]
    async fn test_missing_credentials_is_500() {
        let app = test_app!(state_without_provider());

        let req = test::TestRequest::post()
            .uri("/v1/vision-chat")
            .set_json(json!({"message": "hello"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "API key not configured");
    }

    #[actix_web::test]
    async fn test_provider_failure_hides_details() {
        let app = test_app!(state_with(StubProvider::failing(429)));

        let req = test::TestRequest::post()
            .uri("/v1/chat")
            .set_json(json!({"message": "hello"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "AI service temporarily unavailable");
        assert!(body.get("details").is_none());
        assert!(body["requestId"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_json_is_500() {
        let app = test_app!(state_with(StubProvider::replying("unused")));

        let req = test::TestRequest::post()
            .uri("/v1/chat")
            .insert_header(ContentType::json())
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].is_string());
    }

    #[actix_web::test]
    async fn test_preflight_returns_empty_ok() {
        let app = test_app!(state_without_provider());

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/v1/diagnosis")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("access-control-allow-methods").unwrap(),
            super::cors::ALLOW_METHODS
        );
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_route_is_404() {
        let app = test_app!(state_without_provider());

        let req = test::TestRequest::get().uri("/v1/unknown").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_diagnosis_returns_flattened_finding() {
        let narrative =
            "Findings show CNV with 87% confidence, urgent referral needed, macula involved";
        let app = test_app!(state_with(StubProvider::replying(narrative)));

        let req = test::TestRequest::post()
            .uri("/v1/diagnosis")
            .set_json(json!({
                "imageUrl": "https://example.com/oct.png",
                "analysisType": "oct"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["primaryConditions"], json!(["CNV"]));
        assert_eq!(body["severity"], "high");
        assert_eq!(body["location"], "macula");
        assert_eq!(body["fullAnalysis"], narrative);
        assert!(body["id"].is_string());
        assert!(body["timestamp"].is_string());
        assert!(body["disclaimer"].is_string());
    }

    #[actix_web::test]
    async fn test_diagnosis_accepts_large_inline_image() {
        let provider = Arc::new(StubProvider::replying("Normal retina"));
        let state = AppState::with_provider(
            Some(provider.clone() as Arc<dyn CompletionProvider>),
            &Config::default(),
        );
        let app = test_app!(state);

        let image = format!("data:image/jpeg;base64,{}", "A".repeat(3 * 1024 * 1024));
        let req = test::TestRequest::post()
            .uri("/v1/diagnosis")
            .set_json(json!({"imageData": image, "analysisType": "OCT"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["analysisType"], "oct");
        assert_eq!(body["primaryConditions"], json!(["Normal"]));
        assert_eq!(provider.call_count(), 1);
    }

    #[actix_web::test]
    async fn test_body_over_limit_is_rejected() {
        let app = test_app!(state_with(StubProvider::replying("unused")), 1024);

        let req = test::TestRequest::post()
            .uri("/v1/chat")
            .set_json(json!({"message": "x".repeat(4096)}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[actix_web::test]
    async fn test_chat_accepts_system_and_unknown_roles() {
        let app = test_app!(state_with(StubProvider::replying("ok")));

        let req = test::TestRequest::post()
            .uri("/v1/chat")
            .set_json(json!({
                "message": "What is drusen?",
                "conversationHistory": [
                    {"role": "system", "content": "Answer briefly"},
                    {"role": "tool", "content": "ignored"}
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_diagnosis_without_image_is_400() {
        let app = test_app!(state_with(StubProvider::replying("unused")));

        let req = test::TestRequest::post()
            .uri("/v1/diagnosis")
            .set_json(json!({"analysisType": "fundus"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Image URL or image data is required");
    }

    #[actix_web::test]
    async fn test_readiness_reflects_provider() {
        let app = test_app!(state_without_provider());
        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["dependencies"]["provider"], "missing");

        let app = test_app!(state_with(StubProvider::replying("unused")));
        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_openapi_lists_routes() {
        let app = test_app!(state_without_provider());

        let req = test::TestRequest::get().uri("/openapi.json").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["paths"]["/v1/diagnosis"].is_object());
        assert!(body["paths"]["/v1/chat"].is_object());
    }
}
