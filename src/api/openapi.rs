//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ApiError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RetinalAI Relay",
        description = "Chat, vision and diagnosis relay for retinal screening"
    ),
    paths(
        crate::api::chat::chat,
        crate::api::chat::vision_chat,
        crate::api::diagnosis::diagnosis,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        crate::model::ChatRequest,
        crate::model::ChatTurn,
        crate::model::ChatRole,
        crate::model::VisionChatRequest,
        crate::model::ChatResponse,
        crate::model::DiagnosisRequest,
        crate::model::DiagnosisReport,
        crate::model::DiagnosticFinding,
        crate::model::AnalysisType,
        crate::model::Condition,
        crate::model::Severity,
        crate::model::ImageQuality,
        crate::api::error::ErrorResponse,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus,
        crate::api::health::DependencyHealth,
    )),
    tags(
        (name = "chat", description = "Conversational relay"),
        (name = "diagnosis", description = "Image analysis with structured findings"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
