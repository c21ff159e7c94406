//! Image diagnosis endpoint

use actix_web::{HttpResponse, post, web};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{DiagnosisReport, DiagnosisRequest};
use crate::service::DiagnosisService;

/// Analyse a retinal image and return a structured finding
#[utoipa::path(
    post,
    path = "/v1/diagnosis",
    request_body = DiagnosisRequest,
    responses(
        (status = 200, description = "Finding extracted from the model narrative", body = DiagnosisReport),
        (status = 400, description = "No usable image supplied", body = ErrorResponse),
        (status = 500, description = "Credentials missing or provider failure", body = ErrorResponse)
    ),
    tag = "diagnosis"
)]
#[post("/v1/diagnosis")]
pub async fn diagnosis(
    service: web::Data<DiagnosisService>,
    body: web::Json<DiagnosisRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::debug!(
        has_image_url = body.image_url.is_some(),
        has_image_data = body.image_data.is_some(),
        analysis_type = ?body.analysis_type,
        "Diagnosis request received"
    );

    let report = service.diagnose(&body).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure diagnosis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(diagnosis);
}
