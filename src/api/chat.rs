//! Chat relay endpoints

use actix_web::{HttpResponse, post, web};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{ChatRequest, ChatResponse, VisionChatRequest};
use crate::service::RelayService;

/// Text chat with optional prior turns
#[utoipa::path(
    post,
    path = "/v1/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Message missing", body = ErrorResponse),
        (status = 500, description = "Credentials missing or provider failure", body = ErrorResponse)
    ),
    tag = "chat"
)]
#[post("/v1/chat")]
pub async fn chat(
    service: web::Data<RelayService>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::debug!(
        message_length = body.message.len(),
        history_length = body.conversation_history.len(),
        "Chat request received"
    );

    let response = service
        .chat(&body.message, &body.conversation_history)
        .await?;

    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

/// Chat turn that may include one image
#[utoipa::path(
    post,
    path = "/v1/vision-chat",
    request_body = VisionChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Message missing or image unusable", body = ErrorResponse),
        (status = 500, description = "Credentials missing or provider failure", body = ErrorResponse)
    ),
    tag = "chat"
)]
#[post("/v1/vision-chat")]
pub async fn vision_chat(
    service: web::Data<RelayService>,
    body: web::Json<VisionChatRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::debug!(
        message_length = body.message.len(),
        has_image = body.image.is_some(),
        has_context = body.context.is_some(),
        "Vision chat request received"
    );

    let response = service
        .vision_chat(&body.message, body.image.as_deref(), body.context.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat).service(vision_chat);
}
