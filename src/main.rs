use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();
    let max_body_bytes = config.max_body_bytes;

    let state = AppState::new(&config).map_err(std::io::Error::other)?;

    let relay_service = web::Data::from(state.relay_service);
    let diagnosis_service = web::Data::from(state.diagnosis_service);

    tracing::info!(
        bind_addr = %bind_addr,
        chat_model = %config.llm.chat_model,
        vision_model = %config.llm.vision_model,
        max_body_bytes,
        "Starting RetinalAI relay server"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors::headers())
            .app_data(relay_service.clone())
            .app_data(diagnosis_service.clone())
            .configure(api::configure(max_body_bytes))
            .default_service(web::to(api::cors::preflight_or_not_found))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
