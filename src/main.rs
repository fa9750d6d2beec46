mod config;
mod error;
mod handlers;
mod models;
mod services;
mod web; // Single-page upload form and /analyze endpoint

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::AppConfig;
use handlers::AnalysisHandler;
use services::{GeminiService, VisionModel};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first so RUST_LOG from the file is honored
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Food Lens...");

    let config = AppConfig::from_env();

    let gemini: Arc<dyn VisionModel> = Arc::new(GeminiService::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
    ));
    log::info!("✅ Gemini service initialized with model: {}", config.gemini_model);

    let analysis_handler = Arc::new(AnalysisHandler::new(gemini));
    let app = web::create_router(analysis_handler, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("🌐 Listening on http://{}", config.bind_addr);
    log::info!("🔧 Press Ctrl+C to stop the server");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}
