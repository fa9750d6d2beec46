use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::error::AnalyzeError;
use crate::handlers::AnalysisHandler;
use crate::models::UploadedFile;

pub mod page;

use page::PageView;

/// Largest multipart body accepted by `/analyze`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub analysis_handler: Arc<AnalysisHandler>,
}

/// Fields of one submitted form.
struct AnalyzeForm {
    image: Option<UploadedFile>,
    question: String,
}

pub fn create_router(analysis_handler: Arc<AnalysisHandler>, static_dir: &str) -> Router {
    let state = Arc::new(AppState { analysis_handler });

    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn index_handler() -> Html<String> {
    Html(page::render(&PageView::default()))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            log::warn!("⚠️ Rejected upload: {}", e);
            return error_page(&e, "", None);
        }
    };

    if let Some(file) = &form.image {
        if !file.has_accepted_extension() {
            let e = AnalyzeError::UnsupportedFileType(
                file.extension().unwrap_or_else(|| "unknown".to_string()),
            );
            log::warn!("⚠️ Rejected upload {}: {}", file.file_name, e);
            return error_page(&e, &form.question, None);
        }
    }

    match state
        .analysis_handler
        .analyze(form.image.as_ref(), &form.question)
        .await
    {
        Ok(outcome) => {
            let html = page::render(&PageView {
                question: &form.question,
                preview: form.image.as_ref(),
                outcome: Some(&outcome),
                error: None,
            });
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            if let AnalyzeError::Inference(cause) = &e {
                log::error!("❌ Analysis failed: {:#}", cause);
            }
            error_page(&e, &form.question, form.image.as_ref())
        }
    }
}

fn error_page(
    error: &AnalyzeError,
    question: &str,
    preview: Option<&UploadedFile>,
) -> (StatusCode, Html<String>) {
    let html = page::render(&PageView {
        question,
        preview,
        outcome: None,
        error: Some(error.to_string()),
    });
    (error.status_code(), Html(html))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AnalyzeError> {
    let mut image = None;
    let mut question = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalyzeError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|c| c.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AnalyzeError::InvalidUpload(e.to_string()))?;

                // Browsers send an empty part when no file was chosen.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                log::debug!("📥 Received {} ({} bytes)", file_name, bytes.len());
                image = Some(UploadedFile::new(file_name, content_type.as_deref(), bytes.to_vec()));
            }
            "food_question" => {
                question = field
                    .text()
                    .await
                    .map_err(|e| AnalyzeError::InvalidUpload(e.to_string()))?;
            }
            _ => {}
        }
    }

    Ok(AnalyzeForm { image, question })
}

async fn health_check() -> &'static str {
    "OK"
}
