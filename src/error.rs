use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can end an analyze action early.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Please upload an image.")]
    MissingImage,

    #[error("Unsupported file type: {0}. Please upload a jpg, jpeg or png image.")]
    UnsupportedFileType(String),

    #[error("Could not read the upload: {0}")]
    InvalidUpload(String),

    #[error("Analysis failed: {0}")]
    Inference(#[source] anyhow::Error),
}

impl AnalyzeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyzeError::MissingImage | AnalyzeError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AnalyzeError::Inference(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_image_message() {
        assert_eq!(AnalyzeError::MissingImage.to_string(), "Please upload an image.");
        assert_eq!(AnalyzeError::MissingImage.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_inference_error_keeps_cause() {
        let err = AnalyzeError::Inference(anyhow::anyhow!("Gemini API error (403): denied"));
        assert_eq!(err.to_string(), "Analysis failed: Gemini API error (403): denied");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
