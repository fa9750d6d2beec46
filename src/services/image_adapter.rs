use crate::error::AnalyzeError;
use crate::models::{ImagePart, ImagePayload, UploadedFile};

/// Turns the uploaded file into the payload handed to the model.
///
/// Bytes and declared MIME type are copied as-is; nothing is decoded or
/// resized.
pub fn build_image_payload(file: Option<&UploadedFile>) -> Result<ImagePayload, AnalyzeError> {
    let file = file.ok_or(AnalyzeError::MissingImage)?;

    log::debug!(
        "🖼️ Building payload from {} ({}, {} bytes)",
        file.file_name,
        file.content_type,
        file.bytes.len()
    );

    Ok(ImagePayload::single(ImagePart {
        mime_type: file.content_type.clone(),
        data: file.bytes.clone(),
    }))
}
