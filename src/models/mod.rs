/// Extensions the upload control accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A file as it arrived from the upload control.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Builds a handle, falling back to an extension-based guess when the
    /// browser declared no content type.
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = match content_type {
            Some(declared) if !declared.trim().is_empty() => declared.to_string(),
            _ => guess_mime_type(&file_name).to_string(),
        };

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

fn guess_mime_type(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

/// One inline media part sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Transport-ready image content. Never empty; holds exactly one part today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    parts: Vec<ImagePart>,
}

impl ImagePayload {
    pub fn single(part: ImagePart) -> Self {
        Self { parts: vec![part] }
    }

    pub fn parts(&self) -> &[ImagePart] {
        &self.parts
    }

    pub fn first(&self) -> &ImagePart {
        &self.parts[0]
    }
}

/// What one "Analyze Image" action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub calories: String,
    pub answer: Option<String>,
}
