use anyhow::Result;

use crate::models::ImagePart;

/// Trait for multimodal models (Gemini, test doubles, etc.)
#[async_trait::async_trait]
pub trait VisionModel: Send + Sync {
    /// Sends one image plus one instruction and returns the generated text verbatim.
    async fn generate(&self, image: &ImagePart, prompt: &str) -> Result<String>;
}
