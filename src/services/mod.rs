pub mod ai_service;
pub mod gemini; // Google Gemini generateContent client
pub mod image_adapter;

pub use ai_service::VisionModel;
pub use gemini::GeminiService;
pub use image_adapter::build_image_payload;
