use std::sync::Arc;

use crate::error::AnalyzeError;
use crate::models::{AnalysisOutcome, UploadedFile};
use crate::services::{build_image_payload, VisionModel};

/// Fixed instruction sent with every image.
pub const CALORIE_PROMPT: &str = "
You are an expert nutritionist analyzing the food items in the image.
Please calculate the total calories and provide details of each item,
with calorie intake, in the following format:

1. Item 1 - Calories
2. Item 2 - Calories
...

";

pub struct AnalysisHandler {
    model: Arc<dyn VisionModel>,
}

impl AnalysisHandler {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Runs one "Analyze Image" action.
    ///
    /// The calorie call always runs first; the question call only runs when
    /// the question is non-empty, and it is sent exactly as typed. A failed
    /// call ends the action with no partial outcome.
    pub async fn analyze(
        &self,
        file: Option<&UploadedFile>,
        question: &str,
    ) -> Result<AnalysisOutcome, AnalyzeError> {
        let payload = build_image_payload(file).map_err(|e| {
            log::warn!("⚠️ Analyze requested without an image");
            e
        })?;
        let image = payload.first();

        log::info!("📸 Analyzing image ({}, {} bytes)", image.mime_type, image.data.len());

        let calories = self
            .model
            .generate(image, CALORIE_PROMPT)
            .await
            .map_err(AnalyzeError::Inference)?;

        let answer = if question.is_empty() {
            None
        } else {
            log::info!("💬 Answering question ({} chars)", question.chars().count());
            let text = self
                .model
                .generate(image, question)
                .await
                .map_err(AnalyzeError::Inference)?;
            Some(text)
        };

        log::info!("✅ Analysis complete (answered question: {})", answer.is_some());

        Ok(AnalysisOutcome { calories, answer })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::ImagePart;
    use std::sync::Mutex;

    /// Records every prompt it receives and replies from a script.
    pub(crate) struct RecordingModel {
        pub calls: Mutex<Vec<(ImagePart, String)>>,
        fail_on_call: Option<usize>,
    }

    impl RecordingModel {
        pub(crate) fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        pub(crate) fn failing_on(call: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call: Some(call),
            }
        }

        pub(crate) fn prompts(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
        }
    }

    #[async_trait::async_trait]
    impl VisionModel for RecordingModel {
        async fn generate(&self, image: &ImagePart, prompt: &str) -> anyhow::Result<String> {
            let index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((image.clone(), prompt.to_string()));
                calls.len() - 1
            };

            if self.fail_on_call == Some(index) {
                anyhow::bail!("quota exceeded");
            }

            if prompt == CALORIE_PROMPT {
                Ok("1. Rice - 200\n2. Chicken - 250".to_string())
            } else {
                Ok(format!("answer to: {}", prompt))
            }
        }
    }

    fn handler(model: &Arc<RecordingModel>) -> AnalysisHandler {
        AnalysisHandler::new(model.clone())
    }

    fn photo() -> UploadedFile {
        UploadedFile::new("plate.jpg", Some("image/jpeg"), vec![9, 8, 7, 6])
    }

    #[tokio::test]
    async fn test_missing_file_makes_no_calls() {
        let model = Arc::new(RecordingModel::new());
        let err = handler(&model).analyze(None, "Is this vegan?").await.unwrap_err();

        assert_eq!(err.to_string(), "Please upload an image.");
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_question_makes_one_call() {
        let model = Arc::new(RecordingModel::new());
        let outcome = handler(&model).analyze(Some(&photo()), "").await.unwrap();

        assert_eq!(model.prompts(), vec![CALORIE_PROMPT.to_string()]);
        assert_eq!(outcome.calories, "1. Rice - 200\n2. Chicken - 250");
        assert_eq!(outcome.answer, None);
    }

    #[tokio::test]
    async fn test_whitespace_question_is_still_asked() {
        let model = Arc::new(RecordingModel::new());
        let outcome = handler(&model).analyze(Some(&photo()), " ").await.unwrap();

        assert_eq!(model.prompts(), vec![CALORIE_PROMPT.to_string(), " ".to_string()]);
        assert_eq!(outcome.answer.as_deref(), Some("answer to:  "));
    }

    #[tokio::test]
    async fn test_question_is_sent_as_typed() {
        let model = Arc::new(RecordingModel::new());
        handler(&model)
            .analyze(Some(&photo()), "  Is this vegan?\n")
            .await
            .unwrap();

        assert_eq!(model.prompts()[1], "  Is this vegan?\n");
    }

    #[tokio::test]
    async fn test_question_makes_second_call_in_order() {
        let model = Arc::new(RecordingModel::new());
        let outcome = handler(&model)
            .analyze(Some(&photo()), "Is this vegan?")
            .await
            .unwrap();

        assert_eq!(
            model.prompts(),
            vec![CALORIE_PROMPT.to_string(), "Is this vegan?".to_string()]
        );
        assert_eq!(outcome.answer.as_deref(), Some("answer to: Is this vegan?"));
    }

    #[tokio::test]
    async fn test_both_calls_see_the_same_image() {
        let model = Arc::new(RecordingModel::new());
        let file = photo();
        handler(&model).analyze(Some(&file), "Gluten?").await.unwrap();

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        for (image, _) in calls.iter() {
            assert_eq!(image.mime_type, "image/jpeg");
            assert_eq!(image.data, file.bytes);
        }
    }

    #[tokio::test]
    async fn test_failed_calorie_call_skips_question() {
        let model = Arc::new(RecordingModel::failing_on(0));
        let err = handler(&model)
            .analyze(Some(&photo()), "Is this vegan?")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzeError::Inference(_)));
        assert_eq!(model.prompts(), vec![CALORIE_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_failed_question_call_discards_calories() {
        let model = Arc::new(RecordingModel::failing_on(1));
        let result = handler(&model).analyze(Some(&photo()), "Is this vegan?").await;

        assert!(matches!(result, Err(AnalyzeError::Inference(_))));
        assert_eq!(model.prompts().len(), 2);
    }
}
