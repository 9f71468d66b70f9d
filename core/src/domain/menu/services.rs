use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, error, info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    menu::{
        entities::{MenuItem, MenuItemWithImage, PipelineStage},
        helpers::{build_image_prompt, parse_menu_items},
        ports::{LLMClient, MenuService},
        schema::{MENU_EXTRACTION_PROMPT, MENU_TRANSCRIPTION_PROMPT, get_menu_schema},
        value_objects::{ImageGenerationRequest, ParseMenuInput},
    },
};

impl<LLM> MenuService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(run_id = %generate_uuid_v7()))]
    async fn parse_menu(
        &self,
        input: ParseMenuInput,
    ) -> Result<Vec<MenuItemWithImage>, CoreError> {
        let result = self.run_pipeline(input).await;

        match &result {
            Ok(menu) => info!(stage = %PipelineStage::Done, items = menu.len(), "Menu parsed"),
            Err(e) => error!(stage = %PipelineStage::Failed, error = %e, "Menu parsing failed"),
        }

        result
    }
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    async fn run_pipeline(
        &self,
        input: ParseMenuInput,
    ) -> Result<Vec<MenuItemWithImage>, CoreError> {
        let raw_menu = self.transcribe_menu(&input).await?;
        let items = self.extract_menu_items(raw_menu).await?;
        self.synthesize_images(items).await
    }

    /// Stage 1: vision model reads the menu picture into free-form text.
    async fn transcribe_menu(&self, input: &ParseMenuInput) -> Result<String, CoreError> {
        info!(
            stage = %PipelineStage::Transcribing,
            menu_url = %input.log_url(),
            "Transcribing menu"
        );

        self.llm_client
            .generate_with_image_url(
                MENU_TRANSCRIPTION_PROMPT.to_string(),
                input.menu_url().to_string(),
            )
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(CoreError::MenuTranscriptionFailed)
    }

    /// Stage 2: cheaper text model coerces the transcription into the schema.
    async fn extract_menu_items(&self, raw_menu: String) -> Result<Vec<MenuItem>, CoreError> {
        info!(
            stage = %PipelineStage::Coercing,
            chars = raw_menu.len(),
            "Extracting menu items"
        );

        let extracted = self
            .llm_client
            .generate_with_schema(MENU_EXTRACTION_PROMPT.to_string(), raw_menu, get_menu_schema())
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                error!("Extraction model returned no content");
                CoreError::SchemaExtractionFailed
            })?;

        parse_menu_items(&extracted)
    }

    /// Stage 3: one image per item, all issued at once.
    ///
    /// Each request runs on its own task. The join fails on the first error,
    /// and the remaining tasks keep running detached until they finish.
    async fn synthesize_images(
        &self,
        items: Vec<MenuItem>,
    ) -> Result<Vec<MenuItemWithImage>, CoreError> {
        info!(
            stage = %PipelineStage::Synthesizing,
            items = items.len(),
            "Generating menu images"
        );

        let tasks = items.into_iter().map(|item| {
            let client = Arc::clone(&self.llm_client);
            let request = ImageGenerationRequest {
                prompt: build_image_prompt(&item),
                width: self.image_settings.width,
                height: self.image_settings.height,
                steps: self.image_settings.steps,
            };

            let handle = tokio::spawn(async move {
                debug!(item = %item.name, "Generating image");
                let image = client.generate_image(request).await?;
                Ok::<_, CoreError>(item.with_image(image))
            });

            async move {
                handle.await.map_err(|e| {
                    error!("Image generation task failed: {}", e);
                    CoreError::InternalServerError
                })?
            }
        });

        try_join_all(tasks).await
    }
}
