use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::{
        entities::MenuItemWithImage,
        value_objects::{ImageGenerationRequest, ParseMenuInput},
    },
};

/// LLM Client trait for calling the hosted models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync + 'static {
    /// Asks the vision model about the image behind `image_url`.
    /// `Ok(None)` means the model answered without any content.
    fn generate_with_image_url(
        &self,
        prompt: String,
        image_url: String,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    /// Asks the extraction model for JSON constrained by `response_schema`.
    fn generate_with_schema(
        &self,
        system_prompt: String,
        input: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    /// Returns the generated picture as base64.
    fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the menu parsing pipeline
#[cfg_attr(test, mockall::automock)]
pub trait MenuService: Send + Sync {
    fn parse_menu(
        &self,
        input: ParseMenuInput,
    ) -> impl Future<Output = Result<Vec<MenuItemWithImage>, CoreError>> + Send;
}
