use std::sync::Arc;

use crate::domain::{common::ImageSettings, menu::ports::LLMClient};

/// Holds the adapters the menu pipeline runs against.
///
/// The client is shared behind an [`Arc`] so image generation tasks can
/// outlive the request that spawned them.
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) image_settings: ImageSettings,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, image_settings: ImageSettings) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            image_settings,
        }
    }
}

impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            image_settings: self.image_settings,
        }
    }
}
