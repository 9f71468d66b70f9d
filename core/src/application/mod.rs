use crate::{
    domain::common::{MenugenConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::TogetherLLMClient,
};

pub type MenugenService = Service<TogetherLLMClient>;

/// Wires the pipeline against the hosted provider described by `config`.
pub async fn create_service(config: MenugenConfig) -> Result<MenugenService, CoreError> {
    let llm_client = TogetherLLMClient::new(&config.llm)?;

    Ok(Service::new(llm_client, config.image))
}
