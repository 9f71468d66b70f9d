use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub const DEFAULT_TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_HELICONE_BASE_URL: &str = "https://together.helicone.ai/v1";
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo";
pub const DEFAULT_EXTRACTION_MODEL: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo";
pub const DEFAULT_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

#[derive(Clone, Debug)]
pub struct MenugenConfig {
    pub llm: LLMConfig,
    pub image: ImageSettings,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: String,
    /// When set, every provider call is routed through the observability proxy.
    pub observability_key: Option<String>,
    pub base_url: String,
    pub observability_base_url: String,
    pub vision_model: String,
    pub extraction_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
}

impl LLMConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            observability_key: None,
            base_url: DEFAULT_TOGETHER_BASE_URL.to_string(),
            observability_base_url: DEFAULT_HELICONE_BASE_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout_secs: 55,
        }
    }

    /// Base URL every request is sent to, taking the proxy into account.
    pub fn effective_base_url(&self) -> &str {
        match self.observability_key {
            Some(_) => self.observability_base_url.trim_end_matches('/'),
            None => self.base_url.trim_end_matches('/'),
        }
    }
}

/// Resolution and step count requested for every generated dish picture.
/// Low step counts trade fidelity for latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
    pub steps: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            steps: 5,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_without_observability_key() {
        let config = LLMConfig::new("key");
        assert_eq!(config.effective_base_url(), DEFAULT_TOGETHER_BASE_URL);
    }

    #[test]
    fn test_base_url_with_observability_key() {
        let config = LLMConfig {
            observability_key: Some("helicone".to_string()),
            observability_base_url: "http://proxy.local/v1/".to_string(),
            ..LLMConfig::new("key")
        };
        assert_eq!(config.effective_base_url(), "http://proxy.local/v1");
    }

    #[test]
    fn test_uuid_v7_is_versioned() {
        assert_eq!(generate_uuid_v7().get_version_num(), 7);
    }
}
