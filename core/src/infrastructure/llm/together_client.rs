use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    menu::{ports::LLMClient, value_objects::ImageGenerationRequest},
};

const HELICONE_AUTH: &str = "helicone-auth";
const HELICONE_MENU_PROPERTY: &str = "helicone-property-menu";

/// Client for Together's OpenAI compatible REST API.
#[derive(Debug, Clone)]
pub struct TogetherLLMClient {
    base_url: String,
    vision_model: String,
    extraction_model: String,
    image_model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImagesRequest {
    model: String,
    prompt: String,
    width: u32,
    height: u32,
    steps: u32,
    n: u32,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

impl TogetherLLMClient {
    /// Builds the client once; the connection pool and default headers are
    /// shared by every request afterwards.
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .default_headers(build_default_headers(config)?)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CoreError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(
            base_url = %config.effective_base_url(),
            observability = config.observability_key.is_some(),
            "Initializing Together client"
        );

        Ok(Self {
            base_url: config.effective_base_url().to_string(),
            vision_model: config.vision_model.clone(),
            extraction_model: config.extraction_model.clone(),
            image_model: config.image_model.clone(),
            client,
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, CoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Together API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Together API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Together response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<Option<String>, CoreError> {
        let response: ChatCompletionResponse = self.post_json("/chat/completions", &request).await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

fn build_default_headers(config: &LLMConfig) -> Result<HeaderMap, CoreError> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer(&config.api_key)?);

    if let Some(key) = &config.observability_key {
        headers.insert(HeaderName::from_static(HELICONE_AUTH), bearer(key)?);
        headers.insert(
            HeaderName::from_static(HELICONE_MENU_PROPERTY),
            HeaderValue::from_static("true"),
        );
    }

    Ok(headers)
}

fn bearer(token: &str) -> Result<HeaderValue, CoreError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| CoreError::Configuration("API key is not a valid header value".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

impl LLMClient for TogetherLLMClient {
    #[instrument(skip_all, fields(model = %self.vision_model))]
    async fn generate_with_image_url(
        &self,
        prompt: String,
        image_url: String,
    ) -> Result<Option<String>, CoreError> {
        let request = ChatCompletionRequest {
            model: self.vision_model.clone(),
            messages: vec![Message {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image_url },
                    },
                ]),
            }],
            response_format: None,
        };

        self.chat_completion(request).await
    }

    #[instrument(skip_all, fields(model = %self.extraction_model))]
    async fn generate_with_schema(
        &self,
        system_prompt: String,
        input: String,
        response_schema: serde_json::Value,
    ) -> Result<Option<String>, CoreError> {
        let request = ChatCompletionRequest {
            model: self.extraction_model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                Message {
                    role: "user",
                    content: MessageContent::Text(input),
                },
            ],
            response_format: Some(ResponseFormat {
                kind: "json_object",
                schema: response_schema,
            }),
        };

        self.chat_completion(request).await
    }

    #[instrument(skip_all, fields(model = %self.image_model))]
    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<String, CoreError> {
        let body = ImagesRequest {
            model: self.image_model.clone(),
            prompt: request.prompt,
            width: request.width,
            height: request.height,
            steps: request.steps,
            n: 1,
            response_format: "base64",
        };

        let response: ImagesResponse = self.post_json("/images/generations", &body).await?;

        let image = response
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.b64_json)
            .filter(|image| !image.is_empty())
            .ok_or_else(|| {
                CoreError::ExternalServiceError("No image returned by image model".to_string())
            })?;

        general_purpose::STANDARD.decode(&image).map_err(|e| {
            tracing::error!("Image model returned invalid base64: {}", e);
            CoreError::ExternalServiceError("Image model returned invalid base64".to_string())
        })?;

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_without_observability_key() {
        let headers = build_default_headers(&LLMConfig::new("together-key")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer together-key");
        assert!(headers.get(HELICONE_AUTH).is_none());
        assert!(headers.get(HELICONE_MENU_PROPERTY).is_none());
    }

    #[test]
    fn test_headers_with_observability_key() {
        let config = LLMConfig {
            observability_key: Some("helicone-key".to_string()),
            ..LLMConfig::new("together-key")
        };
        let headers = build_default_headers(&config).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer together-key");
        assert_eq!(headers[HELICONE_AUTH], "Bearer helicone-key");
        assert_eq!(headers[HELICONE_MENU_PROPERTY], "true");
    }

    #[test]
    fn test_invalid_api_key_is_a_configuration_error() {
        let result = TogetherLLMClient::new(&LLMConfig::new("bad\nkey"));
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_client_targets_proxy_when_observability_key_set() {
        let config = LLMConfig {
            observability_key: Some("helicone-key".to_string()),
            ..LLMConfig::new("together-key")
        };
        let client = TogetherLLMClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://together.helicone.ai/v1");
    }

    #[test]
    fn test_vision_request_shape() {
        let request = ChatCompletionRequest {
            model: "vision".to_string(),
            messages: vec![Message {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: "read this".to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "https://example.com/menu.jpg".to_string(),
                        },
                    },
                ]),
            }],
            response_format: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "vision",
                "messages": [{
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "read this" },
                        { "type": "image_url", "image_url": { "url": "https://example.com/menu.jpg" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_schema_request_shape() {
        let request = ChatCompletionRequest {
            model: "extract".to_string(),
            messages: vec![Message {
                role: "system",
                content: MessageContent::Text("Only answer in JSON.".to_string()),
            }],
            response_format: Some(ResponseFormat {
                kind: "json_object",
                schema: json!({ "type": "array" }),
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["content"], "Only answer in JSON.");
        assert_eq!(
            value["response_format"],
            json!({ "type": "json_object", "schema": { "type": "array" } })
        );
    }

    #[test]
    fn test_missing_content_is_none() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": null } }] }))
                .unwrap();
        assert!(response.choices[0].message.content.is_none());

        let response: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.choices.is_empty());
    }
}
