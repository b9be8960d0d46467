//! Chat-completions client implementation.

use async_trait::async_trait;
use tracing::{debug, warn};

use pagebrief_config::EndpointsConfig;
use pagebrief_protocols::error::ProviderError;
use pagebrief_protocols::provider::Summarizer;
use pagebrief_protocols::sanitize_header_value;
use pagebrief_protocols::types::{PageContent, Provider, Settings};

use crate::api::{ApiMessage, ApiRequest, ApiResponse};
use crate::prompt::build_summary_prompt;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const SUMMARY_MAX_TOKENS: u32 = 500;
const CUSTOM_PROMPT_MAX_TOKENS: u32 = 1000;

/// AI client for OpenAI and OpenRouter.
pub struct ChatClient {
    client: reqwest::Client,
    endpoints: EndpointsConfig,
}

impl ChatClient {
    pub fn new() -> Self {
        Self::with_endpoints(EndpointsConfig::default())
    }

    /// Create a client with custom endpoints (proxies, test servers).
    pub fn with_endpoints(endpoints: EndpointsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    fn endpoint(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.endpoints.openai_url,
            Provider::OpenRouter => &self.endpoints.openrouter_url,
        }
    }

    fn build_request(
        &self,
        settings: &Settings,
        page: Option<&PageContent>,
        custom_prompt: Option<&str>,
    ) -> ApiRequest {
        let (prompt, max_tokens) = match custom_prompt {
            Some(prompt) => (prompt.to_string(), CUSTOM_PROMPT_MAX_TOKENS),
            None => {
                let empty = PageContent::default();
                let page = page.unwrap_or(&empty);
                (build_summary_prompt(page, settings.language), SUMMARY_MAX_TOKENS)
            }
        };

        let messages = match settings.provider {
            Provider::OpenAi => vec![ApiMessage::system(SYSTEM_PROMPT), ApiMessage::user(prompt)],
            Provider::OpenRouter => vec![ApiMessage::user(prompt)],
        };

        ApiRequest {
            model: settings.model_or_default().to_string(),
            messages,
            max_tokens,
        }
    }

    async fn send_request(
        &self,
        provider: Provider,
        api_key: &str,
        api_request: &ApiRequest,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint(provider))
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("X-Title", sanitize_header_value(&self.endpoints.app_title))
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = ProviderError::from_api_response(status.as_u16(), &body);
            warn!(provider = %provider, status = status.as_u16(), error = %err, "AI request rejected");
            return Err(err);
        }

        let api_response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        api_response
            .first_content()
            .ok_or_else(|| ProviderError::InvalidResponse("response has no message content".to_string()))
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for ChatClient {
    async fn summarize(
        &self,
        settings: &Settings,
        page: Option<&PageContent>,
        custom_prompt: Option<&str>,
    ) -> Result<String, ProviderError> {
        let api_key = sanitize_header_value(&settings.api_key);
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let api_request = self.build_request(settings, page, custom_prompt);
        debug!(
            provider = %settings.provider,
            model = %api_request.model,
            max_tokens = api_request.max_tokens,
            "Sending AI request"
        );
        self.send_request(settings.provider, &api_key, &api_request).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
