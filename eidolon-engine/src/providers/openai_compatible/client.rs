//! OpenAI-compatible API client.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use eidolon_core::ConversationContext;
use eidolon_core::config::GenerativeSettings;

use crate::prompt::{PromptMessage, build_messages};
use crate::providers::provider::{GenerateError, GenerativeProvider, strip_control_tokens};

/// OpenAI-compatible chat completions client.
///
/// Every call carries a hard deadline. When the deadline expires the
/// request future is dropped, which aborts the underlying connection.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout_seconds: u64,
    max_tokens: u32,
}

/// Request body for the Chat Completions API
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<PromptMessage>,
    max_tokens: u32,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
}

/// Choice in the response
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Assistant message in a choice
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiCompatibleClient {
    /// Create a new OpenAI-compatible client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout_seconds: u64,
        max_tokens: u32,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Transport timeout sits behind the generation deadline so the
        // deadline is what callers observe.
        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds.saturating_add(5)))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
            timeout_seconds,
            max_tokens,
        }
    }

    pub fn from_settings(settings: &GenerativeSettings, api_key: Option<String>) -> Self {
        Self::new(
            settings.base_url.clone(),
            api_key,
            settings.model.clone(),
            settings.timeout_seconds,
            settings.max_tokens,
        )
    }

    /// Build request headers with optional auth.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &self.api_key {
            let auth_value = format!("Bearer {}", api_key);
            if let Ok(header_value) = HeaderValue::from_str(&auth_value) {
                headers.insert(AUTHORIZATION, header_value);
            }
        }

        headers
    }

    fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    fn chat_completions_url(&self) -> String {
        let base = self.normalized_base_url();
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    /// Send one completion request and extract the assistant text.
    async fn request_completion(
        &self,
        request_body: &ChatCompletionsRequest,
    ) -> Result<String, GenerateError> {
        let url = self.chat_completions_url();

        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers())
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await?;
        let completions: ChatCompletionsResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                let preview: String = response_text.chars().take(500).collect();
                GenerateError::InvalidFormat(format!(
                    "Failed to parse chat completions response: {e}\nBody preview: {preview}"
                ))
            })?;

        completions
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerateError::EmptyResponse)
    }
}

#[async_trait::async_trait]
impl GenerativeProvider for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        "openai_compatible"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        persona_prompt: &str,
        context: &ConversationContext,
        message: &str,
    ) -> Result<String, GenerateError> {
        let request_body = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: build_messages(persona_prompt, context, message),
            max_tokens: self.max_tokens,
        };

        let deadline = Duration::from_secs(self.timeout_seconds);
        let raw = match tokio::time::timeout(deadline, self.request_completion(&request_body)).await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(e),
            // Dropping the request future aborts the in-flight call.
            Err(_) => return Err(GenerateError::Timeout(self.timeout_seconds)),
        };

        let text = strip_control_tokens(&raw);
        if text.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        Ok(text)
    }

    fn clone_box(&self) -> Box<dyn GenerativeProvider> {
        Box::new(self.clone())
    }
}
