use std::time::Duration;

use async_trait::async_trait;
use futures::{future, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::constants::OPENAI_API_BASE_URL;
use crate::enums::ai_provider_error::AiProviderError;
use crate::errors::{RelnotesError, RelnotesResult};
use crate::helpers::http_client::shared_client;
use crate::structs::ai::openai::openai_message::OpenAIMessage;
use crate::structs::ai::openai::openai_request::OpenAIRequest;
use crate::structs::ai::openai::openai_stream_chunk::OpenAIStreamChunk;
use crate::structs::config::ai_config::AiConfig;
use crate::structs::stream_item::StreamItem;
use crate::traits::ai_provider::{AiProvider, FragmentStream};

pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAIProvider {
    pub fn new(config: &AiConfig, timeout: Duration) -> RelnotesResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                RelnotesError::config_error(
                    "missing OpenAI API key",
                    Some("ai.api_key_env"),
                    Some(&format!("export {} with a valid key", config.api_key_env)),
                )
            })?;

        Ok(Self {
            api_key,
            base_url: OPENAI_API_BASE_URL.to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn build_request(&self, system_prompt: String, user_prompt: String) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: system_prompt,
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            stream: true,
        }
    }

    fn parse_sse_line(line: &str) -> Option<Result<StreamItem, AiProviderError>> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || !line.starts_with("data: ") {
            return None;
        }

        let data = &line[6..];
        if data.trim() == "[DONE]" {
            return None;
        }

        match serde_json::from_str::<OpenAIStreamChunk>(data) {
            Ok(chunk) => {
                // Error responses can arrive inside the stream
                if let Some(error) = chunk.error {
                    let kind = error.kind.unwrap_or_else(|| "api_error".to_string());
                    return Some(Err(AiProviderError::ApiError(format!(
                        "{}: {}",
                        kind, error.message
                    ))));
                }

                let choice = chunk.choices.into_iter().next()?;

                if let Some(content) = choice.delta.content {
                    if !content.is_empty() {
                        return Some(Ok(StreamItem::new(content)));
                    }
                }

                if let Some(finish_reason) = choice.finish_reason {
                    return Some(Ok(StreamItem::complete(String::new(), Some(finish_reason))));
                }

                None
            }
            Err(e) => Some(Err(AiProviderError::SerializationError(format!(
                "Failed to parse OpenAI event: {}",
                e
            )))),
        }
    }
}

#[async_trait]
impl AiProvider for OpenAIProvider {
    async fn stream_chat(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<FragmentStream, AiProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request_body = self.build_request(system_prompt, user_prompt);

        let response = shared_client()
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .timeout(self.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 => AiProviderError::AuthenticationError(error_text),
                429 => AiProviderError::ApiError(format!("Rate limit exceeded: {}", error_text)),
                _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        // Convert the byte stream into newline-delimited SSE events; a
        // carry buffer holds any partial line between chunks.
        let stream = response
            .bytes_stream()
            .scan(String::new(), |buffer, chunk_result| {
                future::ready(match chunk_result {
                    Ok(bytes) => {
                        let chunk_str = String::from_utf8_lossy(&bytes);
                        buffer.push_str(&chunk_str);

                        let mut items = Vec::new();

                        while let Some(newline_pos) = buffer.find('\n') {
                            let line = buffer[..newline_pos].to_string();
                            buffer.drain(..=newline_pos);

                            if let Some(result) = Self::parse_sse_line(&line) {
                                items.push(result);
                            }
                        }

                        Some(futures::stream::iter(items))
                    }
                    Err(e) => {
                        let error = AiProviderError::NetworkError(format!("Stream error: {}", e));
                        Some(futures::stream::iter(vec![Err(error)]))
                    }
                })
            })
            .flatten();

        Ok(Box::pin(stream))
    }
}
