//! OpenAI Responses API client with web search.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::{json, Value};
use tokio_retry::RetryIf;

use super::{Retrieval, SourceProvider};
use crate::config::{Config, PROMPT_SUFFIX};
use crate::error_handling::{get_retry_strategy, is_retriable, ConfigError, ProviderError};
use crate::models::Source;

/// Error bodies are cut to this many characters before they reach logs.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Answer engine backed by the OpenAI Responses API.
///
/// Each prompt is sent with the web search tool enabled; the cited URLs in the
/// response become the ranked source list. Transient failures are retried with
/// exponential backoff.
pub struct OpenAiProvider {
    client: Arc<reqwest::Client>,
    endpoint: String,
    api_key: String,
    model: String,
    max_attempts: usize,
    initial_delay_ms: u64,
}

impl OpenAiProvider {
    /// Creates a provider from `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` if `config.api_key` is unset or empty.
    pub fn new(client: Arc<reqwest::Client>, config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            client,
            endpoint: format!("{}/responses", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            max_attempts: config.retry_attempts,
            initial_delay_ms: config.retry_initial_delay_ms,
        })
    }

    async fn request_sources(&self, prompt: &str) -> Result<Vec<Source>, ProviderError> {
        let body = json!({
            "model": self.model,
            "input": format!("{prompt}{PROMPT_SUFFIX}"),
            "tools": [{ "type": "web_search" }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(extract_sources(&value))
    }
}

impl SourceProvider for OpenAiProvider {
    async fn fetch_sources(&self, prompt: &str) -> Retrieval {
        let strategy = get_retry_strategy(self.max_attempts, self.initial_delay_ms);

        let result = RetryIf::start(
            strategy,
            || self.request_sources(prompt),
            |error: &ProviderError| {
                let retry = is_retriable(error);
                if retry {
                    debug!("Retrying prompt {prompt:?} after error: {error}");
                }
                retry
            },
        )
        .await;

        match result {
            Ok(sources) => {
                debug!("Prompt {prompt:?} returned {} sources", sources.len());
                Retrieval::succeeded(prompt, sources)
            }
            Err(error) => {
                warn!("Answer engine request failed for prompt {prompt:?}: {error}");
                Retrieval::failed(prompt, &error)
            }
        }
    }
}

/// Collects cited sources from a Responses API body, in order of appearance.
///
/// For each entry of `output`, in this order:
/// - every element of `sources` (and of `action.sources`) that has a `url`
/// - the entry itself, if it has a `url`
/// - `url_citation` annotations on its `content` parts
///
/// Anything else is ignored; a body without `output` yields no sources.
pub fn extract_sources(response: &Value) -> Vec<Source> {
    let mut sources = Vec::new();
    let Some(items) = response.get("output").and_then(Value::as_array) else {
        return sources;
    };

    for item in items {
        let listed = [
            item.get("sources"),
            item.get("action").and_then(|action| action.get("sources")),
        ];
        for list in listed.into_iter().flatten().filter_map(Value::as_array) {
            sources.extend(list.iter().filter_map(source_from));
        }

        sources.extend(source_from(item));

        let annotations = item
            .get("content")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|part| part.get("annotations").and_then(Value::as_array))
            .flatten()
            .filter(|annotation| {
                annotation.get("type").and_then(Value::as_str) == Some("url_citation")
            });
        sources.extend(annotations.filter_map(source_from));
    }

    sources
}

fn source_from(value: &Value) -> Option<Source> {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
    Some(Source {
        url: text("url")?,
        title: text("title"),
        description: text("description"),
    })
}
