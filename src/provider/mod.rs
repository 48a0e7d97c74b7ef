//! Answer-engine retrieval.
//!
//! A [`SourceProvider`] turns a prompt into the ranked list of sources the
//! answer engine cited. Two implementations exist:
//! - [`OpenAiProvider`] - OpenAI Responses API with web search
//! - [`FixtureProvider`] - prompt-to-sources map loaded from a JSON file
//!
//! Retrieval failures never abort a report: they degrade to an empty source
//! list and are recorded on the [`Retrieval`].

mod fixture;
mod openai;

use std::future::Future;

pub use fixture::FixtureProvider;
pub use openai::{extract_sources, OpenAiProvider};

use crate::error_handling::{ErrorType, ProviderError};
use crate::models::Source;

/// Sources fetched for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    pub query: String,
    /// Cited sources in rank order; empty when retrieval failed
    pub sources: Vec<Source>,
    /// Failure category and message, if retrieval failed
    pub error: Option<(ErrorType, String)>,
}

impl Retrieval {
    pub fn succeeded(query: &str, sources: Vec<Source>) -> Self {
        Self {
            query: query.to_string(),
            sources,
            error: None,
        }
    }

    /// Degrades a provider error into an empty retrieval.
    pub fn failed(query: &str, error: &ProviderError) -> Self {
        Self {
            query: query.to_string(),
            sources: Vec::new(),
            error: Some((
                crate::error_handling::categorize_provider_error(error),
                error.to_string(),
            )),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Fetches the cited sources for a prompt.
pub trait SourceProvider {
    /// Never fails; see [`Retrieval::failed`].
    fn fetch_sources(&self, prompt: &str) -> impl Future<Output = Retrieval> + Send;
}
