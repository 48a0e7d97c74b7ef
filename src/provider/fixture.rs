//! Offline provider backed by a JSON fixture file.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::{Retrieval, SourceProvider};
use crate::error_handling::ProviderError;
use crate::models::Source;

/// Serves pre-fetched sources keyed by prompt.
///
/// The fixture file is a JSON object mapping each prompt (matched after
/// trimming) to its ranked source list:
///
/// ```json
/// {
///   "Dyson V15 best price": [
///     { "url": "https://www.amazon.co.uk/dp/B0", "title": "Dyson V15" },
///     { "url": "https://www.reddit.com/r/VacuumCleaners" }
///   ]
/// }
/// ```
///
/// Unknown prompts yield an empty source list.
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    sources: HashMap<String, Vec<Source>>,
}

impl FixtureProvider {
    pub fn new(sources: HashMap<String, Vec<Source>>) -> Self {
        Self {
            sources: sources
                .into_iter()
                .map(|(prompt, list)| (prompt.trim().to_string(), list))
                .collect(),
        }
    }

    /// Loads a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::FixtureIo` if the file cannot be read and
    /// `ProviderError::Decode` if it is not a prompt-to-sources JSON object.
    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read(path)?;
        let sources: HashMap<String, Vec<Source>> = serde_json::from_slice(&content)?;
        debug!(
            "Loaded fixtures for {} prompts from {}",
            sources.len(),
            path.display()
        );
        Ok(Self::new(sources))
    }
}

impl SourceProvider for FixtureProvider {
    async fn fetch_sources(&self, prompt: &str) -> Retrieval {
        let sources = self
            .sources
            .get(prompt.trim())
            .cloned()
            .unwrap_or_default();
        Retrieval::succeeded(prompt, sources)
    }
}
