//! Completion Service Wiring
//!
//! Builds the completion client and prompt set shared by the HTTP service and
//! the terminal runner.

use crate::config::Config;
use anyhow::{Context, Result};
use async_openai::config::OpenAIConfig;
use interviewer_core::{
    llm_client::{CompletionClient, OpenAICompatibleClient, RetryPolicy, RetryingClient},
    prompts::PromptSet,
};
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tracing::info;

/// Creates the configured provider's client, wrapped with retries.
pub fn build_client(config: &Config) -> Arc<dyn CompletionClient> {
    info!(provider = ?config.provider, model = %config.chat_model, "Using completion provider.");
    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.api_key)
        .with_api_base(config.provider.api_base());
    let client = OpenAICompatibleClient::new(openai_config, config.chat_model.clone());
    let policy = RetryPolicy {
        max_retries: config.completion_retries,
        ..RetryPolicy::default()
    };
    Arc::new(RetryingClient::new(client, policy))
}

/// Built-in prompts, overridden by any templates found at `prompts_path`.
pub fn build_prompts(prompts_path: Option<&Path>) -> Result<Arc<PromptSet>> {
    let prompts = match prompts_path {
        Some(path) => {
            let overrides = load_prompts(path)
                .with_context(|| format!("Failed to load prompts from {}", path.display()))?;
            info!(count = overrides.len(), path = %path.display(), "Loaded prompt overrides.");
            PromptSet::builtin().with_overrides(overrides)
        }
        None => PromptSet::builtin(),
    };
    Ok(Arc::new(prompts))
}

/// Reads every `*.md` file in a directory, keyed by file stem.
pub fn load_prompts(prompts_path: &Path) -> Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    for entry in fs::read_dir(prompts_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}
