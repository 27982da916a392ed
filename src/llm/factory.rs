use anyhow::{bail, Result};
use tracing::debug;

use super::client::{LlmClient, MockLlmClient};
use super::client_impl::{AnthropicClient, OpenAIClient};
use crate::config::Config;

/// Create an LLM client based on configuration
pub fn create_client(config: &Config, dry_run: bool) -> Result<Box<dyn LlmClient>> {
    if dry_run {
        debug!("Dry run: using mock LLM client");
        return Ok(Box::new(MockLlmClient::new()));
    }

    let llm = &config.llm;
    let api_key = config.get_api_key()?;
    let max_tokens = llm.get_max_tokens();

    match llm.provider.as_str() {
        "anthropic" => {
            let client = match &llm.base_url {
                Some(url) => AnthropicClient::with_base_url(
                    api_key,
                    llm.model.clone(),
                    url.clone(),
                    max_tokens,
                    llm.timeout_secs,
                )?,
                None => {
                    AnthropicClient::new(api_key, llm.model.clone(), max_tokens, llm.timeout_secs)?
                }
            };
            Ok(Box::new(client))
        }

        "openai" => {
            let client = match &llm.base_url {
                Some(url) => OpenAIClient::with_base_url(
                    api_key,
                    llm.model.clone(),
                    url.clone(),
                    max_tokens,
                    llm.timeout_secs,
                )?,
                None => OpenAIClient::new(api_key, llm.model.clone(), max_tokens, llm.timeout_secs)?,
            };
            Ok(Box::new(client))
        }

        "openai-compatible" => {
            let base_url = llm
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());

            Ok(Box::new(OpenAIClient::with_base_url(
                api_key,
                llm.model.clone(),
                base_url,
                max_tokens,
                llm.timeout_secs,
            )?))
        }

        unknown => bail!("Unknown LLM provider: {}", unknown),
    }
}
