use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::llm::prompts::Stage;

/// Per-repo config file, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "promptflow.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "anthropic", "openai" or "openai-compatible"
    pub provider: String,
    pub model: String,
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,

    /// Optional: Override max_tokens for LLM requests.
    /// Falls back to a provider default when unset.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_retries() -> usize {
    0
}

impl LlmConfig {
    pub fn get_max_tokens(&self) -> u32 {
        if let Some(tokens) = self.max_tokens {
            return tokens;
        }

        match self.provider.as_str() {
            "openai-compatible" => 16384, // ollama and similar
            _ => 4096,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Extra attempts per stage when the model reply can't be parsed into a record.
    /// 0 means an invalid reply fails the stage.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptsConfig {
    /// Global default: if true, custom personas replace the built-in ones. If false, append.
    #[serde(default)]
    pub override_prompts: bool,

    /// Per-stage mode: "append" (default) or "overwrite"
    #[serde(default)]
    pub analyst_mode: Option<String>,
    #[serde(default)]
    pub architect_mode: Option<String>,

    #[serde(default)]
    pub analyst_custom: Option<String>,
    #[serde(default)]
    pub architect_custom: Option<String>,
}

impl PromptsConfig {
    /// Per-stage mode wins; otherwise falls back to `override_prompts`.
    pub fn is_overwrite(&self, stage: Stage) -> bool {
        let mode = match stage {
            Stage::Analyst => &self.analyst_mode,
            Stage::Architect => &self.architect_mode,
        };
        match mode.as_deref() {
            Some("overwrite") => true,
            Some(_) => false,
            None => self.override_prompts,
        }
    }

    pub fn custom(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::Analyst => self.analyst_custom.as_deref(),
            Stage::Architect => self.architect_custom.as_deref(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path)
                .with_context(|| format!("Failed to load config from {}", config_path));
        }

        for candidate in Self::search_paths() {
            if !candidate.is_file() {
                continue;
            }
            match Self::load_from_path(&candidate) {
                Ok(config) => {
                    debug!("Loaded config from {:?}", candidate);
                    return Ok(config);
                }
                Err(e) => warn!("Ignoring invalid config {:?}: {}", candidate, e),
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("promptflow").join("config.toml"));
        }
        paths
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get API key from environment variable specified in config
    pub fn get_api_key(&self) -> Result<String> {
        match &self.llm.api_key_env {
            Some(env_var) => {
                // "none" means no key needed (e.g. Ollama)
                if env_var.to_lowercase() == "none" {
                    return Ok(String::new());
                }

                // local openai-compatible servers usually run without a key
                if self.llm.provider == "openai-compatible" {
                    return Ok(env::var(env_var).unwrap_or_default());
                }

                env::var(env_var).map_err(|_| {
                    anyhow::anyhow!("API key not found in environment variable: {}", env_var)
                })
            }
            None => Ok(String::new()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: "anthropic".to_string(),
                model: "claude-sonnet-4-20250514".to_string(),
                api_key_env: Some("ANTHROPIC_API_KEY".to_string()),
                base_url: None,
                max_tokens: None,
                timeout_secs: default_timeout_secs(),
            },
            generation: GenerationConfig::default(),
            prompts: PromptsConfig::default(),
        }
    }
}
