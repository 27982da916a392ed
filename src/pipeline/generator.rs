use anyhow::{bail, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::extract::parse_reply;
use crate::config::PromptsConfig;
use crate::error::FlowError;
use crate::llm::client::LlmClient;
use crate::llm::prompts::{self, Stage};
use crate::model::{ProcessDescription, PromptFlow};
use crate::util::preview;

/// Both records produced by a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub process_description: ProcessDescription,
    pub prompt_flow: PromptFlow,
}

/// Drives the analyst and architect stages against an [`LlmClient`].
pub struct FlowGenerator {
    client: Box<dyn LlmClient>,
    max_retries: usize,
    prompts_config: PromptsConfig,
}

impl FlowGenerator {
    pub fn new(client: Box<dyn LlmClient>, max_retries: usize) -> Self {
        Self {
            client,
            max_retries,
            prompts_config: PromptsConfig::default(),
        }
    }

    pub fn with_prompts_config(mut self, config: PromptsConfig) -> Self {
        self.prompts_config = config;
        self
    }

    fn persona(&self, stage: Stage) -> String {
        let custom = self.prompts_config.custom(stage);
        let overwrite = self.prompts_config.is_overwrite(stage);
        match stage {
            Stage::Analyst => prompts::analyst_persona(custom, overwrite),
            Stage::Architect => prompts::architect_persona(custom, overwrite),
        }
    }

    /// Stage 1: natural-language description -> `ProcessDescription`.
    pub async fn analyze_workflow(&self, description: &str) -> Result<ProcessDescription> {
        if description.trim().is_empty() {
            bail!("Workflow description is empty");
        }
        info!("Analyst: building process description...");
        let prompt = prompts::process_description_prompt(description);
        self.run_stage(Stage::Analyst, &prompt, ProcessDescription::from_value)
            .await
    }

    /// Stage 2: `ProcessDescription` -> `PromptFlow`.
    pub async fn generate_promptflow(&self, process: &ProcessDescription) -> Result<PromptFlow> {
        info!("Architect: designing PromptFlow...");
        let prompt = prompts::promptflow_prompt(&process.to_json()?);
        self.run_stage(Stage::Architect, &prompt, PromptFlow::from_value)
            .await
    }

    pub async fn run(&self, description: &str) -> Result<PipelineOutput> {
        let process_description = self.analyze_workflow(description).await?;
        let prompt_flow = self.generate_promptflow(&process_description).await?;
        info!(
            "Generated PromptFlow '{}' ({} states, {} transitions)",
            prompt_flow.workflow_name,
            prompt_flow.states_description.len(),
            prompt_flow.transitions.len()
        );
        Ok(PipelineOutput {
            process_description,
            prompt_flow,
        })
    }

    /// Calls the model and builds a record from its reply. A reply that fails
    /// to parse or validate is retried with the error fed back; client errors
    /// are returned immediately.
    async fn run_stage<T, E>(
        &self,
        stage: Stage,
        prompt: &str,
        build: impl Fn(&Value) -> Result<T, E>,
    ) -> Result<T>
    where
        E: Into<FlowError>,
    {
        let system = self.persona(stage);
        let mut current_prompt = prompt.to_string();
        let attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            debug!("{}: attempt {}/{}", stage.as_str(), attempt, attempts);
            let reply = self.client.complete(&system, &current_prompt).await?;

            let result = parse_reply(&reply).and_then(|value| build(&value).map_err(Into::into));
            match result {
                Ok(record) => return Ok(record),
                Err(e) => {
                    warn!(
                        "{}: attempt {}/{} rejected: {} (reply: {})",
                        stage.as_str(),
                        attempt,
                        attempts,
                        e,
                        preview(&reply, 200)
                    );
                    if attempt >= attempts {
                        return Err(anyhow::Error::new(e).context(format!(
                            "{} stage failed after {} attempt(s)",
                            stage.as_str(),
                            attempts
                        )));
                    }
                    current_prompt = format!(
                        "{}{}",
                        prompt,
                        prompts::retry_feedback(stage, &e.to_string())
                    );
                }
            }
        }
    }
}
