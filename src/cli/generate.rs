use anyhow::Result;
use tracing::info;

use super::{enforce_strict, read_input, write_output};
use crate::config::Config;
use crate::llm::factory;
use crate::pipeline::{FlowGenerator, PipelineOutput};
use crate::pretty::pretty;
use crate::render::render_mermaid;

const RULE: &str = "=====================================================";

/// Formats a pipeline result the way `generate` prints it.
pub fn format_report(output: &PipelineOutput, mermaid: &str) -> Result<String> {
    Ok(format!(
        "{rule}\nProcess Description\n{rule}\n\n{}\n\n{rule}\nPromptFlow\n{rule}\n\n{}\n\n{rule}\nMermaid Diagram\n{rule}\n\n{}",
        pretty(output.process_description.clone())?,
        pretty(output.prompt_flow.clone())?,
        mermaid,
        rule = RULE
    ))
}

#[allow(clippy::too_many_arguments)]
pub async fn run(
    input: String,
    config_path: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    base_url_override: Option<String>,
    max_retries_override: Option<usize>,
    output_json: Option<String>,
    output_mermaid: Option<String>,
    strict: bool,
    dry_run: bool,
) -> Result<()> {
    info!("Input: {}", input);
    info!("Dry run: {}", dry_run);

    let mut config = Config::load_with_path(config_path)?;

    // Apply CLI overrides
    if let Some(ref provider) = provider_override {
        info!("CLI override: provider = {}", provider);
        config.llm.provider = provider.clone();
    }
    if let Some(ref model) = model_override {
        info!("CLI override: model = {}", model);
        config.llm.model = model.clone();
    }
    if let Some(ref base_url) = base_url_override {
        info!("CLI override: base_url = {}", base_url);
        config.llm.base_url = Some(base_url.clone());
    }
    if let Some(retries) = max_retries_override {
        info!("CLI override: max_retries = {}", retries);
        config.generation.max_retries = retries;
    }

    let description = read_input(&input)?;

    let client = factory::create_client(&config, dry_run)?;
    if dry_run {
        info!("Using mock LLM client");
    } else {
        info!(
            "Using {} LLM provider with model {}",
            config.llm.provider, config.llm.model
        );
    }

    let generator = FlowGenerator::new(client, config.generation.max_retries)
        .with_prompts_config(config.prompts.clone());
    let output = generator.run(&description).await?;

    if strict {
        enforce_strict(&output.prompt_flow)?;
    }

    let mermaid = render_mermaid(&output.prompt_flow);

    if let Some(ref path) = output_json {
        write_output(path, &pretty(output.prompt_flow.clone())?)?;
    }
    if let Some(ref path) = output_mermaid {
        write_output(path, &mermaid)?;
    }

    print!("{}", format_report(&output, &mermaid)?);
    Ok(())
}
