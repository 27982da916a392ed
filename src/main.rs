use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use promptflow::cli;

#[derive(Parser)]
#[command(name = "promptflow", version)]
#[command(about = "Turn workflow descriptions into PromptFlow state machines and Mermaid diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a ProcessDescription and PromptFlow from a natural-language description
    Generate {
        /// File with the workflow description ("-" reads stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Path to config file (defaults to ./promptflow.toml or ~/.config/promptflow/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Override LLM provider (anthropic, openai, openai-compatible)
        #[arg(long)]
        provider: Option<String>,

        /// Override LLM model
        #[arg(long)]
        model: Option<String>,

        /// Override API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override max retries per stage (default: from config)
        #[arg(long)]
        max_retries: Option<usize>,

        /// Also write the PromptFlow JSON to this file
        #[arg(long)]
        output_json: Option<String>,

        /// Also write the Mermaid diagram to this file
        #[arg(long)]
        output_mermaid: Option<String>,

        /// Fail if the generated flow has lint errors
        #[arg(long)]
        strict: bool,

        /// Use mock LLM client for testing
        #[arg(long)]
        dry_run: bool,
    },

    /// Render an existing PromptFlow JSON file
    Render {
        /// PromptFlow JSON file ("-" reads stdin)
        input: String,

        /// Print indented JSON instead of a Mermaid diagram
        #[arg(long)]
        json: bool,

        /// Fail if the flow has lint errors
        #[arg(long)]
        strict: bool,

        /// Output file (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            config,
            provider,
            model,
            base_url,
            max_retries,
            output_json,
            output_mermaid,
            strict,
            dry_run,
        } => {
            cli::generate::run(
                input,
                config,
                provider,
                model,
                base_url,
                max_retries,
                output_json,
                output_mermaid,
                strict,
                dry_run,
            )
            .await?;
        }
        Commands::Render {
            input,
            json,
            strict,
            output,
        } => {
            cli::render::run(input, json, strict, output)?;
        }
    }

    Ok(())
}
