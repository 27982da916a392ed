pub mod generate;
pub mod render;

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use tracing::{info, warn};

use crate::lint::{self, Severity};
use crate::model::PromptFlow;

/// Reads a file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

pub(crate) fn write_output(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path))?;
    info!("Wrote {}", path);
    Ok(())
}

/// Runs the graph linter and fails on error-level issues.
pub(crate) fn enforce_strict(flow: &PromptFlow) -> Result<()> {
    let issues = lint::check(flow);
    for issue in &issues {
        match issue.severity {
            Severity::Error => tracing::error!("{}", issue),
            Severity::Warning => warn!("{}", issue),
        }
    }

    let errors = lint::error_count(&issues);
    if errors > 0 {
        bail!("{} lint error(s) found in PromptFlow '{}'", errors, flow.workflow_name);
    }
    info!("Lint passed with {} warning(s)", issues.len());
    Ok(())
}
