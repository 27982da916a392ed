use anyhow::{Context, Result};
use tracing::info;

use super::{enforce_strict, read_input, write_output};
use crate::model::PromptFlow;
use crate::pretty::pretty;
use crate::render::render_mermaid;

/// Loads a PromptFlow JSON file and renders it as Mermaid (or indented JSON with `as_json`).
pub fn render_file(path: &str, as_json: bool, strict: bool) -> Result<String> {
    let text = read_input(path)?;
    let flow = PromptFlow::from_json_str(&text)
        .with_context(|| format!("{} is not a valid PromptFlow", path))?;
    info!(
        "Loaded PromptFlow '{}' ({} states, {} transitions)",
        flow.workflow_name,
        flow.states_description.len(),
        flow.transitions.len()
    );

    if strict {
        enforce_strict(&flow)?;
    }

    if as_json {
        Ok(pretty(flow)?)
    } else {
        Ok(render_mermaid(&flow))
    }
}

pub fn run(path: String, as_json: bool, strict: bool, output: Option<String>) -> Result<()> {
    let rendered = render_file(&path, as_json, strict)?;
    match output {
        Some(out) => write_output(&out, &rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FLOW: &str = r#"{
  "workflowName": "Review",
  "initialState": "Draft",
  "statesDescription": [
    {"state": "Draft", "description": "Writing"},
    {"state": "Done", "description": "Merged"}
  ],
  "transitions": [
    {"currentState": "Draft", "event": "approved", "nextState": "Done"}
  ],
  "finalState": "Done"
}"#;

    fn write_flow(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("flow.json");
        fs::write(&path, body).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_render_file_mermaid() {
        let dir = TempDir::new().unwrap();
        let out = render_file(&write_flow(&dir, FLOW), false, false).unwrap();
        assert!(out.starts_with("graph TD\n"));
        assert!(out.contains("    Draft -->|approved| Done\n"));
    }

    #[test]
    fn test_render_file_json_keeps_field_order() {
        let dir = TempDir::new().unwrap();
        let out = render_file(&write_flow(&dir, FLOW), true, false).unwrap();
        let workflow = out.find("workflowName").unwrap();
        let final_state = out.find("finalState").unwrap();
        assert!(workflow < final_state);
    }

    #[test]
    fn test_render_file_invalid_flow() {
        let dir = TempDir::new().unwrap();
        let path = write_flow(&dir, r#"{"workflowName": "x"}"#);
        let err = render_file(&path, false, false).unwrap_err();
        assert!(format!("{:#}", err).contains("initialState"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let path = write_flow(&dir, FLOW);
        let out_path = dir.path().join("flow.mmd");
        run(
            path,
            false,
            true,
            Some(out_path.to_string_lossy().to_string()),
        )
        .unwrap();
        let written = fs::read_to_string(out_path).unwrap();
        assert!(written.ends_with("style Done fill:#ccf,stroke:#f66,stroke-width:2px\n"));
    }
}
