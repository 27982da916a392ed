//! Mermaid flowchart rendering for a [`PromptFlow`].

use crate::model::PromptFlow;

const INITIAL_STATE_STYLE: &str = "fill:#f9f,stroke:#333,stroke-width:4px";
const FINAL_STATE_STYLE: &str = "fill:#ccf,stroke:#f66,stroke-width:2px";

/// Renders `flow` as a top-down Mermaid graph.
///
/// Output order is fixed: header, one node line per declared state, one edge
/// line per transition, then the initial-state and final-state style lines.
/// Nothing is sorted, deduplicated, escaped or checked; transition endpoints
/// that were never declared show up as implicit Mermaid nodes.
#[must_use]
pub fn render_mermaid(flow: &PromptFlow) -> String {
    let mut out = String::from("graph TD\n");

    for s in &flow.states_description {
        out.push_str(&format!(
            "    {}(\"{}: {}\")\n",
            s.state, s.state, s.description
        ));
    }

    for t in &flow.transitions {
        out.push_str(&format!(
            "    {} -->|{}| {}\n",
            t.current_state, t.event, t.next_state
        ));
    }

    out.push_str(&format!(
        "    style {} {}\n",
        flow.initial_state, INITIAL_STATE_STYLE
    ));
    out.push_str(&format!(
        "    style {} {}\n",
        flow.final_state, FINAL_STATE_STYLE
    ));
    out
}
