// System personas and user prompts for the two pipeline stages.

/// Which pipeline stage a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Free text -> ProcessDescription
    Analyst,
    /// ProcessDescription -> PromptFlow
    Architect,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Analyst => "analyst",
            Stage::Architect => "architect",
        }
    }

    /// Name of the record this stage is expected to produce.
    pub fn record_name(self) -> &'static str {
        match self {
            Stage::Analyst => "processDescription",
            Stage::Architect => "PromptFlow",
        }
    }
}

pub const PROCESS_DESCRIPTION_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "processDescription": {
      "type": "string",
      "description": "A detailed narrative of the overall process or challenge."
    },
    "keyObjectives": {
      "type": "array",
      "items": { "type": "string" },
      "description": "The main objectives or goals of the process."
    },
    "participantsAndRoles": {
      "type": "array",
      "items": { "type": "string" },
      "description": "The individuals involved in the process and their roles."
    },
    "decisionPoints": {
      "type": "array",
      "items": { "type": "string" },
      "description": "Critical decision points within the process."
    },
    "challengesOrIssues": {
      "type": "array",
      "items": { "type": "string" },
      "description": "The main challenges or issues encountered during the process."
    },
    "desiredOutcomes": {
      "type": "array",
      "items": { "type": "string" },
      "description": "The desired outcomes upon completing the process."
    },
    "additionalInformation": {
      "type": "string",
      "description": "Anything else that helps in understanding the process."
    }
  },
  "required": [
    "processDescription",
    "keyObjectives",
    "participantsAndRoles",
    "decisionPoints",
    "challengesOrIssues",
    "desiredOutcomes"
  ]
}"#;

pub const PROMPTFLOW_SCHEMA: &str = r#"{
  "workflowName": "Name of the workflow",
  "initialState": "Starting point of the workflow",
  "statesDescription": [
    { "state": "State1", "description": "Description of State1" },
    { "state": "State2", "description": "Description of State2" }
  ],
  "transitions": [
    { "currentState": "State1", "event": "Event that moves State1 to State2", "nextState": "State2" },
    { "currentState": "State2", "event": "Event that moves State2 to FinalState", "nextState": "FinalState" }
  ],
  "finalState": "Ending point of the workflow"
}"#;

/// Applies the configured custom text to a built-in persona.
fn with_custom(default: String, custom: Option<&str>, overwrite: bool) -> String {
    match custom {
        Some(custom) if overwrite => custom.to_string(),
        Some(custom) => format!("{}\n\n## Additional instructions\n\n{}", default, custom),
        None => default,
    }
}

pub fn analyst_persona(custom: Option<&str>, overwrite: bool) -> String {
    let default = format!(
        r#"You are a Workflow Analyst at a large company. You read descriptions of business processes and challenges and capture everything essential about them in a structured processDescription object.

Read the description you are given, identify its key components, and fill in:

- processDescription: a concise summary of the overall process or challenge
- keyObjectives: the main goals of the process
- participantsAndRoles: who is involved and what each of them is responsible for
- decisionPoints: the places where choices or approvals are required
- challengesOrIssues: bottlenecks, risks and known problems
- desiredOutcomes: what a successful run of the process produces
- additionalInformation: anything else that helps explain the process (optional)

Your output must be a single JSON object that follows this schema:

{}

Populate every required property. Where the description is vague, make reasonable inferences from context but do not invent unsupported claims. Respond with the JSON object only."#,
        PROCESS_DESCRIPTION_SCHEMA
    );
    with_custom(default, custom, overwrite)
}

pub fn architect_persona(custom: Option<&str>, overwrite: bool) -> String {
    let default = format!(
        r#"You are a systems architect whose full-time job is converting detailed workflow descriptions into PromptFlow objects.

A PromptFlow is a finite state machine expressed as JSON. The same PromptFlow can drive many kinds of workflow, for example:
- a dialogue flow for a customer-service chatbot
- manufacturing instructions for a factory line
- a software delivery pipeline
- a data pipeline (cleaning, transformation, analysis)

Your job:
- Read the process description you are given.
- Model each stage of the workflow as a state with a short identifier (letters, digits and underscores only) and a one-sentence description.
- Add transitions between states for every decision point and possible outcome, labelled with the event that triggers them.
- Pick exactly one initial state and one final state.

Answer with a single PromptFlow JSON object and nothing else. The object must follow this shape:

{}"#,
        PROMPTFLOW_SCHEMA
    );
    with_custom(default, custom, overwrite)
}

pub fn process_description_prompt(natural_language_description: &str) -> String {
    format!(
        r#"You've received a request to generate a processDescription object.

A colleague has come to you with this description of what they want modeled:

==========
{}
==========

Follow your instructions and return a processDescription JSON object that adheres to the processDescription JSON schema."#,
        natural_language_description.trim()
    )
}

pub fn promptflow_prompt(process_description_json: &str) -> String {
    format!(
        r#"You've received a request to generate a PromptFlow object. Here's the process description you've been given:

{}

Follow your instructions and return a PromptFlow JSON object that adheres to the PromptFlow JSON schema."#,
        process_description_json
    )
}

/// Appended to a stage prompt when the previous reply was rejected.
pub fn retry_feedback(stage: Stage, error: &str) -> String {
    format!(
        "\n\nYour previous answer could not be used: {}\nReturn only a valid {} JSON object with every required field.",
        error,
        stage.record_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personas_embed_schemas() {
        assert!(analyst_persona(None, false).contains("\"keyObjectives\""));
        assert!(architect_persona(None, false).contains("\"statesDescription\""));
    }

    #[test]
    fn test_custom_append() {
        let persona = architect_persona(Some("Use at most five states."), false);
        assert!(persona.contains("systems architect"));
        assert!(persona.ends_with("Use at most five states."));
    }

    #[test]
    fn test_custom_overwrite() {
        let persona = analyst_persona(Some("Just summarise."), true);
        assert_eq!(persona, "Just summarise.");
    }

    #[test]
    fn test_overwrite_without_custom_keeps_default() {
        assert_eq!(analyst_persona(None, true), analyst_persona(None, false));
    }

    #[test]
    fn test_process_description_prompt_wraps_input() {
        let prompt = process_description_prompt("  Approve invoices.\n");
        assert!(prompt.contains("==========\nApprove invoices.\n=========="));
    }

    #[test]
    fn test_retry_feedback_names_record() {
        let feedback = retry_feedback(Stage::Architect, "missing finalState");
        assert!(feedback.contains("missing finalState"));
        assert!(feedback.contains("PromptFlow JSON object"));
    }
}
