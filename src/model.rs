//! Process-description and PromptFlow records.
//!
//! Records are built from untyped JSON (usually an LLM reply) with
//! [`PromptFlow::from_value`] / [`ProcessDescription::from_value`]. Construction
//! checks that every required field exists and has the right JSON type, and
//! reports the first offending field path. It deliberately does not check graph
//! semantics: duplicate state ids, dangling transition endpoints and an
//! undeclared `finalState` are all accepted. See [`crate::lint`] for an opt-in
//! check.

use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::{json_type_name, FlowError, ValidationError, ValidationErrorKind};

/// Structured summary of a natural-language workflow description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDescription {
    pub process_description: String,
    pub key_objectives: Vec<String>,
    pub participants_and_roles: Vec<String>,
    pub decision_points: Vec<String>,
    pub challenges_or_issues: Vec<String>,
    pub desired_outcomes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

/// A named node of the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDescription {
    pub state: String,
    pub description: String,
}

/// A directed edge labelled with the event that triggers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub current_state: String,
    pub event: String,
    pub next_state: String,
}

/// A workflow modelled as a finite state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFlow {
    pub workflow_name: String,
    pub initial_state: String,
    pub states_description: Vec<StateDescription>,
    pub transitions: Vec<Transition>,
    pub final_state: String,
}

/// Typed accessors over one JSON object, tracking the field path for errors.
struct Fields<'a> {
    record: &'static str,
    prefix: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn new(record: &'static str, prefix: String, value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self {
                record,
                prefix,
                map,
            }),
            other => Err(ValidationError::new(
                record,
                prefix,
                ValidationErrorKind::NotAnObject {
                    found: json_type_name(other),
                },
            )),
        }
    }

    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        }
    }

    fn wrong_type(&self, path: String, expected: &'static str, found: &Value) -> ValidationError {
        ValidationError::new(
            self.record,
            path,
            ValidationErrorKind::WrongType {
                expected,
                found: json_type_name(found),
            },
        )
    }

    fn get(&self, field: &str) -> Result<&'a Value, ValidationError> {
        self.map.get(field).ok_or_else(|| {
            ValidationError::new(self.record, self.path(field), ValidationErrorKind::Missing)
        })
    }

    fn string(&self, field: &str) -> Result<String, ValidationError> {
        match self.get(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.wrong_type(self.path(field), "string", other)),
        }
    }

    /// Absent and `null` both mean "not provided".
    fn optional_string(&self, field: &str) -> Result<Option<String>, ValidationError> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(self.path(field), "string", other)),
        }
    }

    fn array(&self, field: &str) -> Result<&'a Vec<Value>, ValidationError> {
        match self.get(field)? {
            Value::Array(items) => Ok(items),
            other => Err(self.wrong_type(self.path(field), "array", other)),
        }
    }

    fn string_list(&self, field: &str) -> Result<Vec<String>, ValidationError> {
        self.array(field)?
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.wrong_type(format!("{}[{}]", self.path(field), i), "string", other)),
            })
            .collect()
    }

    /// Builds each element of an array of objects with `build`.
    fn records<T>(
        &self,
        field: &str,
        build: impl Fn(Fields<'a>) -> Result<T, ValidationError>,
    ) -> Result<Vec<T>, ValidationError> {
        self.array(field)?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let nested = Fields::new(self.record, format!("{}[{}]", self.path(field), i), item)?;
                build(nested)
            })
            .collect()
    }
}

impl StateDescription {
    fn from_fields(f: Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            state: f.string("state")?,
            description: f.string("description")?,
        })
    }
}

impl Transition {
    fn from_fields(f: Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            current_state: f.string("currentState")?,
            event: f.string("event")?,
            next_state: f.string("nextState")?,
        })
    }
}

impl PromptFlow {
    /// Builds a validated `PromptFlow` from untyped JSON. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let f = Fields::new("PromptFlow", String::new(), value)?;
        Ok(Self {
            workflow_name: f.string("workflowName")?,
            initial_state: f.string("initialState")?,
            states_description: f.records("statesDescription", StateDescription::from_fields)?,
            transitions: f.records("transitions", Transition::from_fields)?,
            final_state: f.string("finalState")?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, FlowError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }

    /// Ids of the declared states, in declaration order (duplicates kept).
    pub fn state_ids(&self) -> impl Iterator<Item = &str> {
        self.states_description.iter().map(|s| s.state.as_str())
    }
}

impl ProcessDescription {
    /// Builds a validated `ProcessDescription` from untyped JSON. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let f = Fields::new("ProcessDescription", String::new(), value)?;
        Ok(Self {
            process_description: f.string("processDescription")?,
            key_objectives: f.string_list("keyObjectives")?,
            participants_and_roles: f.string_list("participantsAndRoles")?,
            decision_points: f.string_list("decisionPoints")?,
            challenges_or_issues: f.string_list("challengesOrIssues")?,
            desired_outcomes: f.string_list("desiredOutcomes")?,
            additional_information: f.optional_string("additionalInformation")?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, FlowError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }

    /// Compact JSON form handed to the second pipeline stage.
    pub fn to_json(&self) -> Result<String, FlowError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromStr for PromptFlow {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

impl FromStr for ProcessDescription {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flow_json() -> Value {
        json!({
            "workflowName": "Ticket triage",
            "initialState": "Open",
            "statesDescription": [
                {"state": "Open", "description": "New ticket"},
                {"state": "Closed", "description": "Resolved"}
            ],
            "transitions": [
                {"currentState": "Open", "event": "resolve", "nextState": "Closed"}
            ],
            "finalState": "Closed"
        })
    }

    #[test]
    fn test_from_value_builds_flow() {
        let flow = PromptFlow::from_value(&flow_json()).unwrap();
        assert_eq!(flow.workflow_name, "Ticket triage");
        assert_eq!(flow.states_description.len(), 2);
        assert_eq!(flow.transitions[0].next_state, "Closed");
        assert_eq!(flow.state_ids().collect::<Vec<_>>(), vec!["Open", "Closed"]);
    }

    #[test]
    fn test_missing_final_state() {
        let mut value = flow_json();
        value.as_object_mut().unwrap().remove("finalState");
        let err = PromptFlow::from_value(&value).unwrap_err();
        assert_eq!(err.path, "finalState");
        assert!(err.is_missing());
    }

    #[test]
    fn test_nested_path_in_error() {
        let mut value = flow_json();
        value["transitions"][0]["nextState"] = json!(7);
        let err = PromptFlow::from_value(&value).unwrap_err();
        assert_eq!(err.path, "transitions[0].nextState");
        assert_eq!(
            err.kind,
            ValidationErrorKind::WrongType {
                expected: "string",
                found: "number"
            }
        );
    }

    #[test]
    fn test_non_object_state_entry() {
        let mut value = flow_json();
        value["statesDescription"][1] = json!("Closed");
        let err = PromptFlow::from_value(&value).unwrap_err();
        assert_eq!(err.path, "statesDescription[1]");
        assert_eq!(err.kind, ValidationErrorKind::NotAnObject { found: "string" });
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = PromptFlow::from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut value = flow_json();
        value["version"] = json!("2");
        value["statesDescription"][0]["color"] = json!("red");
        assert!(PromptFlow::from_value(&value).is_ok());
    }

    #[test]
    fn test_process_description_optional_addendum() {
        let value = json!({
            "processDescription": "Summary",
            "keyObjectives": ["a"],
            "participantsAndRoles": [],
            "decisionPoints": [],
            "challengesOrIssues": [],
            "desiredOutcomes": ["b"],
            "additionalInformation": null
        });
        let pd = ProcessDescription::from_value(&value).unwrap();
        assert!(pd.additional_information.is_none());
        assert_eq!(pd.desired_outcomes, vec!["b"]);
    }

    #[test]
    fn test_process_description_list_item_type() {
        let value = json!({
            "processDescription": "Summary",
            "keyObjectives": ["a", 2],
            "participantsAndRoles": [],
            "decisionPoints": [],
            "challengesOrIssues": [],
            "desiredOutcomes": []
        });
        let err = ProcessDescription::from_value(&value).unwrap_err();
        assert_eq!(err.path, "keyObjectives[1]");
    }

    #[test]
    fn test_from_str_rejects_bad_json() {
        let result: Result<PromptFlow, _> = "{not json".parse();
        assert!(matches!(result, Err(FlowError::Json(_))));
    }
}
