//! Indented JSON rendering for records, raw JSON text and untyped maps.

use serde_json::Value;

use crate::error::{json_type_name, FlowError, UnsupportedTypeError};
use crate::model::{ProcessDescription, PromptFlow};

/// Inputs accepted by [`pretty`].
///
/// `Value` is the untyped escape hatch: only JSON objects are supported there,
/// everything else is rejected with [`UnsupportedTypeError`].
#[derive(Debug, Clone)]
pub enum Structured {
    Json(String),
    Flow(PromptFlow),
    Process(ProcessDescription),
    Value(Value),
}

impl From<&str> for Structured {
    fn from(s: &str) -> Self {
        Self::Json(s.to_string())
    }
}

impl From<String> for Structured {
    fn from(s: String) -> Self {
        Self::Json(s)
    }
}

impl From<PromptFlow> for Structured {
    fn from(flow: PromptFlow) -> Self {
        Self::Flow(flow)
    }
}

impl From<ProcessDescription> for Structured {
    fn from(pd: ProcessDescription) -> Self {
        Self::Process(pd)
    }
}

impl From<Value> for Structured {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Pretty-prints `input` as two-space indented JSON, keeping key order.
pub fn pretty(input: impl Into<Structured>) -> Result<String, FlowError> {
    let out = match input.into() {
        Structured::Json(text) => {
            let value: Value = serde_json::from_str(&text)?;
            serde_json::to_string_pretty(&value)?
        }
        Structured::Flow(flow) => serde_json::to_string_pretty(&flow)?,
        Structured::Process(pd) => serde_json::to_string_pretty(&pd)?,
        Structured::Value(value @ Value::Object(_)) => serde_json::to_string_pretty(&value)?,
        Structured::Value(other) => {
            return Err(UnsupportedTypeError {
                found: json_type_name(&other),
            }
            .into())
        }
    };
    Ok(out)
}
