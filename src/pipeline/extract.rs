//! Pulling the JSON payload out of a free-form model reply.

use serde_json::Value;

use crate::error::FlowError;

/// Returns the JSON object embedded in `text`.
///
/// Tries, in order: a ```` ```json ```` fence, a plain fence whose body starts
/// with `{`, and the span from the first `{` to the last `}`. Falls back to the
/// trimmed input so the JSON parser can report a useful error.
pub fn extract_json_block(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let body = &trimmed[start + 7..];
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let body = &trimmed[start + 3..];
        if let Some(end) = body.find("```") {
            let inner = body[..end].trim();
            if inner.starts_with('{') {
                return inner;
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Extracts and parses the JSON payload of a model reply.
pub fn parse_reply(text: &str) -> Result<Value, FlowError> {
    Ok(serde_json::from_str(extract_json_block(text))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(extract_json_block(r#"  {"a": 1} "#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_json_fence_with_preamble() {
        let reply = "Sure! Here it is:\n```json\n{\"a\": 1}\n```\nLet me know.";
        assert_eq!(extract_json_block(reply), "{\"a\": 1}");
    }

    #[test]
    fn test_plain_fence() {
        let reply = "```\n{\"a\": [1, 2]}\n```";
        assert_eq!(extract_json_block(reply), "{\"a\": [1, 2]}");
    }

    #[test]
    fn test_braces_in_prose() {
        let reply = "The object is {\"a\": {\"b\": 2}} as requested";
        assert_eq!(extract_json_block(reply), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn test_no_json_falls_back_to_text() {
        assert_eq!(extract_json_block("  no json here "), "no json here");
        assert!(parse_reply("no json here").is_err());
    }

    #[test]
    fn test_parse_reply_value() {
        let value = parse_reply("```json\n{\"k\": \"v\"}\n```").unwrap();
        assert_eq!(value["k"], "v");
    }
}
