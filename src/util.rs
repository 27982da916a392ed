//! Small shared helpers.

use std::fmt;

/// Holds an API key and prints as `***` in Debug/Display so it never leaks into logs.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Intentionally access the raw secret value (for request headers).
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// First `max` characters of `text`, with an ellipsis when something was cut.
/// Used to keep raw model replies in log lines and error messages short.
pub fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
