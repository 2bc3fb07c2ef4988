//! AI-powered recommendation agents.
//!
//! Agents turn a rendered statistics summary into structured output using
//! AI models. All agents implement the `Agent` trait.

pub mod backend;
pub mod recommender;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during agent execution.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI response unparseable: {0}")]
    ResponseParseError(String),

    #[error("AI backend misconfigured: {0}")]
    Misconfigured(String),
}

/// Core trait for all AI agents.
#[async_trait]
pub trait Agent {
    type Input;
    type Output;

    /// Agent identifier for logging.
    fn name(&self) -> &'static str;

    /// Execute the agent's task.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError>;
}

/// Strip Markdown code fences and surrounding prose from a model reply,
/// returning the outermost JSON object or array.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let unfenced = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.rfind("```").map_or(rest, |end| &rest[..end]).trim()
        }
        None => trimmed,
    };

    let start = unfenced.find(['{', '[']);
    let end = unfenced.rfind(['}', ']']);
    match (start, end) {
        (Some(s), Some(e)) if s <= e => &unfenced[s..=e],
        _ => unfenced,
    }
}

/// First `max_chars` characters of a model reply, for log lines.
pub(crate) fn log_snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_plain() {
        assert_eq!(extract_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_fenced() {
        let reply = "```json\n{\"report\": \"ok\"}\n```";
        assert_eq!(extract_json(reply), r#"{"report": "ok"}"#);

        let reply = "```\n[1, 2]\n```\n";
        assert_eq!(extract_json(reply), "[1, 2]");
    }

    #[test]
    fn test_extract_json_with_prose() {
        let reply = "Here you go:\n{\"report\": \"x\"}\nGood luck!";
        assert_eq!(extract_json(reply), r#"{"report": "x"}"#);
    }

    #[test]
    fn test_extract_json_no_json() {
        assert_eq!(extract_json("  nothing here "), "nothing here");
    }

    #[test]
    fn test_log_snippet_respects_char_boundaries() {
        // 600 bytes of three-byte characters
        let body = "가".repeat(200);
        let snippet = log_snippet(&body, 500);
        assert_eq!(snippet, body);

        let snippet = log_snippet(&body, 150);
        assert_eq!(snippet.chars().count(), 150);
        assert_eq!(snippet.len(), 450);

        assert_eq!(log_snippet("ascii", 3), "asc");
    }
}
