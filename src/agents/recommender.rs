//! Recommender Agent.
//!
//! Turns a rendered draw-statistics summary into a short report and a set of
//! themed number combinations.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{Agent, AgentError};
use crate::models::{is_valid_number, Combination, Recommendation, NUMBERS_PER_DRAW};

/// Default number of combinations to ask for.
pub const DEFAULT_COMBINATIONS: usize = 2;

/// Input for the Recommender agent.
#[derive(Debug, Clone)]
pub struct RecommenderInput {
    /// Output of `render_summary`
    pub summary: String,

    /// How many combinations to request
    pub combinations: usize,
}

impl RecommenderInput {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            combinations: DEFAULT_COMBINATIONS,
        }
    }
}

/// A combination as the model may phrase it: a themed object or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCombination {
    Themed {
        numbers: Vec<i64>,
        #[serde(default)]
        theme: Option<String>,
    },
    Bare(Vec<i64>),
}

#[derive(Debug, Deserialize)]
struct RecommenderResponse {
    #[serde(default)]
    report: String,
    #[serde(default)]
    combinations: Vec<RawCombination>,
}

/// Recommender agent implementation.
pub struct RecommenderAgent {
    backend: Arc<dyn AiBackend>,
}

impl RecommenderAgent {
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn build_prompt(&self, input: &RecommenderInput) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(RECOMMENDER_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "{}\nRecommend {} combinations.",
                input.summary, input.combinations
            )),
        ]
    }

    fn parse_response(&self, response: &str) -> Result<Recommendation, AgentError> {
        let json = super::extract_json(response);
        let parsed: RecommenderResponse = serde_json::from_str(json).map_err(|e| {
            warn!(
                "Recommender JSON parse error. Response start: {}",
                super::log_snippet(response, 200)
            );
            AgentError::ResponseParseError(format!("Invalid JSON: {}", e))
        })?;

        let mut combinations = Vec::new();
        for (idx, raw) in parsed.combinations.into_iter().enumerate() {
            let (numbers, theme) = match raw {
                RawCombination::Themed { numbers, theme } => (numbers, theme),
                RawCombination::Bare(numbers) => (numbers, None),
            };

            match to_combination_numbers(&numbers) {
                Some(numbers) => combinations.push(Combination {
                    numbers,
                    theme: theme
                        .filter(|t| !t.trim().is_empty())
                        .unwrap_or_else(|| format!("Combination {}", idx + 1)),
                }),
                None => warn!("Dropping invalid combination {:?}", numbers),
            }
        }

        if combinations.is_empty() {
            return Err(AgentError::ResponseParseError(
                "No valid combinations in response".to_string(),
            ));
        }

        Ok(Recommendation {
            report: parsed.report.trim().to_string(),
            combinations,
        })
    }
}

/// Six distinct in-range numbers, sorted; `None` otherwise.
fn to_combination_numbers(numbers: &[i64]) -> Option<[u8; NUMBERS_PER_DRAW]> {
    if numbers.len() != NUMBERS_PER_DRAW {
        return None;
    }

    let mut out = [0u8; NUMBERS_PER_DRAW];
    for (slot, &n) in out.iter_mut().zip(numbers) {
        let n = u8::try_from(n).ok().filter(|&n| is_valid_number(n))?;
        *slot = n;
    }
    out.sort_unstable();

    if out.windows(2).any(|w| w[0] == w[1]) {
        return None;
    }
    Some(out)
}

const RECOMMENDER_SYSTEM_PROMPT: &str = r#"You are a lottery statistics analyst. The user gives you factual statistics over recent draws of a 6/45 lottery (six numbers from 1 to 45 plus a bonus ball).

Using only those statistics, recommend the requested number of combinations:
- Each combination has exactly 6 distinct numbers between 1 and 45
- Give each combination a short theme, e.g. "Balanced mix" or "Cold number focus"
- Summarise why you chose them in a report of at most 2 sentences

Return JSON in this exact format:
{
  "report": "Short analysis report",
  "combinations": [
    {"numbers": [3, 11, 19, 27, 34, 42], "theme": "Balanced mix"},
    {"numbers": [5, 16, 17, 21, 29, 44], "theme": "Cold number focus"}
  ]
}

IMPORTANT:
- Respond with JSON only, no Markdown or extra text
- Do NOT claim the numbers are more likely to win"#;

#[async_trait]
impl Agent for RecommenderAgent {
    type Input = RecommenderInput;
    type Output = Recommendation;

    fn name(&self) -> &'static str {
        "recommender"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        info!(
            "Requesting {} combinations from {}",
            input.combinations,
            self.backend.name()
        );

        let messages = self.build_prompt(&input);
        let request = ChatRequest::new(messages)
            .with_json_mode()
            .with_temperature(0.7);

        let response = self.backend.chat(request).await?;
        debug!("AI response: {}", response.content);

        let recommendation = self.parse_response(&response.content)?;

        info!(
            "Recommender returned {} combinations",
            recommendation.combinations.len()
        );

        Ok(recommendation)
    }
}
