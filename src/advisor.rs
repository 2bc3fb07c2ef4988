//! Analysis orchestration.
//!
//! Fetches a window of draws, runs the statistics engine, renders the
//! summary and hands it to the recommender, merging the results.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::agents::backend::AiBackend;
use crate::agents::recommender::{RecommenderAgent, RecommenderInput, DEFAULT_COMBINATIONS};
use crate::agents::{Agent, AgentError};
use crate::calculate::{analyze, render_summary, AnalysisError};
use crate::config::MAX_COMBINATIONS;
use crate::fetch::{DrawRepository, FetchError};
use crate::models::{AnalysisResponse, StatisticsReport};

/// Errors surfaced by the advisor.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Draw fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Recommendation failed: {0}")]
    Agent(#[from] AgentError),
}

/// Wires the draw repository, statistics engine and recommender together.
pub struct Advisor {
    repository: Arc<dyn DrawRepository>,
    recommender: RecommenderAgent,
    combinations: usize,
}

impl Advisor {
    pub fn new(repository: Arc<dyn DrawRepository>, backend: Arc<dyn AiBackend>) -> Self {
        Self {
            repository,
            recommender: RecommenderAgent::new(backend),
            combinations: DEFAULT_COMBINATIONS,
        }
    }

    /// Set how many combinations to request, clamped to `1..=MAX_COMBINATIONS`.
    pub fn with_combinations(mut self, combinations: usize) -> Self {
        self.combinations = combinations.clamp(1, MAX_COMBINATIONS);
        self
    }

    pub fn repository_name(&self) -> &'static str {
        self.repository.name()
    }

    pub fn backend_name(&self) -> &'static str {
        self.recommender.backend_name()
    }

    /// Statistics and their rendered summary for the last `count` draws.
    pub async fn statistics(&self, count: u32) -> Result<StatisticsReport, AdvisorError> {
        let records = self.repository.fetch_recent(count).await?;
        info!(
            "Analyzing {} draws from {}",
            records.len(),
            self.repository.name()
        );

        let stats = analyze(&records)?;
        let summary = render_summary(&stats);
        Ok(StatisticsReport { stats, summary })
    }

    /// Full analysis: statistics plus AI recommendations.
    pub async fn advise(&self, count: u32) -> Result<AnalysisResponse, AdvisorError> {
        let StatisticsReport { stats, summary } = self.statistics(count).await?;

        let input = RecommenderInput {
            summary,
            combinations: self.combinations,
        };
        let recommendation = self.recommender.execute(input).await?;

        Ok(AnalysisResponse::new(recommendation, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::MockBackend;
    use crate::fetch::InMemoryRepository;
    use crate::models::DrawRecord;
    use chrono::NaiveDate;

    fn records() -> Vec<DrawRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        vec![
            DrawRecord::new(103, date, [1, 2, 3, 4, 5, 6], 40).unwrap(),
            DrawRecord::new(102, date, [1, 2, 3, 7, 8, 9], 41).unwrap(),
            DrawRecord::new(101, date, [10, 11, 12, 13, 14, 15], 42).unwrap(),
        ]
    }

    const REPLY: &str = r#"{"report": "Low numbers are hot.", "combinations": [
        {"numbers": [1, 2, 3, 16, 17, 18], "theme": "Hot and cold"}
    ]}"#;

    fn advisor(records: Vec<DrawRecord>, backend: MockBackend) -> Advisor {
        Advisor::new(
            Arc::new(InMemoryRepository::new(records)),
            Arc::new(backend),
        )
    }

    #[tokio::test]
    async fn test_statistics_report() {
        let advisor = advisor(records(), MockBackend::new(REPLY));

        let report = advisor.statistics(10).await.unwrap();
        assert_eq!(report.stats.latest_sequence_number, 103);
        assert_eq!(report.stats.draw_count, 3);
        assert!(report.summary.contains("#101 ~ #103"));
    }

    #[tokio::test]
    async fn test_advise_merges_stats_and_recommendation() {
        let advisor = advisor(records(), MockBackend::new(REPLY));

        let response = advisor.advise(2).await.unwrap();
        assert_eq!(response.report, "Low numbers are hot.");
        assert_eq!(response.combinations.len(), 1);
        assert_eq!(response.combinations[0].theme, "Hot and cold");
        // Only the two most recent draws were requested.
        assert_eq!(response.stats.draw_count, 2);
        assert_eq!(response.stats.oldest_sequence_number, 102);
    }

    #[tokio::test]
    async fn test_empty_window_is_insufficient_data() {
        let advisor = advisor(Vec::new(), MockBackend::new(REPLY));

        let result = advisor.advise(10).await;
        assert!(matches!(
            result,
            Err(AdvisorError::Analysis(AnalysisError::InsufficientData))
        ));
    }

    #[tokio::test]
    async fn test_agent_failure_propagates() {
        let advisor = advisor(records(), MockBackend::failing("offline"));

        let result = advisor.advise(10).await;
        assert!(matches!(result, Err(AdvisorError::Agent(_))));
    }

    #[test]
    fn test_names_and_combinations() {
        let advisor = advisor(records(), MockBackend::new(REPLY));
        assert_eq!(advisor.combinations, DEFAULT_COMBINATIONS);

        let advisor = advisor.with_combinations(0);
        assert_eq!(advisor.combinations, 1);

        let advisor = advisor.with_combinations(4);
        assert_eq!(advisor.combinations, 4);

        let advisor = advisor.with_combinations(MAX_COMBINATIONS + 5);
        assert_eq!(advisor.combinations, MAX_COMBINATIONS);
        assert_eq!(advisor.repository_name(), "memory");
        assert_eq!(advisor.backend_name(), "mock");
    }
}
