//! Recommendation output and the merged analysis response.

use serde::{Deserialize, Serialize};

use super::{DrawStatistics, NUMBERS_PER_DRAW};

/// One suggested set of numbers with a short theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub numbers: [u8; NUMBERS_PER_DRAW],
    pub theme: String,
}

/// What the recommendation agent returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub report: String,
    pub combinations: Vec<Combination>,
}

/// Statistics plus their prompt rendering, without any AI call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub stats: DrawStatistics,
    pub summary: String,
}

/// Final response: the agent's recommendation merged with the statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub report: String,
    pub combinations: Vec<Combination>,
    pub stats: DrawStatistics,
}

impl AnalysisResponse {
    pub fn new(recommendation: Recommendation, stats: DrawStatistics) -> Self {
        Self {
            report: recommendation.report,
            combinations: recommendation.combinations,
            stats,
        }
    }
}
