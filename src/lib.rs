//! # Lotto Advisor
//!
//! Draw statistics engine with AI-assisted number recommendations.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (draws, statistics, recommendations)
//! - **calculate**: Statistics engine and prompt summary rendering
//! - **fetch**: Draw repository adapter (public draw-result endpoint)
//! - **agents**: AI backends and the recommender agent
//! - **advisor**: Fetch → analyze → recommend orchestration
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod advisor;
pub mod agents;
pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;

pub use models::*;
