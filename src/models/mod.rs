//! Core data models for the lotto advisor.

mod draw;
mod recommendation;
mod stats;

pub use draw::*;
pub use recommendation::*;
pub use stats::*;
