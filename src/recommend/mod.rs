//! Recommendation engine: turns a completed answer set into a music style.

pub mod model;
pub mod rules;

pub use model::Recommendation;
pub use rules::{Condition, RecommendationEngine, Rule, schema};
