//! Terminal presentation layer.
//!
//! Translates typed input into `FlowController` calls and renders the
//! resulting state: login prompts, a progress bar, the current question,
//! validation messages, and the final recommendation.

pub mod app;
pub mod render;

pub use app::Terminal;
pub use render::{parse_choice, render_progress, render_question, render_result};
