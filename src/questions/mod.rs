//! Question data: the ordered list of prompts and where it is loaded from.
//!
//! The list is fetched once per run through a `QuestionSource` and never
//! changes afterwards. `load_with_retry` wraps the fetch with bounded
//! exponential backoff.

pub mod loader;
pub mod model;
pub mod source;

pub use loader::load_with_retry;
pub use model::{OptionId, OptionLink, Question, QuestionId, QuestionSet, QuizOption};
pub use source::{
    FileQuestionSource, HttpQuestionSource, QuestionSource, StaticQuestionSource, source_for,
};
