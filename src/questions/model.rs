//! Question and option data models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Identifier of a question. Numeric on the wire (`"id": 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an option, unique within its question (e.g. `"jazz_cafe"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// External reference attached to an option (e.g. a sample track).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLink {
    pub url: String,
    pub label: String,
}

/// One selectable choice within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: OptionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<OptionLink>,
}

/// One prompt with an ordered set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    /// Look up one of this question's options.
    pub fn option(&self, id: &OptionId) -> Option<&QuizOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    pub fn offers(&self, id: &OptionId) -> bool {
        self.option(id).is_some()
    }
}

/// Validated, ordered question list. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set, rejecting lists the flow could never complete
    /// or where identifiers are ambiguous.
    pub fn new(questions: Vec<Question>) -> Result<Self, SourceError> {
        if questions.is_empty() {
            return Err(SourceError::Invalid("question list is empty".into()));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(SourceError::Invalid(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
            if question.options.is_empty() {
                return Err(SourceError::Invalid(format!(
                    "question {} has no options",
                    question.id
                )));
            }
            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(&option.id) {
                    return Err(SourceError::Invalid(format!(
                        "question {} lists option {} twice",
                        question.id, option.id
                    )));
                }
            }
        }

        Ok(Self { questions })
    }

    /// Parse the wire format: a JSON array of `{id, question, options}`.
    ///
    /// `location` only labels the error.
    pub fn from_json(json: &str, location: &str) -> Result<Self, SourceError> {
        let questions: Vec<Question> =
            serde_json::from_str(json).map_err(|e| SourceError::Malformed {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question presented at `step` (0-based).
    pub fn get(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    pub fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
