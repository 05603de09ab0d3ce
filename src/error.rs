//! Error types for Tune Quiz.

use crate::questions::{OptionId, QuestionId};

/// Top-level error type for the quiz.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Question source error: {0}")]
    Source(#[from] SourceError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while loading the question list.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request to {location} failed: {reason}")]
    RequestFailed { location: String, reason: String },

    #[error("{location} answered with HTTP status {status}")]
    HttpStatus { location: String, status: u16 },

    #[error("Malformed question data from {location}: {reason}")]
    Malformed { location: String, reason: String },

    #[error("Invalid question list: {0}")]
    Invalid(String),

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Network failures, server errors and rate limiting are transient.
    /// Bad data stays bad, so malformed or invalid lists fail immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::Malformed { .. } | Self::Invalid(_) | Self::Io { .. } => false,
        }
    }
}

/// Login form validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Please fill in all fields")]
    EmptyFields,
}

/// Questionnaire flow errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Please log in first")]
    NotLoggedIn,

    #[error("Already logged in")]
    AlreadyLoggedIn,

    #[error("Questions are still loading")]
    QuestionsNotLoaded,

    #[error("Questions were already loaded for this session")]
    QuestionsAlreadyLoaded,

    #[error("Please choose an answer before moving on.")]
    AnswerRequired,

    #[error("Option {option} is not offered by question {question}")]
    UnknownOption { question: QuestionId, option: OptionId },

    #[error("The questionnaire is already complete")]
    AlreadyComplete,

    #[error("The questionnaire is not complete yet")]
    NotComplete,

    #[error("Nothing to restart")]
    CannotRestart,

    #[error("{0}")]
    InvalidLogin(#[from] LoginError),
}

impl FlowError {
    /// Recoverable user-input errors: reported to the user, state unchanged.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::AnswerRequired | Self::UnknownOption { .. } | Self::InvalidLogin(_)
        )
    }
}

/// Rule table errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Rule {rule} has no conditions and would match everything")]
    EmptyConditions { rule: String },

    #[error("Rule {rule} references unknown question {question}")]
    UnknownQuestion { rule: String, question: QuestionId },

    #[error("Rule {rule} expects option {option} which question {question} does not offer")]
    UnknownOption {
        rule: String,
        question: QuestionId,
        option: OptionId,
    },
}

/// Result type alias for the quiz.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_source_errors_are_retryable() {
        let failed = SourceError::RequestFailed {
            location: "http://x".into(),
            reason: "connection refused".into(),
        };
        assert!(failed.is_retryable());

        for status in [429, 500, 502, 503] {
            let err = SourceError::HttpStatus {
                location: "http://x".into(),
                status,
            };
            assert!(err.is_retryable(), "{status} should be retryable");
        }
    }

    #[test]
    fn bad_data_is_not_retryable() {
        let not_found = SourceError::HttpStatus {
            location: "http://x".into(),
            status: 404,
        };
        assert!(!not_found.is_retryable());
        assert!(!SourceError::Invalid("empty".into()).is_retryable());
        assert!(
            !SourceError::Malformed {
                location: "f".into(),
                reason: "eof".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(FlowError::AnswerRequired.is_input_error());
        assert!(FlowError::InvalidLogin(LoginError::EmptyFields).is_input_error());
        assert!(!FlowError::NotLoggedIn.is_input_error());
        assert!(!FlowError::QuestionsNotLoaded.is_input_error());
    }

    #[test]
    fn login_error_message_passes_through() {
        let err = FlowError::from(LoginError::EmptyFields);
        assert_eq!(err.to_string(), "Please fill in all fields");
    }
}
