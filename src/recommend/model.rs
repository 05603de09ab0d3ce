//! Recommendation result model.

use serde::{Deserialize, Serialize};

/// The final output of the questionnaire. Opaque display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Style label, e.g. "Jazz/Lo-fi".
    pub style: String,
    pub emoji: String,
    pub description: String,
}

impl Recommendation {
    pub fn new(
        style: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            style: style.into(),
            emoji: emoji.into(),
            description: description.into(),
        }
    }
}
