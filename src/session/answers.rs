//! Answer store: selected option per question for one session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::questions::{OptionId, QuestionId};

/// Mapping from question to the selected option. At most one option per
/// question; recording again overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, OptionId>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `question`. Returns the previous
    /// selection, if any.
    pub fn record(&mut self, question: QuestionId, option: OptionId) -> Option<OptionId> {
        self.answers.insert(question, option)
    }

    /// The selected option, or `None` when the question is unanswered.
    pub fn get(&self, question: QuestionId) -> Option<&OptionId> {
        self.answers.get(&question)
    }

    pub fn is_answered(&self, question: QuestionId) -> bool {
        self.answers.contains_key(&question)
    }

    /// Remove every answer.
    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &OptionId)> {
        self.answers.iter()
    }
}

impl<O: Into<OptionId>> FromIterator<(QuestionId, O)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, O)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().map(|(q, o)| (q, o.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_inserts_and_overwrites() {
        let mut answers = AnswerSet::new();
        assert!(answers.record(QuestionId(1), "calm".into()).is_none());
        let previous = answers.record(QuestionId(1), "cheerful".into());

        assert_eq!(previous, Some(OptionId::new("calm")));
        assert_eq!(answers.get(QuestionId(1)), Some(&OptionId::new("cheerful")));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn unanswered_question_is_unset() {
        let answers = AnswerSet::new();
        assert!(answers.get(QuestionId(4)).is_none());
        assert!(!answers.is_answered(QuestionId(4)));
    }

    #[test]
    fn clear_removes_everything() {
        let mut answers: AnswerSet = [(QuestionId(1), "calm"), (QuestionId(2), "rock")]
            .into_iter()
            .collect();
        answers.clear();

        assert!(answers.is_empty());
        assert!(answers.get(QuestionId(1)).is_none());
        assert!(answers.get(QuestionId(2)).is_none());
    }

    #[test]
    fn serializes_as_object_keyed_by_question() {
        let answers: AnswerSet = [(QuestionId(3), "party")].into_iter().collect();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json, serde_json::json!({"3": "party"}));
    }
}
