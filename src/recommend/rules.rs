//! Ordered rule table mapping answer combinations to a recommendation.
//!
//! Rules are evaluated in declaration order and the first match wins:
//! - mood/genre/atmosphere triples pick a specific style
//! - tempo/instrument pairs are checked after all triples
//! - nothing matched → the fallback "Mixed style"
//!
//! An unanswered question never satisfies a condition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RuleError;
use crate::questions::{OptionId, QuestionId, QuestionSet};
use crate::session::AnswerSet;

use super::model::Recommendation;

/// Question identifiers of the bundled five-question schema.
pub mod schema {
    use crate::questions::QuestionId;

    pub const MOOD: QuestionId = QuestionId(1);
    pub const GENRE: QuestionId = QuestionId(2);
    pub const ATMOSPHERE: QuestionId = QuestionId(3);
    pub const TEMPO: QuestionId = QuestionId(4);
    pub const INSTRUMENT: QuestionId = QuestionId(5);
}

/// `question` must have been answered with `option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub question: QuestionId,
    pub option: OptionId,
}

impl Condition {
    pub fn new(question: QuestionId, option: impl Into<OptionId>) -> Self {
        Self {
            question,
            option: option.into(),
        }
    }

    pub fn holds(&self, answers: &AnswerSet) -> bool {
        answers.get(self.question) == Some(&self.option)
    }
}

/// A named conjunction of conditions and the result it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub conditions: Vec<Condition>,
    pub result: Recommendation,
}

impl Rule {
    /// True when every condition holds.
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        self.conditions.iter().all(|c| c.holds(answers))
    }
}

/// First-match-wins recommendation engine with a fixed fallback.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    rules: Vec<Rule>,
    fallback: Recommendation,
}

impl RecommendationEngine {
    /// Build an engine from an ordered rule list.
    ///
    /// A rule without conditions would shadow everything after it, so it is
    /// rejected.
    pub fn new(rules: Vec<Rule>, fallback: Recommendation) -> Result<Self, RuleError> {
        if let Some(rule) = rules.iter().find(|r| r.conditions.is_empty()) {
            return Err(RuleError::EmptyConditions {
                rule: rule.name.clone(),
            });
        }
        Ok(Self { rules, fallback })
    }

    /// The music style table for the bundled questionnaire.
    pub fn default_rules() -> Self {
        use schema::*;

        fn rule(name: &str, conditions: &[(QuestionId, &str)], result: Recommendation) -> Rule {
            Rule {
                name: name.to_string(),
                conditions: conditions
                    .iter()
                    .map(|(q, o)| Condition::new(*q, *o))
                    .collect(),
                result,
            }
        }

        let rules = vec![
            rule(
                "jazz_lofi",
                &[(MOOD, "calm"), (GENRE, "instrumental"), (ATMOSPHERE, "jazz_cafe")],
                Recommendation::new(
                    "Jazz/Lo-fi",
                    "🎷",
                    "You love calm, atmospheric melodies. Jazz and lo-fi set the perfect mood.",
                ),
            ),
            rule(
                "edm_techno",
                &[(MOOD, "energetic"), (GENRE, "electronic"), (ATMOSPHERE, "party")],
                Recommendation::new(
                    "EDM/Techno",
                    "🎧",
                    "You are full of energy and love a drive. Electronic music will charge you up.",
                ),
            ),
            rule(
                "alt_rock_indie",
                &[(MOOD, "melancholy"), (GENRE, "rock"), (ATMOSPHERE, "live_concert")],
                Recommendation::new(
                    "Alt-rock/Indie",
                    "🎸",
                    "You are deep and emotional. Rock brings out your individuality.",
                ),
            ),
            rule(
                "pop_kpop",
                &[(MOOD, "cheerful"), (GENRE, "pop"), (ATMOSPHERE, "headphones")],
                Recommendation::new(
                    "Pop/K-pop",
                    "🎤",
                    "You are cheerful and open to new things. Pop and K-pop will lift your mood.",
                ),
            ),
            rule(
                "classical",
                &[(TEMPO, "slow"), (INSTRUMENT, "piano")],
                Recommendation::new(
                    "Classical",
                    "🎻",
                    "You value elegance and calm. Classical music is ideal for you.",
                ),
            ),
            rule(
                "rock_metal",
                &[(TEMPO, "fast"), (INSTRUMENT, "drums")],
                Recommendation::new(
                    "Rock/Metal",
                    "🤘",
                    "You love powerful rhythms and emotions. Rock and metal are made for you.",
                ),
            ),
        ];

        Self {
            rules,
            fallback: Recommendation::new(
                "Mixed style",
                "🎼",
                "Your taste is varied and blends several genres.",
            ),
        }
    }

    /// The first rule whose conditions all hold, if any.
    pub fn matched_rule(&self, answers: &AnswerSet) -> Option<&Rule> {
        self.rules.iter().find(|r| r.matches(answers))
    }

    /// Recommend a style for `answers`. Total: partial or empty answer sets
    /// get the fallback.
    pub fn recommend(&self, answers: &AnswerSet) -> &Recommendation {
        match self.matched_rule(answers) {
            Some(rule) => {
                debug!(rule = %rule.name, style = %rule.result.style, "Answers matched rule");
                &rule.result
            }
            None => {
                debug!(answered = answers.len(), "No rule matched, using fallback");
                &self.fallback
            }
        }
    }

    /// Check every condition against the loaded questions.
    ///
    /// A condition naming a question or option that does not exist can
    /// never hold, which almost always means the table and the data have
    /// drifted apart.
    pub fn validate_against(&self, questions: &QuestionSet) -> Result<(), RuleError> {
        for rule in &self.rules {
            for condition in &rule.conditions {
                let question =
                    questions
                        .find(condition.question)
                        .ok_or_else(|| RuleError::UnknownQuestion {
                            rule: rule.name.clone(),
                            question: condition.question,
                        })?;
                if !question.offers(&condition.option) {
                    return Err(RuleError::UnknownOption {
                        rule: rule.name.clone(),
                        question: condition.question,
                        option: condition.option.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Recommendation {
        &self.fallback
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::default_rules()
    }
}
