//! FlowController: owns one session's state and drives the questionnaire.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{FlowError, SourceError};
use crate::questions::{OptionId, Question, QuestionSet};
use crate::recommend::{Recommendation, RecommendationEngine};

use super::answers::AnswerSet;
use super::login::{Credentials, User, login};
use super::state::{FlowPhase, Progress};

/// Coordinates login, question loading, answering, and the final result
/// for a single user session.
pub struct FlowController {
    id: Uuid,
    phase: FlowPhase,
    user: Option<User>,
    questions: Option<QuestionSet>,
    load_error: Option<String>,
    answers: AnswerSet,
    engine: RecommendationEngine,
}

impl FlowController {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: FlowPhase::LoggedOut,
            user: None,
            questions: None,
            load_error: None,
            answers: AnswerSet::new(),
            engine,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The notice from a failed question load, if any.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Validate the login form and start the questionnaire.
    ///
    /// Goes to `Answering(0)` if the questions are already here, otherwise
    /// waits in `Loading`.
    pub fn login(&mut self, credentials: Credentials) -> Result<&User, FlowError> {
        if self.phase != FlowPhase::LoggedOut {
            return Err(FlowError::AlreadyLoggedIn);
        }
        let user = login(credentials)?;
        info!(session_id = %self.id, user = user.identifier(), "User logged in");

        self.phase = match &self.questions {
            Some(_) => FlowPhase::Answering { step: 0 },
            None => FlowPhase::Loading,
        };
        let user: &User = self.user.insert(user);
        Ok(user)
    }

    /// End the session. The question list is kept for the next login.
    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            info!(session_id = %self.id, "User logged out");
        }
        self.answers.clear();
        self.phase = FlowPhase::LoggedOut;
    }

    /// Deliver the result of the one-shot question fetch.
    pub fn questions_loaded(&mut self, questions: QuestionSet) -> Result<(), FlowError> {
        if self.questions.is_some() {
            return Err(FlowError::QuestionsAlreadyLoaded);
        }
        if let Err(e) = self.engine.validate_against(&questions) {
            warn!(session_id = %self.id, error = %e, "Rule table does not fit the loaded questions");
        }
        debug!(session_id = %self.id, questions = questions.len(), "Questions delivered");

        self.questions = Some(questions);
        self.load_error = None;
        if self.phase == FlowPhase::Loading {
            self.phase = FlowPhase::Answering { step: 0 };
        }
        Ok(())
    }

    /// Record a failed fetch. The session stays where it is; a logged-in
    /// user remains in `Loading`.
    pub fn load_failed(&mut self, error: &SourceError) {
        warn!(session_id = %self.id, error = %error, "Question list unavailable");
        self.load_error = Some(error.to_string());
    }

    /// The question presented at the current step.
    pub fn current_question(&self) -> Option<&Question> {
        let step = self.phase.step()?;
        self.questions.as_ref()?.get(step)
    }

    /// The option already chosen for the current question.
    pub fn selected(&self) -> Option<&OptionId> {
        let question = self.current_question()?;
        self.answers.get(question.id)
    }

    pub fn progress(&self) -> Option<Progress> {
        let step = self.phase.step()?;
        let total = self.questions.as_ref()?.len();
        Some(Progress::new(step, total))
    }

    /// Label for the advance action: "Get result" on the last question.
    pub fn advance_label(&self) -> &'static str {
        match self.progress() {
            Some(p) if p.is_last() => "Get result",
            _ => "Next",
        }
    }

    /// Select an option for the current question. Does not advance.
    pub fn select(&mut self, option: impl Into<OptionId>) -> Result<(), FlowError> {
        let option = option.into();
        let question = self.answering_question()?;
        if !question.offers(&option) {
            return Err(FlowError::UnknownOption {
                question: question.id,
                option,
            });
        }
        let question_id = question.id;
        debug!(session_id = %self.id, question = %question_id, option = %option, "Option selected");
        self.answers.record(question_id, option);
        Ok(())
    }

    /// Move past the current question. Requires an answer for it.
    pub fn advance(&mut self) -> Result<FlowPhase, FlowError> {
        let question_id = self.answering_question()?.id;
        if !self.answers.is_answered(question_id) {
            return Err(FlowError::AnswerRequired);
        }
        let total = self.questions.as_ref().map_or(0, QuestionSet::len);
        let next = self
            .phase
            .next(total)
            .ok_or(FlowError::QuestionsNotLoaded)?;
        debug_assert!(self.phase.can_transition_to(next, total));

        self.phase = next;
        if next.is_terminal() {
            info!(
                session_id = %self.id,
                style = %self.engine.recommend(&self.answers).style,
                "Questionnaire complete"
            );
        } else {
            debug!(session_id = %self.id, phase = ?next, "Advanced");
        }
        Ok(next)
    }

    /// Clear all answers and go back to the first question.
    pub fn restart(&mut self) -> Result<(), FlowError> {
        match self.phase {
            FlowPhase::Complete | FlowPhase::Answering { .. } => {
                self.answers.clear();
                self.phase = FlowPhase::Answering { step: 0 };
                info!(session_id = %self.id, "Questionnaire restarted");
                Ok(())
            }
            FlowPhase::LoggedOut => Err(FlowError::NotLoggedIn),
            FlowPhase::Loading => Err(FlowError::CannotRestart),
        }
    }

    /// The recommendation for the completed answer set.
    pub fn recommendation(&self) -> Result<&Recommendation, FlowError> {
        if !self.is_complete() {
            return Err(FlowError::NotComplete);
        }
        Ok(self.engine.recommend(&self.answers))
    }

    /// Snapshot of everything a presentation layer needs to draw.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            session_id: self.id,
            phase: self.phase,
            progress: self.progress(),
            question: self.current_question(),
            selected: self.selected(),
            result: self.recommendation().ok(),
            load_error: self.load_error(),
        }
    }

    /// The current question, or the reason there is none to answer.
    fn answering_question(&self) -> Result<&Question, FlowError> {
        match self.phase {
            FlowPhase::LoggedOut => Err(FlowError::NotLoggedIn),
            FlowPhase::Loading => Err(FlowError::QuestionsNotLoaded),
            FlowPhase::Complete => Err(FlowError::AlreadyComplete),
            FlowPhase::Answering { .. } => self
                .current_question()
                .ok_or(FlowError::QuestionsNotLoaded),
        }
    }
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView<'a> {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub phase: FlowPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<&'a Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<&'a OptionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<&'a str>,
}
