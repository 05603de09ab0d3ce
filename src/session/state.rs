//! Questionnaire state machine: tracks where the session is.

use serde::{Deserialize, Serialize};

/// The phases of a questionnaire session.
///
/// Progresses linearly: LoggedOut → Loading → Answering(0) → … →
/// Answering(n-1) → Complete. Restart goes back to Answering(0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FlowPhase {
    LoggedOut,
    Loading,
    Answering { step: usize },
    Complete,
}

impl FlowPhase {
    /// Check if a transition from `self` to `target` is valid for a
    /// questionnaire of `question_count` questions.
    pub fn can_transition_to(&self, target: FlowPhase, question_count: usize) -> bool {
        use FlowPhase::*;
        match (*self, target) {
            (LoggedOut, Loading) => true,
            (LoggedOut | Loading, Answering { step: 0 }) => question_count > 0,
            (Answering { step: from }, Answering { step: to }) => {
                (to == from + 1 && to < question_count) || to == 0
            }
            (Answering { step }, Complete) => step + 1 == question_count,
            (Complete, Answering { step: 0 }) => true,
            (Loading | Answering { .. } | Complete, LoggedOut) => true,
            _ => false,
        }
    }

    /// Whether the questionnaire is finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The phase reached by advancing past the current question.
    pub fn next(&self, question_count: usize) -> Option<FlowPhase> {
        match *self {
            Self::Answering { step } if step + 1 < question_count => {
                Some(Self::Answering { step: step + 1 })
            }
            Self::Answering { step } if step + 1 == question_count => Some(Self::Complete),
            _ => None,
        }
    }

    /// The current step index while answering.
    pub fn step(&self) -> Option<usize> {
        match *self {
            Self::Answering { step } => Some(step),
            _ => None,
        }
    }
}

impl Default for FlowPhase {
    fn default() -> Self {
        Self::LoggedOut
    }
}

impl std::fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::LoggedOut => "logged_out",
            Self::Loading => "loading",
            Self::Answering { .. } => "answering",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Position within the questionnaire. Derived from the step, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 0-based step index.
    pub step: usize,
    /// Total number of questions.
    pub total: usize,
}

impl Progress {
    pub fn new(step: usize, total: usize) -> Self {
        Self { step, total }
    }

    /// 1-based position of the current question.
    pub fn position(&self) -> usize {
        self.step + 1
    }

    /// `round(100 * (step + 1) / total)`, rounding halves up.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (200 * self.position() + self.total) / (2 * self.total);
        pct.min(100) as u8
    }

    pub fn is_last(&self) -> bool {
        self.position() == self.total
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({}%)", self.position(), self.total, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use FlowPhase::*;
        let n = 3;
        let transitions = [
            (LoggedOut, Loading),
            (LoggedOut, Answering { step: 0 }),
            (Loading, Answering { step: 0 }),
            (Answering { step: 0 }, Answering { step: 1 }),
            (Answering { step: 1 }, Answering { step: 2 }),
            (Answering { step: 2 }, Complete),
            (Complete, Answering { step: 0 }),
            (Answering { step: 1 }, Answering { step: 0 }),
            (Complete, LoggedOut),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to, n),
                "{from:?} should transition to {to:?}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use FlowPhase::*;
        let n = 3;
        // Skip steps
        assert!(!Answering { step: 0 }.can_transition_to(Answering { step: 2 }, n));
        // Complete too early
        assert!(!Answering { step: 1 }.can_transition_to(Complete, n));
        // Past the end
        assert!(!Answering { step: 2 }.can_transition_to(Answering { step: 3 }, n));
        // Loading straight to complete
        assert!(!Loading.can_transition_to(Complete, n));
        // Logout is not a transition out of LoggedOut
        assert!(!LoggedOut.can_transition_to(LoggedOut, n));
        // Empty questionnaire never starts
        assert!(!Loading.can_transition_to(Answering { step: 0 }, 0));
    }

    #[test]
    fn next_walks_all_steps() {
        let n = 5;
        let mut current = FlowPhase::Answering { step: 0 };
        for expected in 1..n {
            current = current.next(n).unwrap();
            assert_eq!(current, FlowPhase::Answering { step: expected });
        }
        let done = current.next(n).unwrap();
        assert_eq!(done, FlowPhase::Complete);
        assert!(done.is_terminal());
        assert!(done.next(n).is_none());
        assert!(FlowPhase::Loading.next(n).is_none());
    }

    #[test]
    fn display_matches_serde_tag() {
        use FlowPhase::*;
        for phase in [LoggedOut, Loading, Answering { step: 2 }, Complete] {
            let json = serde_json::to_value(phase).unwrap();
            assert_eq!(json["phase"], phase.to_string(), "mismatch for {phase:?}");
        }
        let json = serde_json::to_value(Answering { step: 2 }).unwrap();
        assert_eq!(json["step"], 2);
    }

    #[test]
    fn progress_percent_rounds() {
        assert_eq!(Progress::new(2, 5).percent(), 60);
        assert_eq!(Progress::new(0, 5).percent(), 20);
        assert_eq!(Progress::new(4, 5).percent(), 100);
        assert_eq!(Progress::new(0, 3).percent(), 33);
        assert_eq!(Progress::new(1, 3).percent(), 67);
        // 12.5 rounds up
        assert_eq!(Progress::new(0, 8).percent(), 13);
    }

    #[test]
    fn progress_display_and_last() {
        let p = Progress::new(2, 5);
        assert_eq!(p.to_string(), "3/5 (60%)");
        assert!(!p.is_last());
        assert!(Progress::new(4, 5).is_last());
    }

    #[test]
    fn default_phase_is_logged_out() {
        assert_eq!(FlowPhase::default(), FlowPhase::LoggedOut);
        assert_eq!(FlowPhase::Answering { step: 4 }.step(), Some(4));
        assert_eq!(FlowPhase::Complete.step(), None);
    }
}
