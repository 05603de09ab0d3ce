//! Questionnaire session: login, answers, and the step state machine.
//!
//! A `FlowController` owns one session: it moves from `LoggedOut` through
//! `Loading` into `Answering(step)` and finally `Complete`, gating every
//! advance on an answer for the current question. The recommendation is
//! computed from the answer set once the last question is passed.

pub mod answers;
pub mod controller;
pub mod login;
pub mod state;

pub use answers::AnswerSet;
pub use controller::{FlowController, SessionView};
pub use login::{Credentials, User, login};
pub use state::{FlowPhase, Progress};
