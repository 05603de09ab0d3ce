//! Tune Quiz: music style questionnaire core.

pub mod config;
pub mod error;
pub mod questions;
pub mod recommend;
pub mod session;
pub mod terminal;
