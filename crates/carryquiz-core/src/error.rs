//! Error types for configuration checks and session transitions.
//!
//! Generation and scoring never fail; these errors only come from invalid
//! settings or from asking a [`Session`](crate::session::Session) to do
//! something its current phase does not allow.

use thiserror::Error;

use crate::session::Phase;

/// Reasons a [`Configuration`](crate::model::Configuration) is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max digits must be at least 1")]
    ZeroDigits,

    #[error("max digits {requested} exceeds the supported maximum of {max}")]
    TooManyDigits { requested: u32, max: u32 },

    #[error("number of problems must be at least 1")]
    NoProblems,
}

/// Errors raised by the session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The requested action is not allowed in the current phase.
    #[error("cannot {action} while {phase}")]
    InvalidTransition { phase: Phase, action: &'static str },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// No problem with this id in the current batch.
    #[error("no problem with id {0} in the current batch")]
    UnknownProblem(usize),

    /// A blank answer was submitted during practice.
    #[error("answer is empty")]
    EmptyAnswer,
}

impl SessionError {
    /// Returns `true` if the action was refused only because of the current
    /// phase, not because of its arguments.
    pub fn is_phase_error(&self) -> bool {
        matches!(self, SessionError::InvalidTransition { .. })
    }
}
