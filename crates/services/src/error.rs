//! Shared error types for the services crate.

use thiserror::Error;

use geotutor_core::model::{AnswerParseError, ModuleId, SummaryError};
use geotutor_core::score::RecordError;

/// Errors for learner-supplied angles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AngleInputError {
    #[error("angle must be between 0 and 360 degrees, got {0}")]
    OutOfRange(i32),
    #[error("angle must be a multiple of 10, got {0}")]
    NotAStepOfTen(i32),
}

/// Errors emitted by module sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no unanswered questions available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("module {0} builds its questions from learner input")]
    Interactive(ModuleId),
    #[error("no angle has been posed yet")]
    NoAnglePosed,
    #[error("the {0} angle type is already identified")]
    AlreadyIdentified(String),
    #[error(transparent)]
    Angle(#[from] AngleInputError),
    #[error(transparent)]
    Malformed(#[from] AnswerParseError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
