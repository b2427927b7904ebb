#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod sessions;

pub use geotutor_core::Clock;

pub use error::{AngleInputError, SessionError};

pub use sessions::{AngleSession, ModuleSession, SessionProgress, SessionRunner, SubmitOutcome};
