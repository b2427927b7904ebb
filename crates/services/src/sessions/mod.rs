mod angle;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use angle::AngleSession;
pub use progress::SessionProgress;
pub use service::{ModuleSession, SubmitOutcome};
pub use workflow::SessionRunner;
