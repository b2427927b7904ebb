#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod policy;
pub mod progress;
pub mod score;
pub mod time;

pub use error::Error;
pub use time::Clock;

pub use model::{
    AnswerParseError, AnswerRule, AnsweredSet, AttemptError, AttemptState, MAX_ATTEMPTS, ModuleId,
    Question, QuestionId, SessionSummary, Tier,
};
pub use policy::Feedback;
pub use progress::ProgressLedger;
pub use score::{AttemptRecord, ModuleProgress, RecordError, ScoreBoard};
