mod answered;
mod attempt;
mod ids;
mod question;
mod summary;

pub use answered::AnsweredSet;
pub use attempt::{AttemptError, AttemptState, MAX_ATTEMPTS, QuestionAttempt};
pub use ids::{ModuleId, ParseModuleIdError, QuestionId};

pub use question::{AnswerParseError, AnswerRule, NUMERIC_TOLERANCE, Question, Tier};
pub use summary::{SessionSummary, SummaryError};
