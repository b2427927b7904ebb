use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ModuleId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("ended_at is before started_at")]
    InvalidTimeRange,

    #[error("questions seen ({seen}) does not match outcome counts ({sum})")]
    CountMismatch { seen: u32, sum: u32 },
}

/// Aggregate summary for one sitting of a module.
///
/// A sitting may end before the module is done; `questions_seen` counts only
/// the questions resolved during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    module: ModuleId,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    questions_seen: u32,
    correct: u32,
    exhausted: u32,
    points_earned: u32,
}

impl SessionSummary {
    /// Builds a summary from sitting counters.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `ended_at` is before
    /// `started_at`, and `SummaryError::CountMismatch` if the outcome
    /// counts do not add up to `questions_seen`.
    pub fn new(
        module: ModuleId,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        questions_seen: u32,
        correct: u32,
        exhausted: u32,
        points_earned: u32,
    ) -> Result<Self, SummaryError> {
        if ended_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        let sum = correct.saturating_add(exhausted);
        if sum != questions_seen {
            return Err(SummaryError::CountMismatch {
                seen: questions_seen,
                sum,
            });
        }

        Ok(Self {
            module,
            started_at,
            ended_at,
            questions_seen,
            correct,
            exhausted,
            points_earned,
        })
    }

    #[must_use]
    pub fn module(&self) -> ModuleId {
        self.module
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    #[must_use]
    pub fn questions_seen(&self) -> u32 {
        self.questions_seen
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn exhausted(&self) -> u32 {
        self.exhausted
    }

    #[must_use]
    pub fn points_earned(&self) -> u32 {
        self.points_earned
    }
}
