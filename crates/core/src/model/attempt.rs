use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur while recording attempts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttemptError {
    #[error("question is already resolved and accepts no further answers")]
    AlreadyResolved,
}

//
// ─── ATTEMPT STATE ────────────────────────────────────────────────────────────
//

/// Number of well-formed answers a learner may submit per question.
pub const MAX_ATTEMPTS: u32 = 3;

/// Lifecycle status of a single question.
///
/// A question starts `Unanswered` and moves exactly once into one of the
/// two terminal states. Both terminal states count toward module progress;
/// only `Correct` can carry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Still open; attempts remain.
    Unanswered,
    /// Answered correctly within the attempt budget.
    Correct,
    /// The attempt budget is spent without a correct answer.
    Exhausted,
}

impl AttemptState {
    /// True once the question no longer accepts submissions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, AttemptState::Unanswered)
    }
}

//
// ─── QUESTION ATTEMPT ─────────────────────────────────────────────────────────
//

/// Attempt ledger for one question.
///
/// Counts well-formed submissions and settles into a terminal state when
/// the answer is correct or the budget of [`MAX_ATTEMPTS`] is spent. The
/// transition is one-way: once terminal, further submissions are rejected
/// without touching the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionAttempt {
    attempts: u32,
    state: AttemptState,
}

impl Default for QuestionAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionAttempt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: 0,
            state: AttemptState::Unanswered,
        }
    }

    /// Well-formed submissions consumed so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn state(&self) -> AttemptState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Counts one well-formed submission and settles the question when it
    /// is correct or the last attempt is spent.
    ///
    /// Returns the attempt number this submission consumed, starting at 1.
    ///
    /// # Errors
    ///
    /// Returns [`AttemptError::AlreadyResolved`] when the question is
    /// terminal; the ledger is left unchanged.
    pub fn record(&mut self, is_correct: bool) -> Result<u32, AttemptError> {
        if self.is_terminal() {
            return Err(AttemptError::AlreadyResolved);
        }
        self.attempts += 1;
        if is_correct {
            self.state = AttemptState::Correct;
        } else if self.attempts >= MAX_ATTEMPTS {
            self.state = AttemptState::Exhausted;
        }
        Ok(self.attempts)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_settles_immediately() {
        let mut attempt = QuestionAttempt::new();
        assert_eq!(attempt.record(true), Ok(1));
        assert_eq!(attempt.state(), AttemptState::Correct);
        assert!(attempt.is_terminal());
    }

    #[test]
    fn wrong_answers_exhaust_after_the_budget() {
        let mut attempt = QuestionAttempt::new();
        assert_eq!(attempt.record(false), Ok(1));
        assert_eq!(attempt.state(), AttemptState::Unanswered);
        assert_eq!(attempt.record(false), Ok(2));
        assert_eq!(attempt.state(), AttemptState::Unanswered);
        assert_eq!(attempt.record(false), Ok(3));
        assert_eq!(attempt.state(), AttemptState::Exhausted);
    }

    #[test]
    fn correct_on_last_attempt_wins_over_exhaustion() {
        let mut attempt = QuestionAttempt::new();
        attempt.record(false).unwrap();
        attempt.record(false).unwrap();
        assert_eq!(attempt.record(true), Ok(3));
        assert_eq!(attempt.state(), AttemptState::Correct);
    }

    #[test]
    fn terminal_states_reject_further_submissions() {
        let mut solved = QuestionAttempt::new();
        solved.record(true).unwrap();
        assert_eq!(solved.record(true), Err(AttemptError::AlreadyResolved));
        assert_eq!(solved.attempts(), 1);

        let mut spent = QuestionAttempt::new();
        for _ in 0..3 {
            spent.record(false).unwrap();
        }
        assert_eq!(spent.record(false), Err(AttemptError::AlreadyResolved));
        assert_eq!(spent.attempts(), 3);
    }
}
