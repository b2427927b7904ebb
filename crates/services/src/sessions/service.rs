use chrono::{DateTime, Utc};
use rand::rng;
use rand::seq::SliceRandom;
use std::fmt;

use geotutor_core::Clock;
use geotutor_core::model::{AttemptState, MAX_ATTEMPTS, ModuleId, Question, SessionSummary};
use geotutor_core::policy::Feedback;
use geotutor_core::score::ScoreBoard;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SUBMIT OUTCOME ────────────────────────────────────────────────────────────
//

/// What the learner sees after one well-formed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Right answer; the question is settled and priced by its attempt.
    Correct {
        points: u32,
        attempt_number: u32,
        feedback: Feedback,
    },
    /// Wrong answer with attempts still left.
    TryAgain { attempts_left: u32 },
    /// Wrong answer on the last attempt; the correct answer is revealed.
    Exhausted { correct_answer: String },
}

//
// ─── MODULE SESSION ────────────────────────────────────────────────────────────
//

/// In-memory sitting of one question-bank module.
///
/// The bank is filtered down to questions the board has not settled, so a
/// resumed module picks up where the learner left off. Questions are then
/// stepped through sequentially; every submission is scored through the
/// board, and the session advances when a question settles.
pub struct ModuleSession {
    module: ModuleId,
    questions: Vec<Question>,
    current: usize,
    correct: u32,
    exhausted: u32,
    points_earned: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    clock: Clock,
}

impl ModuleSession {
    /// Starts a sitting over the unanswered questions of `module`.
    ///
    /// `shuffle` randomizes question order; turn it off for deterministic
    /// walkthroughs.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when every question in the bank is
    /// already settled on the board.
    pub fn start(
        module: ModuleId,
        bank: Vec<Question>,
        board: &ScoreBoard,
        shuffle: bool,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let mut questions: Vec<Question> = bank
            .into_iter()
            .filter(|question| !board.is_answered(module, question.id()))
            .collect();

        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        if shuffle {
            let mut rng = rng();
            questions.as_mut_slice().shuffle(&mut rng);
        }

        Ok(Self {
            module,
            questions,
            current: 0,
            correct: 0,
            exhausted: 0,
            points_earned: 0,
            started_at: clock.now(),
            completed_at: None,
            clock,
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
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Points earned during this sitting alone.
    #[must_use]
    pub fn points_earned(&self) -> u32 {
        self.points_earned
    }

    /// Total number of questions in this sitting.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions settled so far.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.current.min(self.questions.len())
    }

    /// Number of questions still open.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.current)
    }

    /// Returns a summary of the current sitting progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Scores one raw answer against the current question.
    ///
    /// Malformed input is rejected before any state moves, so it never
    /// consumes an attempt. A settling outcome advances the sitting to the
    /// next question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when no question is open, and
    /// `SessionError::Malformed` for input the question cannot read.
    pub fn submit(
        &mut self,
        board: &mut ScoreBoard,
        raw: &str,
    ) -> Result<SubmitOutcome, SessionError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::Completed);
        };

        let is_correct = question.rule().check(raw)?;
        let record =
            board.record_attempt(self.module, question.id(), question.tier(), is_correct)?;

        match record.state {
            AttemptState::Correct => {
                self.correct += 1;
                self.points_earned += record.points;
                self.advance();
                Ok(SubmitOutcome::Correct {
                    points: record.points,
                    attempt_number: record.attempt_number,
                    feedback: record.feedback,
                })
            }
            AttemptState::Exhausted => {
                let correct_answer = question.rule().expected_display();
                self.exhausted += 1;
                self.advance();
                Ok(SubmitOutcome::Exhausted { correct_answer })
            }
            AttemptState::Unanswered => Ok(SubmitOutcome::TryAgain {
                attempts_left: MAX_ATTEMPTS.saturating_sub(record.attempt_number),
            }),
        }
    }

    fn advance(&mut self) {
        self.current += 1;
        if self.current >= self.questions.len() {
            self.completed_at = Some(self.clock.now());
        }
    }

    /// Summary of this sitting, whether or not it ran to completion.
    ///
    /// # Errors
    ///
    /// Propagates `SummaryError` when the counters are inconsistent.
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let ended_at = self.completed_at.unwrap_or_else(|| self.clock.now());
        Ok(SessionSummary::new(
            self.module,
            self.started_at,
            ended_at,
            self.correct + self.exhausted,
            self.correct,
            self.exhausted,
            self.points_earned,
        )?)
    }
}

impl fmt::Debug for ModuleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleSession")
            .field("module", &self.module)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("correct", &self.correct)
            .field("exhausted", &self.exhausted)
            .field("points_earned", &self.points_earned)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
