use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::model::{
    AnsweredSet, AttemptError, AttemptState, ModuleId, QuestionAttempt, QuestionId, Tier,
};
use crate::policy::{self, Feedback};
use crate::progress::ProgressLedger;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("module {0} is not registered on this board")]
    UnknownModule(ModuleId),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}

//
// ─── ATTEMPT RECORD ────────────────────────────────────────────────────────────
//

/// Outcome of one scored submission.
///
/// `points` is non-zero only when the submission was correct; `state` tells
/// the caller whether the question is now settled and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    pub points: u32,
    pub attempt_number: u32,
    pub state: AttemptState,
    pub feedback: Feedback,
}

impl AttemptRecord {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

//
// ─── MODULE PROGRESS ───────────────────────────────────────────────────────────
//

/// Answered-versus-total view of one module, for its progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleProgress {
    pub answered: u32,
    pub total: u32,
}

impl ModuleProgress {
    /// Whole-number percentage; a module with no questions reads 0.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = u64::from(self.answered) * 100 / u64::from(self.total);
        percent.min(100) as u8
    }
}

//
// ─── SCORE BOARD ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default)]
struct ModuleRecord {
    total_questions: u32,
    score: u32,
    answered: AnsweredSet,
    open: HashMap<QuestionId, QuestionAttempt>,
}

/// Session-wide scoring state: the single entry point every module goes
/// through to turn answers into points and progress.
///
/// A board is built from a registry of modules and their question totals.
/// Each submission runs the same path: the answered set rejects questions
/// that are already settled, the per-question attempt ledger counts the
/// submission, the point schedule prices it, and module completion rolls
/// into the weighted progress ledger when the last question resolves.
///
/// # Examples
///
/// ```
/// use geotutor_core::model::{ModuleId, QuestionId, Tier};
/// use geotutor_core::score::ScoreBoard;
///
/// let mut board = ScoreBoard::new([(ModuleId::AreaCalc, 4)]);
/// let record = board.record_attempt(
///     ModuleId::AreaCalc,
///     &QuestionId::new("triangle"),
///     Tier::Basic,
///     true,
/// )?;
///
/// assert_eq!(record.points, 3);
/// assert_eq!(board.total_score(), 3);
/// # Ok::<(), geotutor_core::score::RecordError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    modules: BTreeMap<ModuleId, ModuleRecord>,
    total_score: u32,
    ledger: ProgressLedger,
}

impl ScoreBoard {
    /// Builds a board for the given modules and their question totals.
    #[must_use]
    pub fn new(registry: impl IntoIterator<Item = (ModuleId, u32)>) -> Self {
        let modules = registry
            .into_iter()
            .map(|(module, total_questions)| {
                (
                    module,
                    ModuleRecord {
                        total_questions,
                        ..ModuleRecord::default()
                    },
                )
            })
            .collect();

        Self {
            modules,
            total_score: 0,
            ledger: ProgressLedger::new(),
        }
    }

    /// Scores one well-formed submission.
    ///
    /// A correct answer settles the question and awards points for the
    /// attempt it was made on; a wrong answer consumes an attempt and, once
    /// the budget is spent, settles the question as exhausted for zero
    /// points. Either way a settled question joins the answered set, and a
    /// module whose last question settles completes its progress part.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownModule`] when `module` is not in the
    /// registry, and [`AttemptError::AlreadyResolved`] when the question is
    /// already settled. Neither case consumes an attempt or moves a score.
    pub fn record_attempt(
        &mut self,
        module: ModuleId,
        question_id: &QuestionId,
        tier: Tier,
        is_correct: bool,
    ) -> Result<AttemptRecord, RecordError> {
        let record = self
            .modules
            .get_mut(&module)
            .ok_or(RecordError::UnknownModule(module))?;

        if record.answered.is_answered(question_id) {
            return Err(AttemptError::AlreadyResolved.into());
        }

        let attempt = record.open.entry(question_id.clone()).or_default();
        let attempt_number = attempt.record(is_correct)?;
        let state = attempt.state();
        let points = if is_correct {
            policy::score_for(tier, attempt_number)
        } else {
            0
        };

        if state.is_terminal() {
            record.open.remove(question_id);
            record.answered.mark_answered(question_id.clone());
            record.score += points;
            self.total_score += points;
            if record.answered.progress_count() >= record.total_questions {
                self.ledger.complete(module);
            }
        }

        Ok(AttemptRecord {
            points,
            attempt_number,
            state,
            feedback: Feedback::for_points(points),
        })
    }

    /// Marks a module's progress part complete directly.
    ///
    /// Modules normally complete themselves when their last question
    /// settles; this is for flows that decide completion on their own
    /// terms. Returns `true` on first completion, `false` thereafter.
    pub fn complete_module(&mut self, module: ModuleId) -> bool {
        self.ledger.complete(module)
    }

    /// True when `question_id` is settled within `module`, used to filter
    /// resumed modules down to what is still open.
    #[must_use]
    pub fn is_answered(&self, module: ModuleId, question_id: &QuestionId) -> bool {
        self.modules
            .get(&module)
            .is_some_and(|record| record.answered.is_answered(question_id))
    }

    /// Points earned across every module.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Points earned within one module; unregistered modules read 0.
    #[must_use]
    pub fn module_score(&self, module: ModuleId) -> u32 {
        self.modules.get(&module).map_or(0, |record| record.score)
    }

    /// Settled-question count against the registry total.
    #[must_use]
    pub fn module_progress(&self, module: ModuleId) -> ModuleProgress {
        self.modules.get(&module).map_or(
            ModuleProgress {
                answered: 0,
                total: 0,
            },
            |record| ModuleProgress {
                answered: record.answered.progress_count(),
                total: record.total_questions,
            },
        )
    }

    #[must_use]
    pub fn is_module_completed(&self, module: ModuleId) -> bool {
        self.ledger.is_complete(module)
    }

    /// Weighted whole-session percentage, `0..=100`.
    #[must_use]
    pub fn global_percent(&self) -> u8 {
        self.ledger.percent()
    }

    /// Clears every score, answered set, open attempt and completion while
    /// keeping the registry, returning the board to a fresh session.
    pub fn reset(&mut self) {
        for record in self.modules.values_mut() {
            record.score = 0;
            record.answered.clear();
            record.open.clear();
        }
        self.total_score = 0;
        self.ledger.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_board() -> ScoreBoard {
        ScoreBoard::new([(ModuleId::Shape2D, 2), (ModuleId::SectorArc, 2)])
    }

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id)
    }

    #[test]
    fn first_try_basic_awards_three_points() {
        let mut board = build_board();
        let record = board
            .record_attempt(ModuleId::Shape2D, &qid("circle"), Tier::Basic, true)
            .unwrap();

        assert_eq!(record.points, 3);
        assert_eq!(record.attempt_number, 1);
        assert_eq!(record.state, AttemptState::Correct);
        assert_eq!(record.feedback, Feedback::GreatJob);
        assert_eq!(board.total_score(), 3);
        assert_eq!(board.module_score(ModuleId::Shape2D), 3);
    }

    #[test]
    fn advanced_recovery_prices_the_attempt_it_lands_on() {
        let mut board = build_board();
        let miss = board
            .record_attempt(ModuleId::SectorArc, &qid("sector-1"), Tier::Advanced, false)
            .unwrap();
        assert_eq!(miss.points, 0);
        assert_eq!(miss.attempt_number, 1);
        assert_eq!(miss.state, AttemptState::Unanswered);
        assert_eq!(miss.feedback, Feedback::KeepPracticing);

        let hit = board
            .record_attempt(ModuleId::SectorArc, &qid("sector-1"), Tier::Advanced, true)
            .unwrap();
        assert_eq!(hit.points, 4);
        assert_eq!(hit.attempt_number, 2);
        assert!(hit.is_terminal());
        assert_eq!(board.total_score(), 4);
    }

    #[test]
    fn exhaustion_scores_zero_but_still_progresses() {
        let mut board = build_board();
        for _ in 0..2 {
            let open = board
                .record_attempt(ModuleId::Shape2D, &qid("kite"), Tier::Basic, false)
                .unwrap();
            assert!(!open.is_terminal());
        }
        let last = board
            .record_attempt(ModuleId::Shape2D, &qid("kite"), Tier::Basic, false)
            .unwrap();

        assert_eq!(last.state, AttemptState::Exhausted);
        assert_eq!(last.points, 0);
        assert_eq!(last.feedback, Feedback::KeepPracticing);
        assert_eq!(board.total_score(), 0);
        assert_eq!(
            board.module_progress(ModuleId::Shape2D),
            ModuleProgress {
                answered: 1,
                total: 2
            }
        );
    }

    #[test]
    fn settled_questions_reject_rescoring() {
        let mut board = build_board();
        board
            .record_attempt(ModuleId::Shape2D, &qid("oval"), Tier::Basic, true)
            .unwrap();

        let err = board
            .record_attempt(ModuleId::Shape2D, &qid("oval"), Tier::Basic, true)
            .unwrap_err();
        assert_eq!(err, RecordError::Attempt(AttemptError::AlreadyResolved));
        assert_eq!(board.total_score(), 3);
        assert_eq!(board.module_progress(ModuleId::Shape2D).answered, 1);
    }

    #[test]
    fn unknown_module_is_rejected_without_side_effects() {
        let mut board = build_board();
        let err = board
            .record_attempt(ModuleId::AreaCalc, &qid("triangle"), Tier::Basic, true)
            .unwrap_err();
        assert_eq!(err, RecordError::UnknownModule(ModuleId::AreaCalc));
        assert_eq!(board.total_score(), 0);
        assert_eq!(board.global_percent(), 0);
    }

    #[test]
    fn settling_the_last_question_completes_the_module() {
        let mut board = build_board();
        board
            .record_attempt(ModuleId::Shape2D, &qid("circle"), Tier::Basic, true)
            .unwrap();
        assert!(!board.is_module_completed(ModuleId::Shape2D));
        assert_eq!(board.global_percent(), 0);

        board
            .record_attempt(ModuleId::Shape2D, &qid("square"), Tier::Basic, true)
            .unwrap();
        assert!(board.is_module_completed(ModuleId::Shape2D));
        assert_eq!(board.global_percent(), 8);
    }

    #[test]
    fn manual_completion_is_idempotent() {
        let mut board = build_board();
        assert!(board.complete_module(ModuleId::SectorArc));
        assert!(!board.complete_module(ModuleId::SectorArc));
        assert_eq!(board.global_percent(), 17);
    }

    #[test]
    fn an_exhausted_question_cannot_be_retried_for_points() {
        let mut board = build_board();
        for _ in 0..3 {
            board
                .record_attempt(ModuleId::SectorArc, &qid("sector-2"), Tier::Advanced, false)
                .unwrap();
        }
        let err = board
            .record_attempt(ModuleId::SectorArc, &qid("sector-2"), Tier::Advanced, true)
            .unwrap_err();
        assert_eq!(err, RecordError::Attempt(AttemptError::AlreadyResolved));
        assert_eq!(board.total_score(), 0);
    }

    #[test]
    fn module_progress_percent_truncates() {
        let mut board = ScoreBoard::new([(ModuleId::Shape2D, 11)]);
        board
            .record_attempt(ModuleId::Shape2D, &qid("circle"), Tier::Basic, true)
            .unwrap();
        assert_eq!(board.module_progress(ModuleId::Shape2D).percent(), 9);
        assert_eq!(ModuleProgress { answered: 0, total: 0 }.percent(), 0);
    }

    #[test]
    fn reset_returns_the_board_to_a_fresh_session() {
        let mut board = build_board();
        board
            .record_attempt(ModuleId::Shape2D, &qid("circle"), Tier::Basic, true)
            .unwrap();
        board
            .record_attempt(ModuleId::Shape2D, &qid("square"), Tier::Basic, true)
            .unwrap();
        board.complete_module(ModuleId::SectorArc);

        board.reset();

        assert_eq!(board.total_score(), 0);
        assert_eq!(board.module_score(ModuleId::Shape2D), 0);
        assert_eq!(board.global_percent(), 0);
        assert!(!board.is_module_completed(ModuleId::Shape2D));
        assert!(!board.is_module_completed(ModuleId::SectorArc));
        assert!(!board.is_answered(ModuleId::Shape2D, &qid("circle")));

        let again = board
            .record_attempt(ModuleId::Shape2D, &qid("circle"), Tier::Basic, true)
            .unwrap();
        assert_eq!(again.points, 3);
    }
}
