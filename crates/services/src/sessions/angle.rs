use chrono::{DateTime, Utc};
use std::fmt;

use geotutor_core::Clock;
use geotutor_core::model::{
    AttemptState, MAX_ATTEMPTS, ModuleId, Question, QuestionId, SessionSummary,
};
use geotutor_core::score::ScoreBoard;

use super::progress::SessionProgress;
use super::service::SubmitOutcome;
use crate::catalog::{self, ANGLE_TYPES};
use crate::error::SessionError;

/// Interactive sitting of the angle module.
///
/// Questions are not drawn from a bank: the learner picks an angle in
/// degrees and the session poses the matching type-identification
/// question. Each of the four types is one question, so angles sharing a
/// type continue the same attempt budget, and a settled type cannot be
/// replayed for more credit. The module completes when all four types are
/// settled.
pub struct AngleSession {
    current: Option<Question>,
    correct: u32,
    exhausted: u32,
    points_earned: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    clock: Clock,
}

impl AngleSession {
    /// Starts an angle sitting against the board.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when every angle type is already
    /// settled.
    pub fn start(board: &ScoreBoard, clock: Clock) -> Result<Self, SessionError> {
        let progress = board.module_progress(ModuleId::AngleType);
        if progress.answered >= progress.total {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            current: None,
            correct: 0,
            exhausted: 0,
            points_earned: 0,
            started_at: clock.now(),
            completed_at: None,
            clock,
        })
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

    /// The question currently posed, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Angle types the board has not settled yet.
    #[must_use]
    pub fn remaining_types(&self, board: &ScoreBoard) -> Vec<&'static str> {
        ANGLE_TYPES
            .iter()
            .copied()
            .filter(|name| !board.is_answered(ModuleId::AngleType, &QuestionId::new(*name)))
            .collect()
    }

    /// Sitting progress, measured against the board's four types.
    #[must_use]
    pub fn progress(&self, board: &ScoreBoard) -> SessionProgress {
        let module = board.module_progress(ModuleId::AngleType);
        let total = module.total as usize;
        let answered = module.answered as usize;
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: answered >= total,
        }
    }

    /// Poses the identification question for a learner-chosen angle.
    ///
    /// A freshly posed angle replaces any question still open; nothing on
    /// the board moves until an answer is submitted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Angle` for an angle outside `0..=360` or off
    /// the 10 degree step, `SessionError::AlreadyIdentified` when the
    /// angle's type is settled, and `SessionError::Completed` when the
    /// sitting is over.
    pub fn pose(&mut self, board: &ScoreBoard, degrees: i32) -> Result<&Question, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }

        let question = catalog::angle_question(degrees)?;
        if board.is_answered(ModuleId::AngleType, question.id()) {
            return Err(SessionError::AlreadyIdentified(question.id().to_string()));
        }

        Ok(self.current.insert(question))
    }

    /// Scores one raw answer against the posed question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoAnglePosed` when nothing is posed, and
    /// `SessionError::Malformed` for input the question cannot read;
    /// neither consumes an attempt.
    pub fn submit(
        &mut self,
        board: &mut ScoreBoard,
        raw: &str,
    ) -> Result<SubmitOutcome, SessionError> {
        let Some(question) = self.current.as_ref() else {
            return Err(SessionError::NoAnglePosed);
        };

        let is_correct = question.rule().check(raw)?;
        let record = board.record_attempt(
            ModuleId::AngleType,
            question.id(),
            question.tier(),
            is_correct,
        )?;

        match record.state {
            AttemptState::Correct => {
                self.correct += 1;
                self.points_earned += record.points;
                self.settle(board);
                Ok(SubmitOutcome::Correct {
                    points: record.points,
                    attempt_number: record.attempt_number,
                    feedback: record.feedback,
                })
            }
            AttemptState::Exhausted => {
                let correct_answer = question.rule().expected_display();
                self.exhausted += 1;
                self.settle(board);
                Ok(SubmitOutcome::Exhausted { correct_answer })
            }
            AttemptState::Unanswered => Ok(SubmitOutcome::TryAgain {
                attempts_left: MAX_ATTEMPTS.saturating_sub(record.attempt_number),
            }),
        }
    }

    fn settle(&mut self, board: &ScoreBoard) {
        self.current = None;
        if board.is_module_completed(ModuleId::AngleType) {
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
            ModuleId::AngleType,
            self.started_at,
            ended_at,
            self.correct + self.exhausted,
            self.correct,
            self.exhausted,
            self.points_earned,
        )?)
    }
}

impl fmt::Debug for AngleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AngleSession")
            .field("current", &self.current.as_ref().map(Question::id))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AngleInputError;
    use geotutor_core::policy::Feedback;
    use geotutor_core::time::fixed_clock;

    fn build_board() -> ScoreBoard {
        ScoreBoard::new([(ModuleId::AngleType, 4)])
    }

    #[test]
    fn posed_angle_matches_its_type() {
        let board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        let question = session.pose(&board, 120).unwrap();
        assert_eq!(question.id().as_str(), "obtuse");
        assert!(session.current_question().is_some());
    }

    #[test]
    fn invalid_angles_are_rejected_before_posing() {
        let board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        let err = session.pose(&board, 365).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Angle(AngleInputError::OutOfRange(365))
        ));
        let err = session.pose(&board, 35).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Angle(AngleInputError::NotAStepOfTen(35))
        ));
        assert!(session.current_question().is_none());
    }

    #[test]
    fn submitting_without_a_posed_angle_fails() {
        let mut board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        let err = session.submit(&mut board, "acute").unwrap_err();
        assert!(matches!(err, SessionError::NoAnglePosed));
    }

    #[test]
    fn settled_types_cannot_be_posed_again() {
        let mut board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        session.pose(&board, 90).unwrap();
        let hit = session.submit(&mut board, "right").unwrap();
        assert_eq!(
            hit,
            SubmitOutcome::Correct {
                points: 3,
                attempt_number: 1,
                feedback: Feedback::GreatJob,
            }
        );

        let err = session.pose(&board, 90).unwrap_err();
        assert!(matches!(err, SessionError::AlreadyIdentified(name) if name == "right"));
    }

    #[test]
    fn attempt_budget_carries_across_angles_of_one_type() {
        let mut board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        session.pose(&board, 50).unwrap();
        let miss = session.submit(&mut board, "obtuse").unwrap();
        assert_eq!(miss, SubmitOutcome::TryAgain { attempts_left: 2 });

        // A different acute angle continues the same question.
        session.pose(&board, 30).unwrap();
        session.submit(&mut board, "reflex").unwrap();
        let revealed = session.submit(&mut board, "right").unwrap();
        assert_eq!(
            revealed,
            SubmitOutcome::Exhausted {
                correct_answer: "acute".to_string(),
            }
        );
        assert_eq!(session.remaining_types(&board), vec!["right", "obtuse", "reflex"]);
    }

    #[test]
    fn settling_all_four_types_completes_the_module() {
        let mut board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        for (degrees, answer) in [(40, "acute"), (90, "right"), (120, "obtuse"), (200, "reflex")] {
            session.pose(&board, degrees).unwrap();
            session.submit(&mut board, answer).unwrap();
        }

        assert!(session.is_complete());
        assert!(board.is_module_completed(ModuleId::AngleType));
        assert_eq!(board.global_percent(), 17);
        assert_eq!(session.points_earned(), 12);

        let err = session.pose(&board, 60).unwrap_err();
        assert!(matches!(err, SessionError::Completed));
        let err = AngleSession::start(&board, fixed_clock()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn malformed_answer_consumes_no_attempt() {
        let mut board = build_board();
        let mut session = AngleSession::start(&board, fixed_clock()).unwrap();

        session.pose(&board, 250).unwrap();
        let err = session.submit(&mut board, "").unwrap_err();
        assert!(matches!(err, SessionError::Malformed(_)));

        let hit = session.submit(&mut board, "REFLEX").unwrap();
        assert_eq!(
            hit,
            SubmitOutcome::Correct {
                points: 3,
                attempt_number: 1,
                feedback: Feedback::GreatJob,
            }
        );
    }
}
