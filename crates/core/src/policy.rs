use std::fmt;

use crate::model::{MAX_ATTEMPTS, Tier};

//
// ─── POINT SCHEDULE ────────────────────────────────────────────────────────────
//

/// Points awarded for a correct answer on a given attempt.
///
/// The schedule is fixed per tier and strictly decreasing:
///
/// | attempt | Basic | Advanced |
/// |---------|-------|----------|
/// | 1       | 3     | 6        |
/// | 2       | 2     | 4        |
/// | 3       | 1     | 2        |
///
/// Any attempt number outside `1..=MAX_ATTEMPTS` is worth nothing, so
/// callers can pass whatever counter they hold without range-checking it.
///
/// # Examples
///
/// ```
/// use geotutor_core::model::Tier;
/// use geotutor_core::policy;
///
/// assert_eq!(policy::score_for(Tier::Basic, 1), 3);
/// assert_eq!(policy::score_for(Tier::Advanced, 2), 4);
/// assert_eq!(policy::score_for(Tier::Basic, 4), 0);
/// ```
#[must_use]
pub fn score_for(tier: Tier, attempt_number: u32) -> u32 {
    match (tier, attempt_number) {
        (Tier::Basic, 1) => 3,
        (Tier::Basic, 2) => 2,
        (Tier::Basic, 3) => 1,
        (Tier::Advanced, 1) => 6,
        (Tier::Advanced, 2) => 4,
        (Tier::Advanced, 3) => 2,
        _ => 0,
    }
}

/// Highest score any single question can award.
#[must_use]
pub fn max_score() -> u32 {
    score_for(Tier::Advanced, 1)
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Encouragement band shown after a question resolves.
///
/// Band thresholds come from the point schedule: the top band starts at a
/// perfect advanced answer, the second at a perfect basic answer, the third
/// at any score at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Full marks on an advanced question.
    Outstanding,
    /// Full marks on a basic question, or a quick advanced recovery.
    GreatJob,
    /// Some points earned.
    GoodEffort,
    /// No points earned.
    KeepPracticing,
}

impl Feedback {
    /// Classifies a points award into its band.
    #[must_use]
    pub fn for_points(points: u32) -> Self {
        if points >= score_for(Tier::Advanced, 1) {
            Feedback::Outstanding
        } else if points >= score_for(Tier::Basic, 1) {
            Feedback::GreatJob
        } else if points >= score_for(Tier::Basic, MAX_ATTEMPTS) {
            Feedback::GoodEffort
        } else {
            Feedback::KeepPracticing
        }
    }

    /// Message shown to the learner.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Outstanding => "Outstanding! Perfect on the first try!",
            Feedback::GreatJob => "Great job!",
            Feedback::GoodEffort => "Good effort!",
            Feedback::KeepPracticing => "Keep practicing!",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
