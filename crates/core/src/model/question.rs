use thiserror::Error;

use crate::model::ids::{ModuleId, QuestionId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while reading a raw learner answer.
///
/// A malformed answer is rejected before it reaches any scoring state, so
/// it never consumes an attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerParseError {
    #[error("answer is empty")]
    Empty,
    #[error("expected a number, got {0:?}")]
    NotANumber(String),
}

//
// ─── TIER ─────────────────────────────────────────────────────────────────────
//

/// Two-level difficulty classification for questions.
///
/// The tier selects which point schedule applies:
/// - `Basic`: identification and single-formula questions
/// - `Advanced`: compound and multi-step questions, worth double
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Standard difficulty. Scores 3/2/1 across the three attempts.
    Basic,
    /// Hard difficulty. Scores 6/4/2 across the three attempts.
    Advanced,
}

//
// ─── ANSWER RULE ──────────────────────────────────────────────────────────────
//

/// Absolute tolerance applied to numeric answers.
pub const NUMERIC_TOLERANCE: f64 = 0.1;

/// How a question decides whether a raw answer is correct.
///
/// Identification questions compare names case-insensitively; calculation
/// questions compare numbers within an absolute tolerance carried by the
/// question itself.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerRule {
    /// Correct when the trimmed input matches `expected`, ignoring case.
    ExactMatch { expected: String },
    /// Correct when the input parses as a number within `tolerance` of
    /// `expected`.
    WithinTolerance { expected: f64, tolerance: f64 },
}

impl AnswerRule {
    /// Rule for a name answer.
    #[must_use]
    pub fn exact(expected: impl Into<String>) -> Self {
        Self::ExactMatch {
            expected: expected.into(),
        }
    }

    /// Rule for a numeric answer with the standard tolerance.
    #[must_use]
    pub fn numeric(expected: f64) -> Self {
        Self::WithinTolerance {
            expected,
            tolerance: NUMERIC_TOLERANCE,
        }
    }

    /// Checks a raw learner answer against this rule.
    ///
    /// Input is trimmed first; correctness is a plain boolean, so a wrong
    /// answer is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerParseError::Empty`] when the trimmed input is empty,
    /// or [`AnswerParseError::NotANumber`] when a numeric rule receives
    /// input that does not parse.
    pub fn check(&self, raw: &str) -> Result<bool, AnswerParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AnswerParseError::Empty);
        }
        match self {
            Self::ExactMatch { expected } => Ok(raw.eq_ignore_ascii_case(expected)),
            Self::WithinTolerance {
                expected,
                tolerance,
            } => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| AnswerParseError::NotANumber(raw.to_string()))?;
                Ok((value - expected).abs() <= *tolerance)
            }
        }
    }

    /// The expected answer, rendered for the reveal after a question is
    /// exhausted.
    #[must_use]
    pub fn expected_display(&self) -> String {
        match self {
            Self::ExactMatch { expected } => expected.clone(),
            Self::WithinTolerance { expected, .. } => expected.to_string(),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One question offered by a module.
///
/// Carries a stable id, the prompt shown to the learner, and the rule that
/// decides correctness. The tier is inherited from the owning module.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    module: ModuleId,
    tier: Tier,
    prompt: String,
    rule: AnswerRule,
}

impl Question {
    #[must_use]
    pub fn new(
        module: ModuleId,
        id: QuestionId,
        prompt: impl Into<String>,
        rule: AnswerRule,
    ) -> Self {
        Self {
            id,
            module,
            tier: module.tier(),
            prompt: prompt.into(),
            rule,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn module(&self) -> ModuleId {
        self.module
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn rule(&self) -> &AnswerRule {
        &self.rule
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
