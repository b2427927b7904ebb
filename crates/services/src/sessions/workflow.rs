use geotutor_core::Clock;
use geotutor_core::model::ModuleId;
use geotutor_core::score::ScoreBoard;

use super::angle::AngleSession;
use super::service::ModuleSession;
use crate::catalog;
use crate::error::SessionError;

/// Wires the built-in catalog to a score board.
///
/// One runner serves a whole sitting: it carries the clock and shuffle
/// choice, and hands out sessions over whatever each module still has
/// open on the board.
#[derive(Debug, Clone, Copy)]
pub struct SessionRunner {
    clock: Clock,
    shuffle: bool,
}

impl SessionRunner {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            shuffle: true,
        }
    }

    /// Enable or disable shuffling of module questions.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Fresh board covering every module in the catalog.
    #[must_use]
    pub fn standard_board(&self) -> ScoreBoard {
        catalog::standard_board()
    }

    /// Starts a sitting of a question-bank module.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Interactive` for the angle module, which
    /// starts through [`Self::start_angles`], and `SessionError::Empty`
    /// when every question is already settled.
    pub fn start_module(
        &self,
        board: &ScoreBoard,
        module: ModuleId,
    ) -> Result<ModuleSession, SessionError> {
        if module == ModuleId::AngleType {
            return Err(SessionError::Interactive(module));
        }
        ModuleSession::start(
            module,
            catalog::standard_bank(module),
            board,
            self.shuffle,
            self.clock,
        )
    }

    /// Starts a sitting of the angle module.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when every angle type is settled.
    pub fn start_angles(&self, board: &ScoreBoard) -> Result<AngleSession, SessionError> {
        AngleSession::start(board, self.clock)
    }
}
