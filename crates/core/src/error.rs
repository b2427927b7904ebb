use thiserror::Error;

use crate::model::{AnswerParseError, SummaryError};
use crate::score::RecordError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    AnswerParse(#[from] AnswerParseError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
