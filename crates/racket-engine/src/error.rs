//! Error types for the action engine

use racket_core::ActionError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while processing an action
#[derive(Debug, Error)]
pub enum Error {
    /// The action was rejected by a precondition or authorization check
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The store failed for a reason other than a guarded-write race
    #[error("store error: {0}")]
    Store(racket_db::Error),
}

impl Error {
    /// The precondition failure, if this is an action rejection
    pub fn as_action(&self) -> Option<&ActionError> {
        match self {
            Error::Action(err) => Some(err),
            Error::Store(_) => None,
        }
    }
}

// A guarded-write race is a domain outcome, not a storage fault: fold it
// into the action taxonomy so callers see one conflict kind.
impl From<racket_db::Error> for Error {
    fn from(err: racket_db::Error) -> Self {
        match err {
            racket_db::Error::Conflict => Error::Action(ActionError::Conflict),
            other => Error::Store(other),
        }
    }
}
