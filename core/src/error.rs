use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game has not been found")]
    NotFound,
    #[error("invalid row and column parameters")]
    InvalidCoords,
    #[error("invalid game settings")]
    InvalidSettings,
    #[error("board rows do not form a valid grid")]
    InvalidBoardShape,
    #[error("game has already finished")]
    AlreadyEnded,
    #[error("game was modified concurrently, reload it and retry")]
    Conflict,
    #[error("an internal error has occurred: {context}")]
    Internal {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl GameError {
    pub const fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            NotFound => ErrorKind::NotFound,
            InvalidCoords | InvalidSettings | InvalidBoardShape | AlreadyEnded => {
                ErrorKind::InvalidInput
            }
            Conflict => ErrorKind::Conflict,
            Internal { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn from_repository(context: &'static str, source: RepositoryError) -> Self {
        match source {
            RepositoryError::Conflict { .. } => Self::Conflict,
            source => Self::Internal { context, source },
        }
    }
}

/// Coarse classification callers map onto transport status codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

/// Failure reported by a [`GameRepository`](crate::GameRepository) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("stale revision: expected {expected}, found {found}")]
    Conflict { expected: u64, found: u64 },
    #[error("could not marshal game: {0}")]
    Marshal(String),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;
