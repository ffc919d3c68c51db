//! Error types raised by repository implementations.

use arena_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Kind of record a repository operation addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    Character,
    Item,
}

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: RecordKind, id: u32 },

    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RepositoryError::NotFound { .. } => ErrorSeverity::Fatal,
            RepositoryError::LockPoisoned | RepositoryError::CorruptedData(_) => {
                ErrorSeverity::Internal
            }
            RepositoryError::Io(_) | RepositoryError::Json(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::NotFound { .. } => "REPOSITORY_NOT_FOUND",
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io(_) => "REPOSITORY_IO",
            RepositoryError::Json(_) => "REPOSITORY_JSON",
            RepositoryError::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
