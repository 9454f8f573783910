//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionBankError, SnapshotError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// The question bank could not be loaded. The session stays without questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadFailure {
    #[error("question bank could not be read: {0}")]
    Source(#[from] StorageError),
    #[error("question bank is invalid: {0}")]
    Bank(#[from] QuestionBankError),
    #[error("question bank contains no questions")]
    Empty,
}

/// Errors emitted by `ProgressService` when writing or exporting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rejected progress import. Stored progress is left as it was.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("invalid progress file: {0}")]
    Invalid(#[from] SnapshotError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available")]
    EmptyBank,
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted by `ThemeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThemeServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
