use std::path::PathBuf;

use async_trait::async_trait;
use quiz_core::model::Question;

use crate::records::QuestionFile;
use crate::repository::StorageError;

/// Supplier of the question bank, read once at startup.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch and validate every question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or a record is invalid.
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Reads a `{ "questions": [...] }` JSON document from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a question bank document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or invalid records.
pub fn parse_question_file(raw: &str) -> Result<Vec<Question>, StorageError> {
    let file: QuestionFile =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    file.questions
        .into_iter()
        .map(|record| {
            record
                .into_question()
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .collect()
}

#[async_trait]
impl QuestionSource for JsonFileSource {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound
            } else {
                StorageError::Io(e.to_string())
            }
        })?;
        log::debug!("read question bank from {}", self.path.display());
        parse_question_file(&raw)
    }
}

/// Serves a fixed list of questions.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionSource {
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.questions.clone())
    }
}
