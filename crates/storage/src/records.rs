use chrono::{DateTime, Utc};
use quiz_core::model::{Progress, ProgressError, Question, QuestionError, QuestionId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::repository::StorageError;

/// Persisted shape of progress: `{score, totalAnswered, lastPlayed}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub score: u32,
    pub total_answered: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub last_played: Option<DateTime<Utc>>,
}

/// `lastPlayed` is informational only; an unreadable value is dropped so the
/// counters next to it survive.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => match DateTime::parse_from_rfc3339(&text) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(err) => {
                log::warn!("dropping unreadable lastPlayed {text:?}: {err}");
                None
            }
        },
        Some(other) => {
            log::warn!("dropping non-string lastPlayed {other}");
            None
        }
    };
    Ok(parsed)
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &Progress) -> Self {
        Self {
            score: progress.score(),
            total_answered: progress.total_answered(),
            last_played: progress.last_played(),
        }
    }

    /// # Errors
    ///
    /// Returns `ProgressError` if the stored score exceeds the stored total.
    pub fn into_progress(self) -> Result<Progress, ProgressError> {
        Progress::from_persisted(self.score, self.total_answered, self.last_played)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn encode(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON, missing
    /// fields or negative counters.
    pub fn decode(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// One entry of a question bank file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub question: String,
    pub correct_answer: String,
}

impl QuestionRecord {
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or answer is blank.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.id, self.question, self.correct_answer)
    }
}

/// Top-level question bank document: `{ "questions": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionFile {
    pub questions: Vec<QuestionRecord>,
}
