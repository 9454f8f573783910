use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("score ({score}) exceeds total answered ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Reasons an exported progress document is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("progress document is not valid JSON: {0}")]
    Malformed(String),

    #[error("progress document must be a JSON object")]
    NotAnObject,

    #[error("progress document is missing `{0}`")]
    MissingField(&'static str),

    #[error("`{0}` must be a non-negative integer")]
    InvalidField(&'static str),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("failed to encode progress document: {0}")]
    Encode(String),
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Cumulative score across runs.
///
/// `score <= total_answered` holds for every constructed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    total_answered: u32,
    last_played: Option<DateTime<Utc>>,
}

impl Progress {
    /// # Errors
    ///
    /// Returns `ProgressError::ScoreExceedsTotal` if `score > total_answered`.
    pub fn new(score: u32, total_answered: u32) -> Result<Self, ProgressError> {
        Self::from_persisted(score, total_answered, None)
    }

    /// Rehydrate progress from storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ScoreExceedsTotal` if `score > total_answered`.
    pub fn from_persisted(
        score: u32,
        total_answered: u32,
        last_played: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if score > total_answered {
            return Err(ProgressError::ScoreExceedsTotal {
                score,
                total: total_answered,
            });
        }
        Ok(Self {
            score,
            total_answered,
            last_played,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    #[must_use]
    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.last_played
    }

    /// Count one answered question.
    pub fn record_answer(&mut self, correct: bool) {
        self.total_answered = self.total_answered.saturating_add(1);
        if correct {
            self.score = self.score.saturating_add(1).min(self.total_answered);
        }
    }

    #[must_use]
    pub fn with_last_played(mut self, at: DateTime<Utc>) -> Self {
        self.last_played = Some(at);
        self
    }

    /// True when both counters match, ignoring timestamps.
    #[must_use]
    pub fn same_counts(&self, other: &Progress) -> bool {
        self.score == other.score && self.total_answered == other.total_answered
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

pub const SNAPSHOT_VERSION: &str = "1.0";

/// Portable export document: `{score, totalAnswered, exportDate, version}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    score: u32,
    total_answered: u32,
    export_date: DateTime<Utc>,
    version: String,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn capture(progress: &Progress, exported_at: DateTime<Utc>) -> Self {
        Self {
            score: progress.score(),
            total_answered: progress.total_answered(),
            export_date: exported_at,
            version: SNAPSHOT_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|err| SnapshotError::Encode(err.to_string()))
    }

    /// Validate an imported document and extract its counters.
    ///
    /// Only `score` and `totalAnswered` are required; `exportDate` and
    /// `version` are informational and ignored.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the text is not a JSON object, a counter is
    /// missing or not a non-negative integer, or `score > totalAnswered`.
    pub fn parse_progress(text: &str) -> Result<Progress, SnapshotError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| SnapshotError::Malformed(err.to_string()))?;
        let Value::Object(object) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let score = read_counter(&object, "score")?;
        let total_answered = read_counter(&object, "totalAnswered")?;
        Ok(Progress::new(score, total_answered)?)
    }
}

fn read_counter(object: &Map<String, Value>, field: &'static str) -> Result<u32, SnapshotError> {
    let raw = object.get(field).ok_or(SnapshotError::MissingField(field))?;
    raw.as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .ok_or(SnapshotError::InvalidField(field))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn default_progress_is_zero() {
        let progress = Progress::default();
        assert_eq!(progress.score(), 0);
        assert_eq!(progress.total_answered(), 0);
        assert!(progress.last_played().is_none());
    }

    #[test]
    fn score_above_total_is_rejected() {
        let err = Progress::new(5, 4).unwrap_err();
        assert_eq!(err, ProgressError::ScoreExceedsTotal { score: 5, total: 4 });
    }

    #[test]
    fn record_answer_counts_only_correct_toward_score() {
        let mut progress = Progress::default();
        progress.record_answer(true);
        progress.record_answer(false);
        progress.record_answer(true);
        assert_eq!(progress.score(), 2);
        assert_eq!(progress.total_answered(), 3);
    }

    #[test]
    fn record_answer_keeps_invariant_at_saturation() {
        let mut progress = Progress::new(u32::MAX - 1, u32::MAX).unwrap();
        progress.record_answer(true);
        progress.record_answer(true);
        assert!(progress.score() <= progress.total_answered());
    }

    #[test]
    fn snapshot_exports_camel_case_with_version() {
        let progress = Progress::new(3, 5).unwrap();
        let json = ProgressSnapshot::capture(&progress, fixed_now()).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["score"], 3);
        assert_eq!(value["totalAnswered"], 5);
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["exportDate"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn exported_snapshot_parses_back_to_same_counts() {
        let progress = Progress::new(7, 10).unwrap();
        let json = ProgressSnapshot::capture(&progress, fixed_now()).to_json().unwrap();
        let parsed = ProgressSnapshot::parse_progress(&json).unwrap();
        assert!(parsed.same_counts(&progress));
    }

    #[test]
    fn parse_accepts_minimal_document() {
        let parsed = ProgressSnapshot::parse_progress(r#"{"score": 1, "totalAnswered": 2}"#).unwrap();
        assert_eq!((parsed.score(), parsed.total_answered()), (1, 2));
    }

    #[test]
    fn parse_rejects_missing_total() {
        let err = ProgressSnapshot::parse_progress(r#"{"score": 1}"#).unwrap_err();
        assert_eq!(err, SnapshotError::MissingField("totalAnswered"));
    }

    #[test]
    fn parse_rejects_negative_and_fractional_counters() {
        let err = ProgressSnapshot::parse_progress(r#"{"score": -1, "totalAnswered": 2}"#)
            .unwrap_err();
        assert_eq!(err, SnapshotError::InvalidField("score"));

        let err = ProgressSnapshot::parse_progress(r#"{"score": 1, "totalAnswered": 2.5}"#)
            .unwrap_err();
        assert_eq!(err, SnapshotError::InvalidField("totalAnswered"));
    }

    #[test]
    fn parse_rejects_string_counters() {
        let err = ProgressSnapshot::parse_progress(r#"{"score": "3", "totalAnswered": 4}"#)
            .unwrap_err();
        assert_eq!(err, SnapshotError::InvalidField("score"));
    }

    #[test]
    fn parse_rejects_non_object_and_garbage() {
        assert_eq!(
            ProgressSnapshot::parse_progress("[1, 2]").unwrap_err(),
            SnapshotError::NotAnObject
        );
        assert!(matches!(
            ProgressSnapshot::parse_progress("not json").unwrap_err(),
            SnapshotError::Malformed(_)
        ));
    }

    #[test]
    fn parse_rejects_score_above_total() {
        let err = ProgressSnapshot::parse_progress(r#"{"score": 9, "totalAnswered": 2}"#)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Progress(_)));
    }
}
