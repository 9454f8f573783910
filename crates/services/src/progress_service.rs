use std::sync::Arc;

use quiz_core::model::{Progress, ProgressSnapshot};
use storage::records::ProgressRecord;
use storage::repository::{InMemoryStore, KeyValueStore};

use crate::Clock;
use crate::error::{ImportError, ProgressServiceError};

/// Storage key holding the persisted progress record.
pub const PROGRESS_KEY: &str = "quizProgress";

/// Reads and writes cumulative progress through a key-value store.
///
/// Every write goes straight to the store; there is no batching.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, store }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemoryStore::new()))
    }

    /// Last persisted progress, or zero progress when nothing usable is stored.
    ///
    /// Unreadable, malformed or inconsistent records are logged and treated as absent.
    pub async fn load(&self) -> Progress {
        let raw = match self.store.get(PROGRESS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Progress::default(),
            Err(err) => {
                log::warn!("could not read saved progress, starting from zero: {err}");
                return Progress::default();
            }
        };

        let decoded = ProgressRecord::decode(&raw)
            .map_err(|err| err.to_string())
            .and_then(|record| record.into_progress().map_err(|err| err.to_string()));
        match decoded {
            Ok(progress) => progress,
            Err(reason) => {
                log::warn!("ignoring malformed saved progress: {reason}");
                Progress::default()
            }
        }
    }

    /// Persist `progress`, stamping `lastPlayed` with the current time.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn save(&self, progress: &Progress) -> Result<Progress, ProgressServiceError> {
        let stamped = progress.with_last_played(self.clock.now());
        let raw = ProgressRecord::from_progress(&stamped).encode()?;
        self.store.set(PROGRESS_KEY, &raw).await?;
        log::debug!(
            "saved progress {}/{}",
            stamped.score(),
            stamped.total_answered()
        );
        Ok(stamped)
    }

    /// Zero both counters and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn reset(&self) -> Result<Progress, ProgressServiceError> {
        let progress = self.save(&Progress::default()).await?;
        log::info!("progress reset");
        Ok(progress)
    }

    /// Serialize `progress` as a portable export document.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Snapshot` if encoding fails.
    pub fn export(&self, progress: &Progress) -> Result<String, ProgressServiceError> {
        let json = ProgressSnapshot::capture(progress, self.clock.now()).to_json()?;
        log::info!(
            "exported progress {}/{}",
            progress.score(),
            progress.total_answered()
        );
        Ok(json)
    }

    /// Suggested file name for an export made today, e.g. `quiz-progress-2023-11-14.json`.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!("quiz-progress-{}.json", self.clock.today().format("%Y-%m-%d"))
    }

    /// Validate an export document and make it the current progress.
    ///
    /// Nothing is written unless the whole document validates.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Invalid` for documents without non-negative
    /// integer `score` / `totalAnswered`, and `ImportError::Storage` if the
    /// write fails.
    pub async fn import(&self, text: &str) -> Result<Progress, ImportError> {
        let imported = ProgressSnapshot::parse_progress(text)?;
        let stamped = imported.with_last_played(self.clock.now());
        let raw = ProgressRecord::from_progress(&stamped).encode()?;
        self.store.set(PROGRESS_KEY, &raw).await?;
        log::info!(
            "imported progress {}/{}",
            stamped.score(),
            stamped.total_answered()
        );
        Ok(stamped)
    }
}
