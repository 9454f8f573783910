use std::path::Path;
use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::questions::{JsonFileSource, QuestionSource};
use storage::repository::Storage;

use crate::Clock;
use crate::error::{AppServicesError, LoadFailure};
use crate::progress_service::ProgressService;
use crate::question_bank_service::QuestionBankService;
use crate::sessions::QuizLoopService;
use crate::theme_service::ThemeService;

/// Assembles app-facing services around one storage backend and one loaded bank.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    load_failure: Option<Arc<LoadFailure>>,
    progress: Arc<ProgressService>,
    theme: Arc<ThemeService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and a JSON question file.
    ///
    /// A bank that fails to load is not fatal: services come up with an empty
    /// bank and the failure is available from [`Self::load_failure`].
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        questions_path: &Path,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source = Arc::new(JsonFileSource::new(questions_path));
        Ok(Self::assemble(storage, source, clock).await)
    }

    /// Build services over in-memory storage.
    pub async fn in_memory(source: Arc<dyn QuestionSource>, clock: Clock) -> Self {
        Self::assemble(Storage::in_memory(), source, clock).await
    }

    async fn assemble(storage: Storage, source: Arc<dyn QuestionSource>, clock: Clock) -> Self {
        let (bank, failure) = QuestionBankService::new(source).load_or_empty().await;
        let progress = ProgressService::new(clock, Arc::clone(&storage.kv));
        let quiz_loop = Arc::new(QuizLoopService::new(progress.clone()));
        let theme = Arc::new(ThemeService::new(Arc::clone(&storage.kv)));

        Self {
            bank: Arc::new(bank),
            load_failure: failure.map(Arc::new),
            progress: Arc::new(progress),
            theme,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn load_failure(&self) -> Option<&LoadFailure> {
        self.load_failure.as_deref()
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
