use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::questions::QuestionSource;

use crate::error::LoadFailure;

/// Loads the question bank once at startup. Failures are not retried.
#[derive(Clone)]
pub struct QuestionBankService {
    source: Arc<dyn QuestionSource>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Fetch and validate the bank.
    ///
    /// # Errors
    ///
    /// Returns `LoadFailure` if the source fails, ids repeat, or no questions remain.
    pub async fn load(&self) -> Result<QuestionBank, LoadFailure> {
        let questions = self.source.load_questions().await?;
        let bank = QuestionBank::new(questions)?;
        if bank.is_empty() {
            return Err(LoadFailure::Empty);
        }
        log::debug!("loaded {} questions", bank.len());
        Ok(bank)
    }

    /// Load the bank, falling back to an empty one on failure.
    ///
    /// The failure is handed back so the caller can tell the user; with an
    /// empty bank every request for a question is a no-op.
    pub async fn load_or_empty(&self) -> (QuestionBank, Option<LoadFailure>) {
        match self.load().await {
            Ok(bank) => (bank, None),
            Err(err) => {
                log::warn!("question bank failed to load: {err}");
                (QuestionBank::empty(), Some(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{Question, QuestionId};
    use storage::questions::StaticQuestionSource;
    use storage::repository::StorageError;

    struct BrokenSource;

    #[async_trait]
    impl QuestionSource for BrokenSource {
        async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Io("disk on fire".into()))
        }
    }

    fn question(id: u64) -> Question {
        Question::new(QuestionId::new(id), format!("Q{id}"), format!("A{id}")).unwrap()
    }

    #[tokio::test]
    async fn loads_valid_bank() {
        let svc = QuestionBankService::new(Arc::new(StaticQuestionSource::new(vec![
            question(1),
            question(2),
        ])));
        assert_eq!(svc.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn source_failure_leaves_empty_bank() {
        let svc = QuestionBankService::new(Arc::new(BrokenSource));
        let (bank, failure) = svc.load_or_empty().await;
        assert!(bank.is_empty());
        assert!(matches!(failure, Some(LoadFailure::Source(_))));
    }

    #[tokio::test]
    async fn duplicate_ids_fail_the_load() {
        let svc = QuestionBankService::new(Arc::new(StaticQuestionSource::new(vec![
            question(1),
            question(1),
        ])));
        assert!(matches!(svc.load().await, Err(LoadFailure::Bank(_))));
    }

    #[tokio::test]
    async fn empty_source_is_a_load_failure() {
        let svc = QuestionBankService::new(Arc::new(StaticQuestionSource::default()));
        assert!(matches!(svc.load().await, Err(LoadFailure::Empty)));
    }
}
