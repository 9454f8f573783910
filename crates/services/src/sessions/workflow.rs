use std::sync::Arc;

use quiz_core::model::{Progress, Question, QuestionBank};
use rand::Rng;

use super::service::{AnswerOutcome, QuizSession};
use crate::error::{ImportError, ProgressServiceError, SessionError};
use crate::progress_service::ProgressService;

/// Orchestrates a quiz session and keeps the progress store in step with it.
///
/// Each accepted answer is persisted before `answer_current` returns.
#[derive(Clone)]
pub struct QuizLoopService {
    progress: ProgressService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(progress: ProgressService) -> Self {
        Self { progress }
    }

    /// Start an idle session over `bank`, seeded with the saved progress.
    pub async fn start_session(&self, bank: Arc<QuestionBank>) -> QuizSession {
        let progress = self.progress.load().await;
        QuizSession::new(bank, progress)
    }

    /// Present the next random question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn next_question<'s>(&self, session: &'s mut QuizSession) -> Result<&'s Question, SessionError> {
        self.next_question_with(session, &mut rand::rng())
    }

    /// Like [`Self::next_question`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn next_question_with<'s, R>(
        &self,
        session: &'s mut QuizSession,
        rng: &mut R,
    ) -> Result<&'s Question, SessionError>
    where
        R: Rng + ?Sized,
    {
        session.load_next(rng)
    }

    /// Answer the current question and persist the new progress.
    ///
    /// `Ok(None)` means the selection was ignored (already answered, nothing
    /// presented, or index out of range) and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progress` if the progress write fails. The
    /// answer itself stays recorded in the session.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        index: usize,
    ) -> Result<Option<AnswerOutcome>, SessionError> {
        let Some(outcome) = session.select_answer(index) else {
            return Ok(None);
        };
        let saved = self.progress.save(session.progress()).await?;
        session.replace_progress(saved);
        Ok(Some(outcome))
    }

    /// Zero the progress, persisted and reflected in the session.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the write fails.
    pub async fn reset_progress(
        &self,
        session: &mut QuizSession,
    ) -> Result<Progress, ProgressServiceError> {
        let progress = self.progress.reset().await?;
        session.replace_progress(progress);
        Ok(progress)
    }

    /// Replace progress from an export document.
    ///
    /// # Errors
    ///
    /// Returns `ImportError`; the session's progress is unchanged on error.
    pub async fn import_progress(
        &self,
        session: &mut QuizSession,
        text: &str,
    ) -> Result<Progress, ImportError> {
        let progress = self.progress.import(text).await?;
        session.replace_progress(progress);
        Ok(progress)
    }

    /// Export the session's current progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Snapshot` if encoding fails.
    pub fn export_progress(&self, session: &QuizSession) -> Result<String, ProgressServiceError> {
        self.progress.export(session.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use quiz_core::time::fixed_clock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_bank() -> Arc<QuestionBank> {
        let questions = (1..=5)
            .map(|id| Question::new(QuestionId::new(id), format!("Q{id}"), format!("A{id}")).unwrap())
            .collect();
        Arc::new(QuestionBank::new(questions).unwrap())
    }

    #[tokio::test]
    async fn answer_is_persisted_immediately() {
        let progress = ProgressService::in_memory(fixed_clock());
        let svc = QuizLoopService::new(progress.clone());
        let mut session = svc.start_session(build_bank()).await;
        let mut rng = StdRng::seed_from_u64(3);

        svc.next_question_with(&mut session, &mut rng).unwrap();
        let right = session.choices().iter().position(|c| c.correct).unwrap();
        let outcome = svc.answer_current(&mut session, right).await.unwrap().unwrap();

        assert!(outcome.is_correct);
        let stored = progress.load().await;
        assert_eq!((stored.score(), stored.total_answered()), (1, 1));
        assert!(stored.last_played().is_some());
    }

    #[tokio::test]
    async fn ignored_selection_writes_nothing() {
        let progress = ProgressService::in_memory(fixed_clock());
        let svc = QuizLoopService::new(progress.clone());
        let mut session = svc.start_session(build_bank()).await;

        assert!(svc.answer_current(&mut session, 0).await.unwrap().is_none());
        assert_eq!(progress.load().await, Progress::default());
    }

    #[tokio::test]
    async fn session_resumes_saved_progress() {
        let progress = ProgressService::in_memory(fixed_clock());
        progress.save(&Progress::new(4, 6).unwrap()).await.unwrap();
        let svc = QuizLoopService::new(progress);

        let session = svc.start_session(build_bank()).await;

        assert_eq!(session.progress().score(), 4);
        assert_eq!(session.progress().total_answered(), 6);
    }

    #[tokio::test]
    async fn failed_import_keeps_session_progress() {
        let progress = ProgressService::in_memory(fixed_clock());
        progress.save(&Progress::new(1, 2).unwrap()).await.unwrap();
        let svc = QuizLoopService::new(progress);
        let mut session = svc.start_session(build_bank()).await;

        let err = svc
            .import_progress(&mut session, r#"{"score": 3}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Invalid(_)));
        assert_eq!(session.progress().score(), 1);
        assert_eq!(session.progress().total_answered(), 2);
    }

    #[tokio::test]
    async fn reset_updates_session() {
        let progress = ProgressService::in_memory(fixed_clock());
        progress.save(&Progress::new(7, 10).unwrap()).await.unwrap();
        let svc = QuizLoopService::new(progress.clone());
        let mut session = svc.start_session(build_bank()).await;

        svc.reset_progress(&mut session).await.unwrap();

        assert_eq!(session.progress().total_answered(), 0);
        assert_eq!(progress.load().await.total_answered(), 0);
    }
}
