use std::fmt;
use std::sync::Arc;

use quiz_core::model::{AnswerChoice, Progress, Question, QuestionBank};
use quiz_core::shuffler::{pick_question, shuffle_answers};
use rand::Rng;

use crate::error::SessionError;

//
// ─── PHASE & OUTCOME ───────────────────────────────────────────────────────────
//

/// Where the session is in the present/answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No question loaded yet.
    Idle,
    /// A question is on screen and waiting for an answer.
    Presented,
    /// The current question has been answered; only `load_next` moves on.
    Answered,
}

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub selected_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub score: u32,
    pub total_answered: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz controller.
///
/// Holds a shared handle to the question bank, the choices for the current
/// question and the running progress. Persistence is left to
/// `QuizLoopService`.
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    phase: SessionPhase,
    current: Option<usize>,
    choices: Vec<AnswerChoice>,
    outcome: Option<AnswerOutcome>,
    progress: Progress,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, progress: Progress) -> Self {
        Self {
            bank,
            phase: SessionPhase::Idle,
            current: None,
            choices: Vec::new(),
            outcome: None,
            progress,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.phase == SessionPhase::Answered
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|idx| self.bank.questions().get(idx))
    }

    #[must_use]
    pub fn choices(&self) -> &[AnswerChoice] {
        &self.choices
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.outcome.map(|outcome| outcome.selected_index)
    }

    /// Outcome of the current question; stable until `load_next`.
    #[must_use]
    pub fn outcome(&self) -> Option<AnswerOutcome> {
        self.outcome
    }

    /// Present a uniformly random question with freshly shuffled choices.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` without touching the session when
    /// there are no questions.
    pub fn load_next<R>(&mut self, rng: &mut R) -> Result<&Question, SessionError>
    where
        R: Rng + ?Sized,
    {
        let Some(index) = pick_question(&self.bank, rng) else {
            return Err(SessionError::EmptyBank);
        };
        let question = &self.bank.questions()[index];

        self.choices = shuffle_answers(&self.bank, question, rng);
        self.current = Some(index);
        self.outcome = None;
        self.phase = SessionPhase::Presented;
        log::debug!("presenting question {}", question.id());

        Ok(question)
    }

    /// Answer the current question with the choice at `index`.
    ///
    /// Returns `None` and changes nothing when no question is waiting for an
    /// answer or `index` is out of range.
    pub fn select_answer(&mut self, index: usize) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::Presented {
            return None;
        }
        let is_correct = self.choices.get(index)?.correct;
        let correct_index = self.choices.iter().position(|c| c.correct)?;

        self.progress.record_answer(is_correct);
        let outcome = AnswerOutcome {
            selected_index: index,
            correct_index,
            is_correct,
            score: self.progress.score(),
            total_answered: self.progress.total_answered(),
        };
        self.outcome = Some(outcome);
        self.phase = SessionPhase::Answered;
        Some(outcome)
    }

    pub(crate) fn replace_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("bank_len", &self.bank.len())
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("choices_len", &self.choices.len())
            .field("outcome", &self.outcome)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
