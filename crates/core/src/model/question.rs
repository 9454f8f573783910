use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} has an empty correct answer")]
    EmptyAnswer { id: QuestionId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// The prompt may carry inline math markup (`$...$`, `$$...$$`); it is kept
/// verbatim and left for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    correct_answer: String,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or the answer is blank.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer { id });
        }
        Ok(Self {
            id,
            prompt,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Immutable set of questions loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::DuplicateId` for the first repeated id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionBankError::DuplicateId(question.id()));
            }
        }
        Ok(Self { questions })
    }

    /// The bank left behind by a failed load.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64, answer: &str) -> Question {
        Question::new(QuestionId::new(id), format!("Q{id}"), answer).unwrap()
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = Question::new(QuestionId::new(1), "   ", "4").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt { id: QuestionId::new(1) });
    }

    #[test]
    fn blank_answer_is_rejected() {
        let err = Question::new(QuestionId::new(2), "2+2=?", "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswer { id: QuestionId::new(2) });
    }

    #[test]
    fn math_markup_is_kept_verbatim() {
        let q = Question::new(QuestionId::new(3), r"Solve $x^2 = 4$", "$x = \\pm 2$").unwrap();
        assert_eq!(q.prompt(), r"Solve $x^2 = 4$");
        assert_eq!(q.correct_answer(), "$x = \\pm 2$");
    }

    #[test]
    fn bank_rejects_duplicate_ids() {
        let err = QuestionBank::new(vec![question(1, "a"), question(2, "b"), question(1, "c")])
            .unwrap_err();
        assert_eq!(err, QuestionBankError::DuplicateId(QuestionId::new(1)));
    }

    #[test]
    fn bank_looks_up_by_id() {
        let bank = QuestionBank::new(vec![question(1, "a"), question(2, "b")]).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(QuestionId::new(2)).unwrap().correct_answer(), "b");
        assert!(bank.get(QuestionId::new(9)).is_none());
    }

    #[test]
    fn empty_bank_is_empty() {
        assert!(QuestionBank::empty().is_empty());
    }
}
