//! Question selection and answer shuffling.
//!
//! Both functions take the random source as a parameter; production code
//! passes `rand::rng()`, tests pass a seeded `StdRng`.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{AnswerChoice, Question, QuestionBank};

/// Choices shown for a question when the bank is large enough.
pub const MAX_CHOICES: usize = 4;

/// Distractors drawn per question.
pub const DISTRACTOR_COUNT: usize = MAX_CHOICES - 1;

/// Position of a uniformly random question in the bank. `None` for an empty bank.
pub fn pick_question<R>(bank: &QuestionBank, rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    if bank.is_empty() {
        return None;
    }
    Some(rng.random_range(0..bank.len()))
}

/// Build the shuffled choice set for `target`.
///
/// The correct answer is joined by up to [`DISTRACTOR_COUNT`] correct answers
/// of other questions, drawn without replacement. Candidates whose text is
/// already in the set are skipped so no two choices read the same. A bank
/// with too few distinct answers yields fewer choices rather than padding.
pub fn shuffle_answers<R>(bank: &QuestionBank, target: &Question, rng: &mut R) -> Vec<AnswerChoice>
where
    R: Rng + ?Sized,
{
    let mut others: Vec<&Question> = bank
        .questions()
        .iter()
        .filter(|q| q.id() != target.id())
        .collect();
    others.shuffle(rng);

    let mut choices = Vec::with_capacity(MAX_CHOICES);
    choices.push(AnswerChoice::correct(target.correct_answer()));

    for other in others {
        if choices.len() == MAX_CHOICES {
            break;
        }
        let text = other.correct_answer();
        if choices.iter().any(|choice| choice.text == text) {
            continue;
        }
        choices.push(AnswerChoice::distractor(text));
    }

    choices.shuffle(rng);
    choices
}
