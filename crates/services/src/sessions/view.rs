use quiz_core::model::QuestionId;

use super::progress::ScoreView;
use super::service::{QuizSession, SessionPhase};

/// Highlight state of a single choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceState {
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// `A`, `B`, `C`, `D`, ...
    pub label: char,
    pub text: String,
    pub state: ChoiceState,
    pub selected: bool,
}

/// Presentation-agnostic snapshot of the current question.
///
/// No pre-formatted or localized strings; the prompt and choices are passed
/// through untouched (math markup included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub prompt: String,
    pub choices: Vec<ChoiceView>,
    pub answered: bool,
    pub score: ScoreView,
}

impl QuestionView {
    /// `None` while no question is loaded.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let answered = session.phase() == SessionPhase::Answered;
        let selected = session.selected_index();

        let choices = session
            .choices()
            .iter()
            .enumerate()
            .map(|(idx, choice)| {
                let is_selected = selected == Some(idx);
                let state = match (answered, choice.correct, is_selected) {
                    (false, _, _) => ChoiceState::Neutral,
                    (true, true, _) => ChoiceState::Correct,
                    (true, false, true) => ChoiceState::Incorrect,
                    (true, false, false) => ChoiceState::Neutral,
                };
                ChoiceView {
                    label: choice_label(idx),
                    text: choice.text.clone(),
                    state,
                    selected: is_selected,
                }
            })
            .collect();

        Some(Self {
            question_id: question.id(),
            prompt: question.prompt().to_string(),
            choices,
            answered,
            score: ScoreView::from_progress(session.progress()),
        })
    }
}

/// Letter shown next to the choice at `index`.
#[must_use]
pub fn choice_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|offset| b'A'.checked_add(offset))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}
