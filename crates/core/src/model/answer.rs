/// One selectable answer in a presented question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoice {
    pub text: String,
    pub correct: bool,
}

impl AnswerChoice {
    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: true,
        }
    }

    #[must_use]
    pub fn distractor(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
        }
    }
}
