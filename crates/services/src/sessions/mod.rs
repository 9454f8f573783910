mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::ScoreView;
pub use service::{AnswerOutcome, QuizSession, SessionPhase};
pub use view::{ChoiceState, ChoiceView, QuestionView, choice_label};
pub use workflow::QuizLoopService;
