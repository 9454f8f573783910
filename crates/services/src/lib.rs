#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod input;
pub mod progress_service;
pub mod question_bank_service;
pub mod sessions;
pub mod theme_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, ImportError, LoadFailure, ProgressServiceError, SessionError,
    ThemeServiceError,
};
pub use input::{InputCommand, Key};
pub use progress_service::{PROGRESS_KEY, ProgressService};
pub use question_bank_service::QuestionBankService;
pub use sessions::{
    AnswerOutcome, ChoiceState, ChoiceView, QuestionView, QuizLoopService, QuizSession,
    ScoreView, SessionPhase,
};
pub use theme_service::{THEME_KEY, ThemeService};
