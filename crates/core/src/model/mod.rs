mod answer;
mod ids;
mod progress;
mod question;
mod theme;

pub use answer::AnswerChoice;
pub use ids::QuestionId;
pub use progress::{Progress, ProgressError, ProgressSnapshot, SNAPSHOT_VERSION, SnapshotError};
pub use question::{Question, QuestionBank, QuestionBankError, QuestionError};
pub use theme::{Theme, ThemeParseError};
