//! User-facing wording. The library crates only return typed results.

use services::{ImportError, LoadFailure, SessionError};

pub const LOAD_FAILED: &str = "Could not load the questions. Check the question file and start again.";
pub const CORRECT: &str = "Correct!";
pub const NEXT_HINT: &str = "Press Enter for the next question.";
pub const ANSWER_HINT: &str = "Answer with 1-4 or a-d (t: theme, r: reset, q: quit).";
pub const RESET_CONFIRM: &str = "Reset your progress? This cannot be undone. [y/N] ";
pub const RESET_DONE: &str = "Progress reset.";
pub const RESET_CANCELLED: &str = "Reset cancelled.";

#[must_use]
pub fn incorrect(correct_answer: &str) -> String {
    format!("Wrong. The correct answer is: {correct_answer}")
}

#[must_use]
pub fn score_line(score: u32, total: u32, percent: Option<u32>) -> String {
    match percent {
        Some(pct) => format!("Score: {score}/{total} ({pct}%)"),
        None => format!("Score: {score}/{total}"),
    }
}

#[must_use]
pub fn load_failure_detail(err: &LoadFailure) -> String {
    format!("{LOAD_FAILED}\n({err})")
}

#[must_use]
pub fn import_done(score: u32, total: u32) -> String {
    format!("Progress imported successfully!\nScore: {score}/{total}")
}

#[must_use]
pub fn import_failed(err: &ImportError) -> String {
    match err {
        ImportError::Invalid(_) => {
            format!("Wrong file format. Please choose a valid progress file.\n({err})")
        }
        _ => format!("Error while reading the file. Please try again.\n({err})"),
    }
}

#[must_use]
pub fn save_failed(err: &SessionError) -> String {
    format!("Your answer counts, but progress could not be saved yet.\n({err})")
}

#[must_use]
pub fn export_done(path: &std::path::Path) -> String {
    format!("Progress exported to {}", path.display())
}

#[must_use]
pub fn theme_set(theme: &str) -> String {
    format!("Theme: {theme}")
}
