use std::error::Error;
use std::io::Write;

use crossterm::style::{Color, StyledContent, Stylize};
use quiz_core::model::Theme;
use services::{
    AppServices, ChoiceState, InputCommand, Key, QuestionView, QuizLoopService, QuizSession,
    ScoreView,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::messages;

/// Colours for the current theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    accent: Color,
    correct: Color,
    incorrect: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: Color::DarkBlue,
                correct: Color::DarkGreen,
                incorrect: Color::DarkRed,
                muted: Color::DarkGrey,
            },
            Theme::Dark => Self {
                accent: Color::Cyan,
                correct: Color::Green,
                incorrect: Color::Red,
                muted: Color::Grey,
            },
        }
    }

    fn paint<'a>(&self, text: &'a str, state: ChoiceState) -> StyledContent<&'a str> {
        match state {
            ChoiceState::Neutral => text.stylize(),
            ChoiceState::Correct => text.with(self.correct).bold(),
            ChoiceState::Incorrect => text.with(self.incorrect).bold(),
        }
    }
}

/// Render a question (and, once answered, its feedback) as terminal text.
pub fn render_question(view: &QuestionView, theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", score_text(&view.score).with(palette.muted)));
    out.push_str(&format!("{}\n\n", view.prompt.as_str().with(palette.accent).bold()));

    for choice in &view.choices {
        let marker = match (choice.state, choice.selected) {
            (ChoiceState::Correct, _) => "✓",
            (ChoiceState::Incorrect, _) => "✗",
            (ChoiceState::Neutral, true) => ">",
            (ChoiceState::Neutral, false) => " ",
        };
        let line = format!("{marker} {}) {}", choice.label, choice.text);
        out.push_str(&format!("{}\n", palette.paint(&line, choice.state)));
    }
    out.push('\n');

    if view.answered {
        let picked_right = view
            .choices
            .iter()
            .any(|c| c.selected && c.state == ChoiceState::Correct);
        if picked_right {
            out.push_str(&format!("{}\n", messages::CORRECT.with(palette.correct).bold()));
        } else {
            let answer = view
                .choices
                .iter()
                .find(|c| c.state == ChoiceState::Correct)
                .map_or("", |c| c.text.as_str());
            out.push_str(&format!(
                "{}\n",
                messages::incorrect(answer).with(palette.incorrect).bold()
            ));
        }
        out.push_str(messages::NEXT_HINT);
    } else {
        out.push_str(messages::ANSWER_HINT);
    }
    out.push('\n');
    out
}

pub fn score_text(score: &ScoreView) -> String {
    messages::score_line(score.score, score.total, score.percent())
}

fn show(session: &QuizSession, theme: Theme) {
    if let Some(view) = QuestionView::from_session(session) {
        println!("\n{}", render_question(&view, theme));
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}

/// Ask before wiping progress. Anything but `y`/`yes` (or end of input) declines.
pub async fn confirm<R>(lines: &mut Lines<R>) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    prompt(messages::RESET_CONFIRM)?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Answer the current question. A failed save is reported and the game goes
/// on; the answer stays in the session and is written with the next save.
///
/// Returns `false` when the selection was ignored.
async fn answer(quiz: &QuizLoopService, session: &mut QuizSession, index: usize) -> bool {
    match quiz.answer_current(session, index).await {
        Ok(outcome) => outcome.is_some(),
        Err(err) => {
            log::warn!("progress not saved: {err}");
            eprintln!("{}", messages::save_failed(&err));
            session.is_answered()
        }
    }
}

/// Interactive quiz loop on stdin/stdout. Returns on `q` or end of input.
///
/// # Errors
///
/// Returns terminal I/O errors and storage failures.
pub async fn play(services: &AppServices) -> Result<(), Box<dyn Error>> {
    if let Some(failure) = services.load_failure() {
        eprintln!("{}", messages::load_failure_detail(failure));
        return Ok(());
    }

    let quiz = services.quiz_loop();
    let themes = services.theme();
    let mut theme = themes.load().await?;
    let mut session = quiz.start_session(services.bank()).await;
    quiz.next_question(&mut session)?;
    show(&session, theme);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "q" | "Q" => break,
            "t" | "T" => {
                theme = themes.toggle().await?;
                println!("{}", messages::theme_set(theme.as_str()));
                show(&session, theme);
                continue;
            }
            "r" | "R" => {
                if confirm(&mut lines).await? {
                    quiz.reset_progress(&mut session).await?;
                    println!("{}", messages::RESET_DONE);
                } else {
                    println!("{}", messages::RESET_CANCELLED);
                }
                show(&session, theme);
                continue;
            }
            _ => {}
        }

        let Some(key) = Key::from_line(&line) else {
            continue;
        };
        match InputCommand::from_key(key, session.is_answered()) {
            Some(InputCommand::Select(index)) => {
                if answer(&quiz, &mut session, index).await {
                    show(&session, theme);
                }
            }
            Some(InputCommand::Next) => {
                quiz.next_question(&mut session)?;
                show(&session, theme);
            }
            None => {}
        }
    }

    println!("{}", score_text(&ScoreView::from_progress(session.progress())));
    Ok(())
}
