use std::sync::Arc;

use quiz_core::model::{Question, QuestionId};
use quiz_core::time::fixed_clock;
use services::{AppServices, InputCommand, Key, QuestionView, SessionPhase};
use storage::questions::StaticQuestionSource;

fn arithmetic_source() -> Arc<StaticQuestionSource> {
    let questions = [
        (1, "1+1=?", "2"),
        (2, "2+2=?", "4"),
        (3, "3+3=?", "6"),
        (4, "4+4=?", "8"),
        (5, "5+5=?", "10"),
    ]
    .into_iter()
    .map(|(id, q, a)| Question::new(QuestionId::new(id), q, a).unwrap())
    .collect();
    Arc::new(StaticQuestionSource::new(questions))
}

#[tokio::test]
async fn keyboard_driven_rounds_persist_progress() {
    let app = AppServices::in_memory(arithmetic_source(), fixed_clock()).await;
    assert!(app.load_failure().is_none());

    let quiz = app.quiz_loop();
    let mut session = quiz.start_session(app.bank()).await;

    for round in 1..=10_u32 {
        quiz.next_question(&mut session).unwrap();
        let view = QuestionView::from_session(&session).unwrap();
        assert_eq!(view.choices.len(), 4);

        let key = Key::from_line("b").unwrap();
        let Some(InputCommand::Select(index)) = InputCommand::from_key(key, session.is_answered())
        else {
            panic!("expected a selection");
        };
        let outcome = quiz.answer_current(&mut session, index).await.unwrap().unwrap();
        assert_eq!(outcome.total_answered, round);
        assert!(outcome.score <= outcome.total_answered);

        // Double submission is swallowed.
        assert!(quiz.answer_current(&mut session, 0).await.unwrap().is_none());
        assert_eq!(
            InputCommand::from_key(Key::Enter, session.is_answered()),
            Some(InputCommand::Next)
        );
    }

    let stored = app.progress().load().await;
    assert_eq!(stored.total_answered(), 10);
    assert_eq!(stored.score(), session.progress().score());
}

#[tokio::test]
async fn failed_bank_load_leaves_session_idle() {
    let app = AppServices::in_memory(Arc::new(StaticQuestionSource::default()), fixed_clock()).await;
    assert!(app.load_failure().is_some());

    let quiz = app.quiz_loop();
    let mut session = quiz.start_session(app.bank()).await;

    assert!(quiz.next_question(&mut session).is_err());
    assert!(quiz.next_question(&mut session).is_err());
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(quiz.answer_current(&mut session, 0).await.unwrap().is_none());
}
