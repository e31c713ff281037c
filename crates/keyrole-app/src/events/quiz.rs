use std::sync::Arc;

use kanal::AsyncSender;
use keyrole_core::{AnswerOutcome, QuizSession, QuizState, speak_or_log};
use keyrole_types::{AppEvent, UiCommand, WordId};

use super::Session;
use crate::state::AppState;

const NO_QUIZ: &str = "No quiz running, type quiz to start one";

pub async fn handle_quiz(
    session: &mut Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    command: UiCommand,
) -> anyhow::Result<()> {
    if let UiCommand::StartQuiz = command {
        let quiz = QuizSession::start(
            session.progress.vocabulary(),
            &session.progress.state().learned_ids,
            &mut session.rng,
        );
        let view = quiz.view();
        session.quiz = Some(quiz);
        app_to_ui_tx.send(AppEvent::ShowQuiz(view)).await?;
        return Ok(());
    }

    if let UiCommand::ExitQuiz = command {
        let event = match session.quiz.take() {
            Some(_) => {
                tracing::info!("Quiz closed");
                session.word_list()
            }
            None => AppEvent::Status(NO_QUIZ.to_string()),
        };
        app_to_ui_tx.send(event).await?;
        return Ok(());
    }

    let Some(quiz) = session.quiz.as_mut() else {
        app_to_ui_tx.send(AppEvent::Status(NO_QUIZ.to_string())).await?;
        return Ok(());
    };

    let event = match command {
        UiCommand::Answer(number) => match quiz.select_option(number) {
            AnswerOutcome::Correct | AnswerOutcome::Incorrect => AppEvent::ShowQuiz(quiz.view()),
            AnswerOutcome::InvalidOption => {
                let count = quiz
                    .current_question()
                    .map(|q| q.options.len())
                    .unwrap_or_default();
                AppEvent::Status(format!("Pick an option between 1 and {count}"))
            }
            AnswerOutcome::Ignored => ignored(quiz.state()),
        },
        UiCommand::Next => match quiz.state() {
            QuizState::Answered => {
                quiz.advance();
                AppEvent::ShowQuiz(quiz.view())
            }
            other => ignored(other),
        },
        UiCommand::Restart => {
            if quiz.restart(&mut session.rng) {
                AppEvent::ShowQuiz(quiz.view())
            } else {
                AppEvent::Status("Restart is available once the quiz is finished".to_string())
            }
        }
        other => {
            tracing::warn!("Unhandled quiz command: {:?}", other);
            return Ok(());
        }
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}

/// Hint for a quiz command that does not apply in `state`
fn ignored(state: QuizState) -> AppEvent {
    let hint = match state {
        QuizState::Empty => "No Words to Quiz, type exit",
        QuizState::InProgress => "Pick an answer first",
        QuizState::Answered => "Already answered, type next",
        QuizState::Completed => "Quiz finished, type restart or exit",
    };
    AppEvent::Status(hint.to_string())
}

/// Speak a word by id, or the current quiz term
pub async fn handle_speak(
    state: &Arc<AppState>,
    session: &Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: Option<WordId>,
) -> anyhow::Result<()> {
    let language = state.config.read().await.speech.language.clone();

    match id {
        Some(id) => match session.progress.vocabulary().get(id) {
            Some(word) => speak_or_log(state.speaker.as_ref(), &word.spanish, &language),
            None => {
                app_to_ui_tx
                    .send(AppEvent::Status(format!("Word {id} not found")))
                    .await?;
            }
        },
        None => match session.quiz.as_ref().filter(|q| q.current_question().is_some()) {
            Some(quiz) => quiz.speak_current(state.speaker.as_ref(), &language),
            None => {
                app_to_ui_tx
                    .send(AppEvent::Status("Usage: speak <id>".to_string()))
                    .await?;
            }
        },
    }

    Ok(())
}
