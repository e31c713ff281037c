use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use keyrole_core::{FilterQuery, ProgressManager, QuizSession, filter_words};
use keyrole_types::{AppEvent, UiCommand, ViewMode, WordEntry, WordId, WordRow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod assist;
pub mod browse;
pub mod quiz;

use assist::{handle_assist_ready, handle_assist_request, handle_stored_mnemonic};
use browse::handle_browse;
use quiz::handle_quiz;

/// Mutable learning state, owned by the event loop alone
pub struct Session {
    pub progress: ProgressManager,
    pub query: FilterQuery,
    pub view: ViewMode,
    pub quiz: Option<QuizSession>,
    pub rng: StdRng,
}

impl Session {
    pub fn new(state: &AppState, key: &str, view: ViewMode, rng: StdRng) -> Self {
        Self {
            progress: ProgressManager::load_with_key(
                state.vocabulary.clone(),
                state.store.clone(),
                key,
            ),
            query: FilterQuery::default(),
            view,
            quiz: None,
            rng,
        }
    }

    pub fn row(&self, entry: &WordEntry) -> WordRow {
        WordRow {
            entry: entry.clone(),
            learned: self.progress.is_learned(entry.id),
            favorite: self.progress.is_favorite(entry.id),
        }
    }

    pub fn find_row(&self, id: WordId) -> Option<WordRow> {
        self.progress.vocabulary().get(id).map(|e| self.row(e))
    }

    /// Current filtered listing
    pub fn word_list(&self) -> AppEvent {
        let rows = filter_words(self.progress.vocabulary(), &self.query, self.progress.state())
            .into_iter()
            .map(|e| self.row(e))
            .collect();

        AppEvent::ShowWords {
            rows,
            view: self.view,
            filter: self.query.category.clone(),
            search: self.query.search.clone(),
            summary: self.progress.summary(),
        }
    }
}

const QUIZ_OPEN: &str = "Finish or exit the quiz first";

fn allowed_during_quiz(command: &UiCommand) -> bool {
    matches!(
        command,
        UiCommand::StartQuiz
            | UiCommand::Answer(_)
            | UiCommand::Next
            | UiCommand::Restart
            | UiCommand::ExitQuiz
            | UiCommand::Speak(_)
            | UiCommand::Help
            | UiCommand::Quit
    )
}

enum Flow {
    Continue,
    Quit,
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (key, view) = {
        let config = state.config.read().await;
        (config.storage.key.clone(), config.ui.view_mode)
    };
    let mut session = Session::new(&state, &key, view, StdRng::from_entropy());

    app_to_ui_tx.send(session.word_list()).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        let flow = handle_events(&state, &mut session, &ui_to_app_tx, &app_to_ui_tx, event).await?;
        if let Flow::Quit = flow {
            tracing::info!("[EVENT_LOOP] Quit requested");
            app_to_ui_tx.send(AppEvent::Shutdown).await?;
            break;
        }
    }

    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    session: &mut Session,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    match event {
        AppEvent::Command(command) => {
            return handle_command(state, session, ui_to_app_tx, app_to_ui_tx, command).await;
        }
        AppEvent::AssistReady { id, kind, text } => {
            handle_assist_ready(session, app_to_ui_tx, id, kind, text).await?;
        }
        AppEvent::Shutdown => return Ok(Flow::Quit),
        _ => {
            // Render events only flow towards the UI
            tracing::warn!("Ignoring render event sent to the event loop");
        }
    }

    Ok(Flow::Continue)
}

async fn handle_command(
    state: &Arc<AppState>,
    session: &mut Session,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    command: UiCommand,
) -> anyhow::Result<Flow> {
    tracing::debug!("Command: {:?}", command);

    // An open quiz is modal until exit
    if session.quiz.is_some() && !allowed_during_quiz(&command) {
        app_to_ui_tx
            .send(AppEvent::Status(QUIZ_OPEN.to_string()))
            .await?;
        return Ok(Flow::Continue);
    }

    match command {
        UiCommand::Quit => return Ok(Flow::Quit),
        UiCommand::Help => app_to_ui_tx.send(AppEvent::Help).await?,
        UiCommand::Mnemonic(id) => handle_stored_mnemonic(session, app_to_ui_tx, id).await?,
        UiCommand::Assist { id, kind } => {
            handle_assist_request(state, session, ui_to_app_tx, app_to_ui_tx, id, kind).await?
        }
        UiCommand::Speak(id) => quiz::handle_speak(state, session, app_to_ui_tx, id).await?,
        UiCommand::StartQuiz
        | UiCommand::Answer(_)
        | UiCommand::Next
        | UiCommand::Restart
        | UiCommand::ExitQuiz => handle_quiz(session, app_to_ui_tx, command).await?,
        command => handle_browse(session, app_to_ui_tx, command).await?,
    }

    Ok(Flow::Continue)
}
