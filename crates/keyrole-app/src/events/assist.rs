use std::sync::Arc;

use kanal::AsyncSender;
use keyrole_assistant::request_or_fallback;
use keyrole_types::{AppEvent, AssistKind, WordId};

use super::Session;
use crate::state::AppState;

/// Mnemonic bundled with the vocabulary, no network involved
pub async fn handle_stored_mnemonic(
    session: &Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: WordId,
) -> anyhow::Result<()> {
    let event = match session.progress.vocabulary().get(id) {
        Some(word) => match &word.mnemonic {
            Some(text) => AppEvent::ShowAssist {
                term: word.spanish.clone(),
                kind: AssistKind::Mnemonic,
                text: text.clone(),
            },
            None => AppEvent::Status(format!(
                "No stored mnemonic for {}, try: ai {id}",
                word.spanish
            )),
        },
        None => AppEvent::Status(format!("Word {id} not found")),
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}

/// Fire the request on its own task, the answer comes back as `AssistReady`
pub async fn handle_assist_request(
    state: &Arc<AppState>,
    session: &Session,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: WordId,
    kind: AssistKind,
) -> anyhow::Result<()> {
    let Some(word) = session.progress.vocabulary().get(id).cloned() else {
        app_to_ui_tx
            .send(AppEvent::Status(format!("Word {id} not found")))
            .await?;
        return Ok(());
    };

    app_to_ui_tx
        .send(AppEvent::Status(format!(
            "Asking AI for a {} of {}...",
            kind.label().to_lowercase(),
            word.spanish
        )))
        .await?;

    let assistant = state.assistant.clone();
    let tx = ui_to_app_tx.clone();
    tokio::spawn(async move {
        let text = request_or_fallback(assistant.as_ref(), &word, kind).await;
        if let Err(e) = tx.send(AppEvent::AssistReady { id, kind, text }).await {
            tracing::error!("Failed to deliver {} for word {}: {}", kind.label(), id, e);
        }
    });

    Ok(())
}

pub async fn handle_assist_ready(
    session: &Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: WordId,
    kind: AssistKind,
    text: String,
) -> anyhow::Result<()> {
    let term = session
        .progress
        .vocabulary()
        .get(id)
        .map(|w| w.spanish.clone())
        .unwrap_or_else(|| id.to_string());

    app_to_ui_tx
        .send(AppEvent::ShowAssist { term, kind, text })
        .await?;
    Ok(())
}
