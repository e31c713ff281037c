use kanal::AsyncSender;
use keyrole_types::{AppEvent, CategoryFilter, UiCommand};

use super::Session;

/// Listing, filtering and progress toggles
pub async fn handle_browse(
    session: &mut Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    command: UiCommand,
) -> anyhow::Result<()> {
    match command {
        UiCommand::Search(text) => {
            session.query.search = text;
            app_to_ui_tx.send(session.word_list()).await?;
        }
        UiCommand::Category(CategoryFilter::All) => {
            session.query.category = CategoryFilter::All;
            app_to_ui_tx.send(session.word_list()).await?;
        }
        UiCommand::Category(CategoryFilter::Only(label)) => {
            let canonical = session
                .progress
                .vocabulary()
                .categories()
                .iter()
                .find(|c| c.eq_ignore_ascii_case(&label))
                .cloned();

            match canonical {
                Some(category) => {
                    session.query.category = CategoryFilter::Only(category);
                    app_to_ui_tx.send(session.word_list()).await?;
                }
                None => {
                    let status = format!("Unknown category '{label}', type categories to list them");
                    app_to_ui_tx.send(AppEvent::Status(status)).await?;
                }
            }
        }
        UiCommand::ListCategories => {
            let labels = session.progress.vocabulary().selector_labels();
            app_to_ui_tx.send(AppEvent::ShowCategories(labels)).await?;
        }
        UiCommand::ClearFilters => {
            session.query.clear();
            app_to_ui_tx.send(session.word_list()).await?;
        }
        UiCommand::SetView(mode) => {
            session.view = mode;
            app_to_ui_tx.send(session.word_list()).await?;
        }
        UiCommand::List => {
            app_to_ui_tx.send(session.word_list()).await?;
        }
        UiCommand::ToggleLearned(id) => {
            let status = match session.progress.toggle_learned(id) {
                Ok(true) => format!("Marked word {id} as learned"),
                Ok(false) => format!("Word {id} is no longer learned"),
                Err(e) => e.to_string(),
            };
            app_to_ui_tx.send(AppEvent::Status(status)).await?;
            app_to_ui_tx.send(session.word_list()).await?;
        }
        UiCommand::ToggleFavorite(id) => {
            let status = match session.progress.toggle_favorite(id) {
                Ok(true) => format!("Added word {id} to favorites"),
                Ok(false) => format!("Removed word {id} from favorites"),
                Err(e) => e.to_string(),
            };
            app_to_ui_tx.send(AppEvent::Status(status)).await?;
        }
        UiCommand::Show(id) => {
            let event = match session.find_row(id) {
                Some(row) => AppEvent::ShowWord(row),
                None => AppEvent::Status(format!("Word {id} not found")),
            };
            app_to_ui_tx.send(event).await?;
        }
        UiCommand::Stats => {
            app_to_ui_tx
                .send(AppEvent::ShowSummary(session.progress.summary()))
                .await?;
        }
        other => {
            tracing::warn!("Unhandled browse command: {:?}", other);
        }
    }

    Ok(())
}
