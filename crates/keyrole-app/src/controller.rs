use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use keyrole_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity), // renders
            ui_to_app: kanal::bounded_async(capacity), // typed commands
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let capacity = state.config.read().await.channel_capacity.max(1);
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Renderer
        let max_rows = self.state.config.read().await.ui.max_rows;
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            max_rows,
            self.cancel_token.child_token(),
        ));

        // stdin blocks, so it runs on a plain thread outside the runtime
        spawn_stdin_reader(
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        );

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
