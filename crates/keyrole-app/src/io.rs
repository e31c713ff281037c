use std::io::BufRead;
use std::thread::JoinHandle;

use kanal::AsyncSender;
use keyrole_types::{AppEvent, UiCommand};

use crate::command::parse_command;

/// Read typed commands line by line until end of input.
///
/// Parse errors go straight to the renderer, commands go to the event loop.
/// End of input counts as `quit`.
pub fn spawn_stdin_reader(
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        read_commands(stdin.lock(), &ui_to_app_tx, &app_to_ui_tx);
    })
}

pub fn read_commands(
    input: impl BufRead,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) {
    let commands = ui_to_app_tx.clone_sync();
    let statuses = app_to_ui_tx.clone_sync();

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                let quit = command == UiCommand::Quit;
                if commands.send(AppEvent::Command(command)).is_err() {
                    tracing::debug!("Event loop gone, input reader stopping");
                    return;
                }
                if quit {
                    return;
                }
            }
            Err(message) => {
                if statuses.send(AppEvent::Status(message)).is_err() {
                    return;
                }
            }
        }
    }

    tracing::info!("End of input");
    commands.send(AppEvent::Command(UiCommand::Quit)).ok();
}
