use std::io::Cursor;
use std::time::Duration;

use keyrole_types::{AppEvent, UiCommand};
use tokio::time::timeout;

use crate::io::read_commands;

async fn recv(rx: &kanal::AsyncReceiver<AppEvent>) -> AppEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out")
        .expect("channel closed")
}

#[tokio::test]
async fn test_lines_become_commands() {
    let (commands_tx, commands) = kanal::bounded_async(16);
    let (statuses_tx, statuses) = kanal::bounded_async(16);

    read_commands(
        Cursor::new("learn 4\n\n   \nbogus\nsearch pan\n"),
        &commands_tx,
        &statuses_tx,
    );

    assert!(matches!(
        recv(&commands).await,
        AppEvent::Command(UiCommand::ToggleLearned(4))
    ));
    assert!(matches!(
        recv(&commands).await,
        AppEvent::Command(UiCommand::Search(text)) if text == "pan"
    ));
    // end of input quits
    assert!(matches!(
        recv(&commands).await,
        AppEvent::Command(UiCommand::Quit)
    ));
    assert!(commands.is_empty());

    match recv(&statuses).await {
        AppEvent::Status(message) => assert!(message.contains("bogus")),
        other => panic!("expected status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_quit_stops_reading() {
    let (commands_tx, commands) = kanal::bounded_async(16);
    let (statuses_tx, _statuses) = kanal::bounded_async(16);

    read_commands(Cursor::new("q\nlist\n"), &commands_tx, &statuses_tx);

    assert!(matches!(
        recv(&commands).await,
        AppEvent::Command(UiCommand::Quit)
    ));
    assert!(commands.is_empty());
}
