//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tebak_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tebak_shared::time::get_timestamp;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{
    domain::{PromptCommand, parse_prompt_line},
    error::ClientError,
    formatter::EventFormatter,
    ui::{PROMPT, redisplay_prompt},
};

fn change_username_frame(username: &str) -> Result<Message, ClientError> {
    let frame = serde_json::to_string(&ClientMessage::ChangeUsername(username.to_string()))
        .map_err(|e| ClientError::InvalidMessage(e.to_string()))?;
    Ok(Message::Text(frame.into()))
}

/// Run one client session.
///
/// Returns `Ok(())` when the user quits and an error when the connection
/// is lost.
pub async fn run_client_session(url: &str, username: Option<&str>) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to relay!");
    println!(
        "\nType a live username and press Enter to switch the relay. /clear clears it, /quit exits.\n"
    );

    let (mut write, mut read) = ws_stream.split();

    if let Some(username) = username {
        write
            .send(change_username_frame(username)?)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    }

    // Spawn a task to print incoming events
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(message) => EventFormatter::format(&message, get_timestamp()),
                        Err(_) => EventFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Relay closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<PromptCommand>();

    // rustyline is blocking, so it gets its own thread
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let Some(command) = parse_prompt_line(&line) else {
                        continue;
                    };
                    rl.add_history_entry(line.trim()).ok();
                    let quit = command == PromptCommand::Quit;
                    if input_tx.send(command).is_err() || quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    input_tx.send(PromptCommand::Quit).ok();
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    input_tx.send(PromptCommand::Quit).ok();
                    break;
                }
            }
        }
    });

    let mut write_task = tokio::spawn(async move {
        while let Some(command) = input_rx.recv().await {
            let username = match command {
                PromptCommand::ChangeTarget(username) => username,
                PromptCommand::ClearTarget => String::new(),
                PromptCommand::Quit => {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                }
            };
            let frame = change_username_frame(&username)?;
            write
                .send(frame)
                .await
                .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        }
        Ok::<(), ClientError>(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.map_err(|e| ClientError::ConnectionError(e.to_string()))?
        }
    }
}
