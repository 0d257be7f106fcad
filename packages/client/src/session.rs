//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use miharu_server::infrastructure::dto::websocket::{
    AnswerResultMessage, ClassFocusSnapshotMessage, ClassroomConnectedMessage,
    DistractedStudentMessage, LeaderboardUpdateMessage, MessageEnvelope, MessageType,
    NewQuestionMessage, SubmitAnswerMessage,
};
use miharu_shared::time::now_utc_millis;

use super::{
    error::ClientError,
    formatter::MessageFormatter,
    sampler::{FocusSampler, SamplerHandle},
    ui::redisplay_prompt,
};

/// Run the focus-reporting client session
pub async fn run_client_session(
    url: &str,
    student_id: &str,
    display_name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Construct URL with student_id (and optional display name) as query parameters
    let url = match display_name {
        Some(name) => format!("{}?student_id={}&name={}", url, student_id, name),
        None => format!("{}?student_id={}", url, student_id),
    };

    let (ws_stream, response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            // Check if it's an HTTP error response
            let error_msg = e.to_string();

            // Check for HTTP 409 Conflict
            if error_msg.contains("409") || error_msg.contains("Conflict") {
                return Err(Box::new(ClientError::DuplicateStudentId(
                    student_id.to_string(),
                )));
            }

            return Err(Box::new(ClientError::ConnectionError(error_msg)));
        }
    };

    // Check HTTP status code from response
    if response.status().as_u16() == 409 {
        return Err(Box::new(ClientError::DuplicateStudentId(
            student_id.to_string(),
        )));
    }

    tracing::info!("Connected to classroom server!");
    println!(
        "\nYou are '{}'. Focus reporting is active.\n\
         Commands: hide / show / noface / face / answer <text> / status / quit\n",
        student_id
    );

    let (mut write, mut read) = ws_stream.split();

    // Outbound channel: sampler reports and command-driven frames share it
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

    // Start the focus sampler (reports every 5 seconds until the session ends)
    let mut sampler = FocusSampler::new(out_tx.clone());
    let sampler_handle = sampler.handle();
    sampler.start();

    // The most recent question id, shared between the read loop and commands
    let current_question: Arc<Mutex<Option<i64>>> = Arc::new(Mutex::new(None));

    let student_id_for_read = student_id.to_string();
    let question_for_read = current_question.clone();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    handle_server_message(&text, &student_id_for_read, &question_for_read).await;
                }
                Ok(Message::Binary(data)) => {
                    let formatted = MessageFormatter::format_binary_message(data.len());
                    print!("{}", formatted);
                    redisplay_prompt(&student_id_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Spawn a task to drain the outbound channel into the socket
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(json) = out_rx.recv().await {
            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let student_id_for_prompt = student_id.to_string();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", student_id_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Command loop: drives the simulated visibility/face signals and answers
    let handle_for_commands = sampler_handle.clone();
    let out_tx_for_commands = out_tx.clone();
    let question_for_commands = current_question.clone();
    let mut command_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let keep_running = handle_command(
                &line,
                &handle_for_commands,
                &out_tx_for_commands,
                &question_for_commands,
            )
            .await;
            if !keep_running {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the others
    let result = tokio::select! {
        read_result = &mut read_task => {
            command_task.abort();
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )) as Box<dyn std::error::Error>)
            } else {
                Ok(())
            }
        }
        _ = &mut command_task => {
            // User exit
            read_task.abort();
            write_task.abort();
            Ok(())
        }
        write_result = &mut write_task => {
            read_task.abort();
            command_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )) as Box<dyn std::error::Error>)
            } else {
                Ok(())
            }
        }
    };

    sampler.stop();

    result
}

/// Parse and render one inbound frame
async fn handle_server_message(
    text: &str,
    current_student_id: &str,
    current_question: &Arc<Mutex<Option<i64>>>,
) {
    let envelope = match serde_json::from_str::<MessageEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(_) => {
            // If not a known frame, display as raw text
            let formatted = MessageFormatter::format_raw_message(text);
            print!("{}", formatted);
            redisplay_prompt(current_student_id);
            return;
        }
    };

    match envelope.r#type {
        MessageType::ClassroomConnected => {
            if let Ok(msg) = serde_json::from_str::<ClassroomConnectedMessage>(text) {
                let formatted =
                    MessageFormatter::format_classroom_connected(&msg.students, current_student_id);
                print!("{}", formatted);
                redisplay_prompt(current_student_id);
            }
        }
        MessageType::ClassFocusSnapshot => {
            if let Ok(msg) = serde_json::from_str::<ClassFocusSnapshotMessage>(text) {
                let formatted =
                    MessageFormatter::format_snapshot(&msg.students, current_student_id);
                print!("{}", formatted);
                redisplay_prompt(current_student_id);
            }
        }
        MessageType::DistractedStudent => {
            if let Ok(msg) = serde_json::from_str::<DistractedStudentMessage>(text) {
                let formatted =
                    MessageFormatter::format_distraction_alert(&msg, current_student_id);
                print!("{}", formatted);
                redisplay_prompt(current_student_id);
            }
        }
        MessageType::NewQuestion => {
            if let Ok(msg) = serde_json::from_str::<NewQuestionMessage>(text) {
                {
                    let mut question = current_question.lock().await;
                    *question = Some(msg.timestamp);
                }
                let formatted = MessageFormatter::format_question(&msg);
                print!("{}", formatted);
                redisplay_prompt(current_student_id);
            }
        }
        MessageType::AnswerResult => {
            if let Ok(msg) = serde_json::from_str::<AnswerResultMessage>(text) {
                let formatted = MessageFormatter::format_answer_result(&msg);
                print!("{}", formatted);
                redisplay_prompt(current_student_id);
            }
        }
        MessageType::LeaderboardUpdate => {
            if let Ok(msg) = serde_json::from_str::<LeaderboardUpdateMessage>(text) {
                let formatted =
                    MessageFormatter::format_leaderboard(&msg.entries, current_student_id);
                print!("{}", formatted);
                redisplay_prompt(current_student_id);
            }
        }
        MessageType::Signal => {
            // Peer-signaling payloads are consumed by the video layer, which
            // this CLI does not carry
            tracing::debug!("Ignoring signal payload");
        }
        _ => {
            let formatted = MessageFormatter::format_raw_message(text);
            print!("{}", formatted);
            redisplay_prompt(current_student_id);
        }
    }
}

/// Execute one user command. Returns false when the session should end.
async fn handle_command(
    line: &str,
    sampler_handle: &SamplerHandle,
    out_tx: &mpsc::UnboundedSender<String>,
    current_question: &Arc<Mutex<Option<i64>>>,
) -> bool {
    match line.trim() {
        "hide" => {
            sampler_handle.set_tab_active(false).await;
            println!("Tab marked hidden (applies at the next report)");
        }
        "show" => {
            sampler_handle.set_tab_active(true).await;
            println!("Tab marked visible (applies at the next report)");
        }
        "noface" => {
            sampler_handle.set_face_detected(false).await;
            println!("Face marked absent (applies at the next report)");
        }
        "face" => {
            sampler_handle.set_face_detected(true).await;
            println!("Face marked present (applies at the next report)");
        }
        "status" => {
            println!(
                "Current focus score: {}",
                sampler_handle.current_score().await
            );
        }
        "quit" | "exit" => {
            return false;
        }
        other => {
            if let Some(answer) = other.strip_prefix("answer ") {
                let question_id = *current_question.lock().await;
                match question_id {
                    Some(question_id) => {
                        let msg = SubmitAnswerMessage {
                            r#type: MessageType::SubmitAnswer,
                            question_id,
                            answer: answer.to_string(),
                            submit_time: now_utc_millis(),
                        };
                        match serde_json::to_string(&msg) {
                            Ok(json) => {
                                if out_tx.send(json).is_err() {
                                    return false;
                                }
                                println!("Answer submitted");
                            }
                            Err(e) => {
                                tracing::error!("Failed to serialize answer: {}", e);
                            }
                        }
                    }
                    None => {
                        println!("No active question to answer");
                    }
                }
            } else {
                println!("Commands: hide / show / noface / face / answer <text> / status / quit");
            }
        }
    }

    true
}
