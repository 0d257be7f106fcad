//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{FocusSample, StudentId, StudentName},
    infrastructure::dto::websocket::{
        ClassFocusSnapshotMessage, ClassroomConnectedMessage, DistractedStudentMessage,
        FocusUpdateMessage, JoinMessage, MessageEnvelope, MessageType, SignalMessage,
        StudentFocusDto,
    },
    ui::state::AppState,
};

use serde::Deserialize;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub student_id: String,
    pub name: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let student_id_str = query.student_id;

    // Convert String -> StudentId (Domain Model)
    let student_id = match StudentId::try_from(student_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid student_id format: '{}'", student_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // An unusable display name falls back to the synthesized one
    let name = match query.name {
        Some(raw) => match StudentName::new(raw.clone()) {
            Ok(name) => Some(name),
            Err(_) => {
                tracing::warn!("Invalid display name '{}', using fallback", raw);
                None
            }
        },
        None => None,
    };

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Use JoinClassroomUseCase to handle connection
    // (register_client is called inside the UseCase)
    let student_id_for_handle = student_id.clone();
    match state
        .join_classroom_usecase
        .execute(student_id, name, tx)
        .await
    {
        Ok(_joined_at) => {
            tracing::info!("Student '{}' connected and registered", student_id_str);
            Ok(ws.on_upgrade(move |socket| {
                handle_socket(socket, state, student_id_str, rx, student_id_for_handle)
            }))
        }
        Err(crate::usecase::JoinError::DuplicateStudentId(_)) => {
            tracing::warn!(
                "Student with ID '{}' is already connected. Rejecting connection.",
                student_id_str
            );
            Err(StatusCode::CONFLICT)
        }
        Err(crate::usecase::JoinError::RosterCapacityExceeded) => {
            tracing::warn!(
                "Classroom roster is full. Cannot register student '{}'",
                student_id_str
            );
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: snapshots, alerts and
/// relayed events addressed to this client are sent to its WebSocket
/// connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    student_id_str: String,
    rx: mpsc::UnboundedReceiver<String>,
    student_id: StudentId,
) {
    let (mut sender, mut receiver) = socket.split();

    // Send the current classroom state to the newly connected client
    {
        match state.get_classroom_usecase.execute().await {
            Ok(classroom) => {
                // Domain Model から DTO への変換
                let students: Vec<StudentFocusDto> = classroom
                    .focus_snapshot()
                    .into_iter()
                    .map(Into::into)
                    .collect();

                let connected_msg = ClassroomConnectedMessage {
                    r#type: MessageType::ClassroomConnected,
                    classroom_id: classroom.id.as_str().to_string(),
                    students,
                };

                let connected_json = serde_json::to_string(&connected_msg).unwrap();
                if let Err(e) = sender.send(Message::Text(connected_json.into())).await {
                    tracing::error!(
                        "Failed to send classroom state to '{}': {}",
                        student_id_str,
                        e
                    );
                    return;
                }
                tracing::info!("Sent classroom state to '{}'", student_id_str);
            }
            Err(e) => {
                tracing::warn!("Failed to load classroom state: {}", e);
            }
        }
    }

    let student_id_clone = student_id.clone();
    let student_id_str_clone = student_id_str.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_message(&state_clone, &student_id_clone, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Student '{}' requested close", student_id_str_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive messages from other clients and send to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Delete the focus record immediately. The roster entry stays, and any
    // in-flight persistence for this student is not cancelled.
    state.leave_classroom_usecase.execute(&student_id).await;
    tracing::info!(
        "Student '{}' disconnected and focus record removed",
        student_id_str
    );
}

/// Dispatch an inbound text frame on its `type` field.
///
/// Malformed frames and unknown event names are logged and dropped; nothing
/// on this path can take the session down.
async fn dispatch_message(state: &Arc<AppState>, student_id: &StudentId, text: &str) {
    let envelope = match serde_json::from_str::<MessageEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Failed to parse message as JSON: {}", e);
            return;
        }
    };

    match envelope.r#type {
        MessageType::FocusUpdate => handle_focus_update(state, student_id, text).await,
        MessageType::Join => handle_join(state, student_id, text).await,
        MessageType::Signal => handle_signal(state, student_id, text).await,
        MessageType::NewQuestion
        | MessageType::SubmitAnswer
        | MessageType::AnswerResult
        | MessageType::LeaderboardUpdate => {
            // Presentation-layer events stay available on this channel but
            // are relayed opaquely, without interpretation
            if let Err(e) = state
                .relay_event_usecase
                .broadcast_from(student_id, text)
                .await
            {
                tracing::warn!("Failed to relay event: {}", e);
            }
        }
        MessageType::DistractedStudent
        | MessageType::ClassFocusSnapshot
        | MessageType::ClassroomConnected => {
            tracing::warn!(
                "Ignoring server-originated message type from '{}'",
                student_id.as_str()
            );
        }
    }
}

async fn handle_focus_update(state: &Arc<AppState>, student_id: &StudentId, text: &str) {
    let update = match serde_json::from_str::<FocusUpdateMessage>(text) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Failed to parse focus_update: {}", e);
            return;
        }
    };

    // Convert DTO -> Domain Model (validates the score)
    let sample = match FocusSample::try_from(update) {
        Ok(sample) => sample,
        Err(e) => {
            tracing::warn!(
                "Rejected focus update from '{}': {}",
                student_id.as_str(),
                e
            );
            return;
        }
    };

    let outcome = state
        .record_focus_usecase
        .execute(student_id.clone(), sample)
        .await;

    // Distraction alert goes to every connected client, not just the teacher
    if outcome.distracted {
        let alert = DistractedStudentMessage {
            r#type: MessageType::DistractedStudent,
            student_id: student_id.as_str().to_string(),
            student_name: outcome.student_name.as_str().to_string(),
            score: sample.score.value(),
            cause: outcome
                .cause
                .map(|c| c.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
        };

        let alert_json = serde_json::to_string(&alert).unwrap();
        if let Err(e) = state.record_focus_usecase.broadcast_alert(&alert_json).await {
            tracing::warn!("Failed to broadcast distraction alert: {}", e);
        }
    }

    // The snapshot is rebuilt and broadcast on every single update
    let snapshot_msg = ClassFocusSnapshotMessage {
        r#type: MessageType::ClassFocusSnapshot,
        students: outcome.snapshot.into_iter().map(Into::into).collect(),
    };

    let snapshot_json = serde_json::to_string(&snapshot_msg).unwrap();
    if let Err(e) = state
        .record_focus_usecase
        .broadcast_snapshot(&snapshot_json)
        .await
    {
        tracing::warn!("Failed to broadcast class snapshot: {}", e);
    }

    // Persist after the broadcasts; failures never surface to clients
    state.record_focus_usecase.persist(student_id, &sample).await;
}

async fn handle_join(state: &Arc<AppState>, student_id: &StudentId, text: &str) {
    let join = match serde_json::from_str::<JoinMessage>(text) {
        Ok(join) => join,
        Err(e) => {
            tracing::warn!("Failed to parse join: {}", e);
            return;
        }
    };

    match StudentName::new(join.name) {
        Ok(name) => {
            if let Err(e) = state
                .join_classroom_usecase
                .update_name(student_id, name)
                .await
            {
                tracing::warn!(
                    "Failed to update name for '{}': {}",
                    student_id.as_str(),
                    e
                );
            }
        }
        Err(e) => {
            tracing::warn!(
                "Rejected display name from '{}': {}",
                student_id.as_str(),
                e
            );
        }
    }
}

async fn handle_signal(state: &Arc<AppState>, student_id: &StudentId, text: &str) {
    let mut signal = match serde_json::from_str::<SignalMessage>(text) {
        Ok(signal) => signal,
        Err(e) => {
            tracing::warn!("Failed to parse signal: {}", e);
            return;
        }
    };

    let Some(target_str) = signal.target.take() else {
        tracing::warn!("Signal from '{}' without target", student_id.as_str());
        return;
    };

    let target = match StudentId::try_from(target_str.clone()) {
        Ok(target) => target,
        Err(_) => {
            tracing::warn!("Invalid signal target: '{}'", target_str);
            return;
        }
    };

    // Move-forward the payload with the sender stamped on
    signal.sender = Some(student_id.as_str().to_string());

    let forwarded = serde_json::to_string(&signal).unwrap();
    if let Err(e) = state
        .relay_event_usecase
        .forward_to(&target, &forwarded)
        .await
    {
        tracing::warn!("Failed to forward signal to '{}': {}", target.as_str(), e);
    }
}
