//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::SessionId,
    infrastructure::dto::http::{
        ClassroomDetailDto, FocusLogDto, FocusLogRowDto, SessionDto, StudentDetailDto,
    },
    infrastructure::dto::websocket::StudentFocusDto,
    ui::state::AppState,
};
use miharu_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the classroom state (roster plus tracked students)
pub async fn get_classroom(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClassroomDetailDto>, StatusCode> {
    let classroom = state
        .get_classroom_usecase
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Domain Model から DTO への変換
    let mut tracked_students: Vec<String> = classroom
        .focus
        .keys()
        .map(|id| id.as_str().to_string())
        .collect();
    tracked_students.sort();

    let classroom_detail = ClassroomDetailDto {
        id: classroom.id.as_str().to_string(),
        created_at: timestamp_to_rfc3339(classroom.created_at.value()),
        roster: classroom
            .roster
            .iter()
            .map(|profile| StudentDetailDto {
                student_id: profile.id.as_str().to_string(),
                name: profile.name.as_str().to_string(),
                joined_at: timestamp_to_rfc3339(profile.joined_at.value()),
            })
            .collect(),
        tracked_students,
    };

    Ok(Json(classroom_detail))
}

/// Get the current classroom focus snapshot
pub async fn get_class_focus(State(state): State<Arc<AppState>>) -> Json<Vec<StudentFocusDto>> {
    let snapshot = state.get_classroom_usecase.focus_snapshot().await;
    Json(snapshot.into_iter().map(Into::into).collect())
}

/// Get the current session id
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionDto> {
    let current = state.manage_session_usecase.current().await;
    Json(SessionDto {
        session_id: current.map(|id| id.into_string()),
    })
}

/// Start a session (generates an id when none is supplied)
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<SessionDto>>,
) -> Result<Json<SessionDto>, StatusCode> {
    let requested = match payload.and_then(|Json(dto)| dto.session_id) {
        Some(raw) => match SessionId::new(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Rejected session id: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        None => None,
    };

    let started = state
        .manage_session_usecase
        .start(requested)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    tracing::info!("Session '{}' started", started.as_str());
    Ok(Json(SessionDto {
        session_id: Some(started.into_string()),
    }))
}

/// End the current session
pub async fn end_session(State(state): State<Arc<AppState>>) -> Json<SessionDto> {
    let ended = state.manage_session_usecase.end().await;
    if let Some(id) = &ended {
        tracing::info!("Session '{}' ended", id.as_str());
    }
    Json(SessionDto {
        session_id: ended.map(|id| id.into_string()),
    })
}

/// Get persisted focus-log rows for a session
pub async fn get_session_logs(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<FocusLogDto>, StatusCode> {
    let session_id = SessionId::new(session_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let rows = state.get_focus_log_usecase.execute(&session_id).await;

    // Domain Model から DTO への変換
    let row_dtos: Vec<FocusLogRowDto> = rows
        .into_iter()
        .map(|row| FocusLogRowDto {
            session_id: row.session_id.into_string(),
            student_id: row.student_id.into_string(),
            score: row.score.value(),
            is_tab_active: row.is_tab_active,
            is_face_detected: row.is_face_detected,
            logged_at: timestamp_to_rfc3339(row.logged_at.value()),
        })
        .collect();

    Ok(Json(FocusLogDto {
        session_id: session_id.into_string(),
        rows: row_dtos,
    }))
}
