//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Roster entry in the classroom detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetailDto {
    pub student_id: String,
    pub name: String,
    /// RFC 3339 formatted
    pub joined_at: String,
}

/// Classroom detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassroomDetailDto {
    pub id: String,
    /// RFC 3339 formatted
    pub created_at: String,
    pub roster: Vec<StudentDetailDto>,
    /// Students that currently have a focus record
    pub tracked_students: Vec<String>,
}

/// Current session response / request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub session_id: Option<String>,
}

/// One persisted focus-log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusLogRowDto {
    pub session_id: String,
    pub student_id: String,
    pub score: u8,
    pub is_tab_active: bool,
    pub is_face_detected: bool,
    /// RFC 3339 formatted
    pub logged_at: String,
}

/// Focus-log listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusLogDto {
    pub session_id: String,
    pub rows: Vec<FocusLogRowDto>,
}
