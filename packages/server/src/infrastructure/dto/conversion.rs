//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    entity::{FocusSample, StudentFocus},
    error::DomainError,
    value_object::{FocusScore, Timestamp},
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::FocusUpdateMessage> for FocusSample {
    type Error = DomainError;

    /// ワイヤから受け取ったスコアを検証してサンプルに変換する
    fn try_from(dto: dto::FocusUpdateMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp: Timestamp::new(dto.timestamp),
            is_tab_active: dto.is_tab_active,
            is_face_detected: dto.is_face_detected,
            score: FocusScore::new(dto.score)?,
        })
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<StudentFocus> for dto::StudentFocusDto {
    fn from(model: StudentFocus) -> Self {
        Self {
            student_id: model.student_id.into_string(),
            name: model.name.into_string(),
            score: model.score.value(),
            is_tab_active: model.is_tab_active,
        }
    }
}
