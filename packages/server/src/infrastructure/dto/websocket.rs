//! WebSocket message DTOs.
//!
//! Every text frame is a JSON object whose `type` field carries the event
//! name. The event names and the camelCase payload fields of the focus events
//! are the wire contract with the existing presentation layer and must not
//! change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// WebSocket message types (the `type` field of every frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Client → server: periodic focus sample
    FocusUpdate,
    /// Client → server: display-name registration/update
    Join,
    /// Client → server / server → target: peer-signaling payload relay
    Signal,
    /// Server → all: distraction alert
    DistractedStudent,
    /// Server → all: full-classroom focus snapshot
    ClassFocusSnapshot,
    /// Server → new connection: current classroom state
    ClassroomConnected,
    /// Presentation-layer events relayed opaquely by the server
    NewQuestion,
    SubmitAnswer,
    AnswerResult,
    LeaderboardUpdate,
}

/// Envelope used to dispatch on the `type` field before full parsing
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope {
    pub r#type: MessageType,
}

/// Client → server focus sample (`focus_update`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusUpdateMessage {
    pub r#type: MessageType,
    /// Client-side sampling time (Unix millis); not trusted by the server
    pub timestamp: i64,
    pub is_tab_active: bool,
    pub is_face_detected: bool,
    pub score: u8,
}

/// Client → server display-name update (`join`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMessage {
    pub r#type: MessageType,
    pub name: String,
}

/// Peer-signaling relay (`signal`)
///
/// Inbound frames carry `target`; the relayed frame carries `sender` instead,
/// with the opaque signal payload forwarded untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    pub r#type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub signal: Value,
}

/// Server → all distraction alert (`distracted_student`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistractedStudentMessage {
    pub r#type: MessageType,
    pub student_id: String,
    pub student_name: String,
    pub score: u8,
    /// "Tab Switch" | "No Face" | "Unknown"
    pub cause: String,
}

/// One entry of the classroom focus snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFocusDto {
    pub student_id: String,
    pub name: String,
    pub score: u8,
    pub is_tab_active: bool,
}

/// Server → all classroom snapshot (`class_focus_snapshot`)
///
/// Emitted on every single `focus_update`; entries follow roster
/// registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFocusSnapshotMessage {
    pub r#type: MessageType,
    pub students: Vec<StudentFocusDto>,
}

/// Server → new connection (`classroom_connected`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomConnectedMessage {
    pub r#type: MessageType,
    pub classroom_id: String,
    pub students: Vec<StudentFocusDto>,
}

/// Teacher → students quiz prompt (`new_question`)
///
/// Relayed opaquely by the server; parsed only by the client presentation
/// layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestionMessage {
    pub r#type: MessageType,
    pub question_text: String,
    /// "mcq" | "free"
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub end_time: i64,
    pub timer_duration: i64,
    pub timestamp: i64,
}

/// Student → teacher answer submission (`submit_answer`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerMessage {
    pub r#type: MessageType,
    pub question_id: i64,
    pub answer: String,
    pub submit_time: i64,
}

/// Teacher → student answer feedback (`answer_result`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResultMessage {
    pub r#type: MessageType,
    pub correct: bool,
    pub message: String,
    pub points: i64,
    pub total_score: i64,
}

/// One leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub id: String,
    pub name: String,
    pub score: i64,
}

/// Teacher → students leaderboard (`leaderboard_update`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardUpdateMessage {
    pub r#type: MessageType,
    pub entries: Vec<LeaderboardEntryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_update_wire_field_names() {
        // テスト項目: focus_update のワイヤ上のフィールド名が契約と一致する
        // given (前提条件):
        let msg = FocusUpdateMessage {
            r#type: MessageType::FocusUpdate,
            timestamp: 1000,
            is_tab_active: false,
            is_face_detected: true,
            score: 0,
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"focus_update""#));
        assert!(json.contains(r#""isTabActive":false"#));
        assert!(json.contains(r#""isFaceDetected":true"#));
        assert!(json.contains(r#""score":0"#));
        assert!(json.contains(r#""timestamp":1000"#));
    }

    #[test]
    fn test_focus_update_parses_from_wire_json() {
        // テスト項目: ワイヤ形式の JSON から focus_update がパースできる
        // given (前提条件):
        let json = r#"{"type":"focus_update","timestamp":1234,"isTabActive":true,"isFaceDetected":false,"score":50}"#;

        // when (操作):
        let msg: FocusUpdateMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg.r#type, MessageType::FocusUpdate);
        assert!(msg.is_tab_active);
        assert!(!msg.is_face_detected);
        assert_eq!(msg.score, 50);
    }

    #[test]
    fn test_distracted_student_wire_field_names() {
        // テスト項目: distracted_student のワイヤ上のフィールド名が契約と一致する
        // given (前提条件):
        let msg = DistractedStudentMessage {
            r#type: MessageType::DistractedStudent,
            student_id: "abcd1234".to_string(),
            student_name: "Alice".to_string(),
            score: 0,
            cause: "Tab Switch".to_string(),
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"distracted_student""#));
        assert!(json.contains(r#""studentId":"abcd1234""#));
        assert!(json.contains(r#""studentName":"Alice""#));
        assert!(json.contains(r#""cause":"Tab Switch""#));
    }

    #[test]
    fn test_class_focus_snapshot_wire_field_names() {
        // テスト項目: class_focus_snapshot のエントリのフィールド名が契約と一致する
        // given (前提条件):
        let msg = ClassFocusSnapshotMessage {
            r#type: MessageType::ClassFocusSnapshot,
            students: vec![StudentFocusDto {
                student_id: "abcd1234".to_string(),
                name: "Alice".to_string(),
                score: 100,
                is_tab_active: true,
            }],
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"class_focus_snapshot""#));
        assert!(json.contains(r#""studentId":"abcd1234""#));
        assert!(json.contains(r#""isTabActive":true"#));
    }

    #[test]
    fn test_envelope_dispatches_on_type_field() {
        // テスト項目: エンベロープが type フィールドだけでパースできる
        // given (前提条件):
        let json = r#"{"type":"signal","target":"abcd","signal":{"sdp":"..."}}"#;

        // when (操作):
        let envelope: MessageEnvelope = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(envelope.r#type, MessageType::Signal);
    }

    #[test]
    fn test_envelope_rejects_unknown_type() {
        // テスト項目: 未知の type を持つフレームはパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"bogus_event"}"#;

        // when (操作):
        let result = serde_json::from_str::<MessageEnvelope>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_signal_message_omits_absent_fields() {
        // テスト項目: signal の未設定フィールドはワイヤに現れない
        // given (前提条件):
        let msg = SignalMessage {
            r#type: MessageType::Signal,
            target: None,
            sender: Some("abcd1234".to_string()),
            signal: serde_json::json!({"candidate": "..."}),
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(!json.contains("target"));
        assert!(json.contains(r#""sender":"abcd1234""#));
    }

    #[test]
    fn test_submit_answer_wire_field_names() {
        // テスト項目: submit_answer のフィールド名が元のワイヤ形式と一致する
        // given (前提条件):
        let msg = SubmitAnswerMessage {
            r#type: MessageType::SubmitAnswer,
            question_id: 1700000000000,
            answer: "42".to_string(),
            submit_time: 1700000012345,
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"submit_answer""#));
        assert!(json.contains(r#""questionId":1700000000000"#));
        assert!(json.contains(r#""submitTime":1700000012345"#));
    }
}
