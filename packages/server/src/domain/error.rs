//! ドメイン層のエラー型定義

use thiserror::Error;

/// 値オブジェクト・集約の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// 学生 ID が空
    #[error("student id must not be empty")]
    EmptyStudentId,

    /// 学生 ID が長すぎる
    #[error("student id is too long: {0} characters")]
    StudentIdTooLong(usize),

    /// 表示名が空
    #[error("student name must not be empty")]
    EmptyStudentName,

    /// 表示名が長すぎる
    #[error("student name is too long: {0} characters")]
    StudentNameTooLong(usize),

    /// セッション ID が空
    #[error("session id must not be empty")]
    EmptySessionId,

    /// セッション ID が長すぎる
    #[error("session id is too long: {0} characters")]
    SessionIdTooLong(usize),

    /// 教室 ID が空
    #[error("classroom id must not be empty")]
    EmptyClassroomId,

    /// フォーカススコアが範囲外（0〜100 のみ有効）
    #[error("focus score out of range: {0}")]
    FocusScoreOutOfRange(u8),

    /// 名簿が満員
    #[error("classroom roster is full")]
    RosterFull,
}

/// Repository 操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// 名簿が満員で登録できない
    #[error("classroom roster is full")]
    RosterFull,

    /// 学生が見つからない
    #[error("student '{0}' not found")]
    StudentNotFound(String),

    /// ストレージが利用できない（外部ストア障害の抽象化）
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 送信先クライアントが見つからない
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// 送信に失敗した
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
