//! UseCase 層のエラー型定義

use thiserror::Error;

/// 参加処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    /// 同じ学生 ID が既に接続中
    #[error("student '{0}' is already connected")]
    DuplicateStudentId(String),

    /// 名簿が満員
    #[error("classroom roster is full")]
    RosterCapacityExceeded,
}
