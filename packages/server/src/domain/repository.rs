//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::classroom::Classroom;
use super::entity::{FocusLogRow, FocusRecord, StudentFocus, StudentProfile};
use super::error::RepositoryError;
use super::value_object::{FocusScore, SessionId, StudentId, Timestamp};

/// Classroom Repository trait
///
/// 教室の集約（名簿とフォーカスレコード）へのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しない。
#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    /// Classroom 集約を取得
    async fn get_classroom(&self) -> Result<Classroom, RepositoryError>;

    /// 学生を名簿に登録（既存 ID は表示名のみ更新）
    async fn register_student(&self, profile: StudentProfile) -> Result<(), RepositoryError>;

    /// 名簿から学生を検索
    async fn find_student(&self, student_id: &StudentId) -> Option<StudentProfile>;

    /// 名簿の全学生を登録順で取得
    async fn get_roster(&self) -> Vec<StudentProfile>;

    /// フォーカスサンプルを記録し、更新後のレコードを返す
    async fn record_sample(
        &self,
        student_id: &StudentId,
        score: FocusScore,
        now: Timestamp,
    ) -> FocusRecord;

    /// フォーカスレコードを取得
    async fn get_focus_record(&self, student_id: &StudentId) -> Option<FocusRecord>;

    /// フォーカスレコードを削除（名簿のエントリは残る）
    async fn remove_focus_record(&self, student_id: &StudentId);

    /// 登録学生数を取得
    async fn count_registered(&self) -> usize;

    /// 教室全体のフォーカススナップショットを構築
    async fn focus_snapshot(&self) -> Vec<StudentFocus>;
}

/// FocusLog Repository trait
///
/// フォーカスログ（追記専用の永続化行）へのインターフェース。
/// 実際のドキュメントストアは外部コラボレータであり、このシームの
/// 向こう側にある。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FocusLogRepository: Send + Sync {
    /// 1 行を追記する
    async fn append(&self, row: FocusLogRow) -> Result<(), RepositoryError>;

    /// セッション ID でログ行を検索する
    async fn find_by_session(&self, session_id: &SessionId) -> Vec<FocusLogRow>;

    /// 全ログ行数を取得する
    async fn count(&self) -> usize;
}
