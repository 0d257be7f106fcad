//! UseCase: 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinClassroomUseCase::execute() / update_name() メソッド
//! - 参加処理（接続中チェック、名簿登録、MessagePusher 登録）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：同じ学生 ID の二重接続を防ぐ
//! - 切断後の再入室が許可されることを保証（名簿は残るため）
//! - 名簿への upsert が正しく行われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規学生の参加、表示名なしの参加（代替名）
//! - 異常系：接続中の学生 ID での参加試行、名簿容量超過
//! - エッジケース：切断後の再入室

use std::sync::Arc;

use crate::domain::{
    ClassroomRepository, MessagePusher, PusherChannel, StudentId, StudentName, StudentProfile,
    Timestamp,
};

use super::error::JoinError;

/// 参加のユースケース
pub struct JoinClassroomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ClassroomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinClassroomUseCase {
    /// 新しい JoinClassroomUseCase を作成
    pub fn new(
        repository: Arc<dyn ClassroomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `student_id` - 参加する学生の接続 ID（Domain Model）
    /// * `name` - 表示名（未指定なら接続 ID から代替名を合成）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 参加成功（参加時刻を返す）
    /// * `Err(JoinError)` - 参加失敗
    pub async fn execute(
        &self,
        student_id: StudentId,
        name: Option<StudentName>,
        sender: PusherChannel,
    ) -> Result<Timestamp, JoinError> {
        use miharu_shared::time::now_utc_millis;

        // 1. 接続中チェック（名簿ではなく現在の接続で判定する。
        //    名簿は切断後も残るため、再入室はここを通過する）
        if self.message_pusher.is_registered(&student_id).await {
            return Err(JoinError::DuplicateStudentId(
                student_id.as_str().to_string(),
            ));
        }

        // 2. 名簿に登録（既存エントリは表示名のみ更新される）
        let joined_at = Timestamp::new(now_utc_millis());
        let name = name.unwrap_or_else(|| StudentName::fallback(&student_id));
        self.repository
            .register_student(StudentProfile::new(student_id.clone(), name, joined_at))
            .await
            .map_err(|_| JoinError::RosterCapacityExceeded)?;

        // 3. MessagePusher にクライアントを登録
        self.message_pusher.register_client(student_id, sender).await;

        Ok(joined_at)
    }

    /// 表示名を更新する（`join` ワイヤメッセージ）
    ///
    /// 名簿への upsert で実現する。名簿上の位置と参加時刻は保持される。
    pub async fn update_name(
        &self,
        student_id: &StudentId,
        name: StudentName,
    ) -> Result<(), JoinError> {
        use miharu_shared::time::now_utc_millis;

        let joined_at = Timestamp::new(now_utc_millis());
        self.repository
            .register_student(StudentProfile::new(student_id.clone(), name, joined_at))
            .await
            .map_err(|_| JoinError::RosterCapacityExceeded)
    }
}
