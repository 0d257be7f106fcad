//! UseCase: 退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveClassroomUseCase::execute() メソッド
//! - 切断時のフォーカスレコード削除と MessagePusher 登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断後のレコード検索が「不在」を返すことを保証
//! - 名簿のエントリは削除されず、名簿駆動のスナップショットには
//!   引き続き現れることを確認（名簿の掃除は別ライフサイクル）
//!
//! ### どのような状況を想定しているか
//! - 正常系：報告済みの学生の切断
//! - エッジケース：レコードを持たない学生の切断（冪等）

use std::sync::Arc;

use crate::domain::{ClassroomRepository, MessagePusher, StudentId};

/// 退室のユースケース
pub struct LeaveClassroomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ClassroomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveClassroomUseCase {
    /// 新しい LeaveClassroomUseCase を作成
    pub fn new(
        repository: Arc<dyn ClassroomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 退室を実行
    ///
    /// フォーカスレコードを即座に削除し、MessagePusher から登録解除する。
    /// 名簿のエントリは残す。処理中の永続化はキャンセルしない。
    pub async fn execute(&self, student_id: &StudentId) {
        // 1. フォーカスレコードを削除（存在しなくても冪等）
        self.repository.remove_focus_record(student_id).await;

        // 2. MessagePusher からクライアントを登録解除
        self.message_pusher.unregister_client(student_id).await;
    }
}
