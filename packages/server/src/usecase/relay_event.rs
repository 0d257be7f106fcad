//! UseCase: プレゼンテーションイベントの中継
//!
//! クイズ・リーダーボード・ピアシグナリングのイベントはフォーカス集約の
//! 対象外だが、同じチャンネル上で利用可能であり続ける必要がある。
//! サーバはペイロードを解釈せず、そのまま転送する。

use std::sync::Arc;

use crate::domain::{ClassroomRepository, MessagePushError, MessagePusher, StudentId};

/// イベント中継のユースケース
pub struct RelayEventUseCase {
    /// Repository（ブロードキャスト対象の名簿取得に使用）
    repository: Arc<dyn ClassroomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayEventUseCase {
    /// 新しい RelayEventUseCase を作成
    pub fn new(
        repository: Arc<dyn ClassroomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 送信者以外の全クライアントにイベントを中継する
    pub async fn broadcast_from(
        &self,
        sender_id: &StudentId,
        message: &str,
    ) -> Result<(), String> {
        let targets: Vec<StudentId> = self
            .repository
            .get_roster()
            .await
            .into_iter()
            .map(|profile| profile.id)
            .filter(|id| id != sender_id)
            .collect();

        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 特定のクライアントにイベントを転送する（ピアシグナリング用）
    pub async fn forward_to(
        &self,
        target: &StudentId,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(target, message).await
    }
}
