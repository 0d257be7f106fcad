//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするメッセージ通知のインターフェースを定義します。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::value_object::StudentId;

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 接続中のクライアントへのメッセージ送信を抽象化する。
/// 送信はベストエフォートであり、バックプレッシャも再送も行わない。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録する
    async fn register_client(&self, student_id: StudentId, sender: PusherChannel);

    /// クライアントを登録解除する
    async fn unregister_client(&self, student_id: &StudentId);

    /// クライアントが現在接続中かを確認する
    async fn is_registered(&self, student_id: &StudentId) -> bool;

    /// 特定のクライアントにメッセージを送信する
    async fn push_to(&self, student_id: &StudentId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージをブロードキャストする
    ///
    /// 一部のクライアントへの送信失敗は許容される（警告ログのみ）。
    async fn broadcast(
        &self,
        targets: Vec<StudentId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
