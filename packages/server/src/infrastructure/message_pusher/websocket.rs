//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。送信はベストエフォートであり、切断済みクライアントへの
//! 送信失敗は警告ログを出して握りつぶします。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, StudentId};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: student_id (String)
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<String, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, student_id: StudentId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(student_id.as_str().to_string(), sender);
        tracing::debug!(
            "Student '{}' registered to MessagePusher",
            student_id.as_str()
        );
    }

    async fn unregister_client(&self, student_id: &StudentId) {
        let mut clients = self.clients.lock().await;
        clients.remove(student_id.as_str());
        tracing::debug!(
            "Student '{}' unregistered from MessagePusher",
            student_id.as_str()
        );
    }

    async fn is_registered(&self, student_id: &StudentId) -> bool {
        let clients = self.clients.lock().await;
        clients.contains_key(student_id.as_str())
    }

    async fn push_to(&self, student_id: &StudentId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(student_id.as_str()) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to student '{}'", student_id.as_str());
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(
                student_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<StudentId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(target.as_str()) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push message to student '{}': {}",
                        target.as_str(),
                        e
                    );
                } else {
                    tracing::debug!("Broadcasted message to student '{}'", target.as_str());
                }
            } else {
                tracing::warn!(
                    "Student '{}' not found during broadcast, skipping",
                    target.as_str()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<String, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにメッセージを送信できる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let student_id = StudentId::new("alice".to_string()).unwrap();
        pusher.register_client(student_id.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&student_id, "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await;
        assert_eq!(received, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let student_id = StudentId::new("nonexistent".to_string()).unwrap();

        // when (操作):
        let result = pusher.push_to(&student_id, "Hello").await;

        // then (期待する結果):
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            MessagePushError::ClientNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_is_registered_reflects_lifecycle() {
        // テスト項目: 登録・登録解除が is_registered に反映される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        let student_id = StudentId::new("alice".to_string()).unwrap();
        assert!(!pusher.is_registered(&student_id).await);

        // when (操作):
        pusher.register_client(student_id.clone(), tx).await;

        // then (期待する結果):
        assert!(pusher.is_registered(&student_id).await);

        pusher.unregister_client(&student_id).await;
        assert!(!pusher.is_registered(&student_id).await);
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のクライアントにメッセージをブロードキャストできる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = StudentId::new("alice".to_string()).unwrap();
        let bob = StudentId::new("bob".to_string()).unwrap();
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;

        // when (操作):
        let targets = vec![alice, bob];
        let result = pusher.broadcast(targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: ブロードキャスト時、一部のクライアントが存在しなくても成功する
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let alice = StudentId::new("alice".to_string()).unwrap();
        let nonexistent = StudentId::new("nonexistent".to_string()).unwrap();
        pusher.register_client(alice.clone(), tx1).await;

        // when (操作):
        let targets = vec![alice.clone(), nonexistent];
        let result = pusher.broadcast(targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok()); // ブロードキャストは部分失敗を許容
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();

        // when (操作):
        let result = pusher.broadcast(vec![], "Message").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
