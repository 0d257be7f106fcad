//! 現在の授業セッションを保持するハンドル
//!
//! セッションライフサイクルのコラボレータ（HTTP API）だけが設定・解除を行い、
//! フォーカス集約側は参照のみ行う。アンビエントなグローバル変数は使わない。

use std::sync::Arc;

use tokio::sync::Mutex;

use super::value_object::SessionId;

/// 現在の授業セッション ID の共有ハンドル
///
/// 未設定の間、フォーカスログの永続化はスキップされる。
#[derive(Clone)]
pub struct CurrentSession {
    inner: Arc<Mutex<Option<SessionId>>>,
}

impl CurrentSession {
    /// 未設定状態のハンドルを作成
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// セッション ID を設定する
    pub async fn set(&self, session_id: SessionId) {
        let mut guard = self.inner.lock().await;
        *guard = Some(session_id);
    }

    /// セッション ID を解除し、直前の値を返す
    pub async fn clear(&self) -> Option<SessionId> {
        let mut guard = self.inner.lock().await;
        guard.take()
    }

    /// 現在のセッション ID を取得する
    pub async fn current(&self) -> Option<SessionId> {
        let guard = self.inner.lock().await;
        guard.clone()
    }
}

impl Default for CurrentSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_current_session_starts_unset() {
        // テスト項目: 初期状態ではセッションが未設定
        // given (前提条件):
        let session = CurrentSession::new();

        // when (操作):
        let current = session.current().await;

        // then (期待する結果):
        assert!(current.is_none());
    }

    #[tokio::test]
    async fn test_current_session_set_and_get() {
        // テスト項目: 設定したセッション ID が取得できる
        // given (前提条件):
        let session = CurrentSession::new();
        let session_id = SessionId::new("period-3".to_string()).unwrap();

        // when (操作):
        session.set(session_id.clone()).await;

        // then (期待する結果):
        assert_eq!(session.current().await, Some(session_id));
    }

    #[tokio::test]
    async fn test_current_session_clear_returns_previous() {
        // テスト項目: 解除すると直前の値が返され、未設定状態に戻る
        // given (前提条件):
        let session = CurrentSession::new();
        let session_id = SessionId::new("period-3".to_string()).unwrap();
        session.set(session_id.clone()).await;

        // when (操作):
        let previous = session.clear().await;

        // then (期待する結果):
        assert_eq!(previous, Some(session_id));
        assert!(session.current().await.is_none());
    }
}
