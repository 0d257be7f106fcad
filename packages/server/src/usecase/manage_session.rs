//! UseCase: 授業セッションのライフサイクル管理
//!
//! セッションライフサイクルのコラボレータ（HTTP API）だけに公開される
//! 明示的なセッター。

use crate::domain::{CurrentSession, DomainError, SessionId, SessionIdFactory};

/// セッション管理のユースケース
pub struct ManageSessionUseCase {
    /// 現在の授業セッション（フォーカス集約側と共有されるハンドル）
    session: CurrentSession,
}

impl ManageSessionUseCase {
    /// 新しい ManageSessionUseCase を作成
    pub fn new(session: CurrentSession) -> Self {
        Self { session }
    }

    /// セッションを開始する
    ///
    /// ID が指定されなければ UUID v4 ベースの ID を生成する。
    /// 既存のセッションは上書きされる。
    pub async fn start(&self, session_id: Option<SessionId>) -> Result<SessionId, DomainError> {
        let session_id = match session_id {
            Some(id) => id,
            None => SessionIdFactory::generate()?,
        };
        self.session.set(session_id.clone()).await;
        Ok(session_id)
    }

    /// セッションを終了し、直前の ID を返す
    ///
    /// 以後、フォーカスログの永続化はスキップされる。
    pub async fn end(&self) -> Option<SessionId> {
        self.session.clear().await
    }

    /// 現在のセッション ID を取得する
    pub async fn current(&self) -> Option<SessionId> {
        self.session.current().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_with_explicit_id() {
        // テスト項目: 指定した ID でセッションが開始される
        // given (前提条件):
        let usecase = ManageSessionUseCase::new(CurrentSession::new());
        let session_id = SessionId::new("period-3".to_string()).unwrap();

        // when (操作):
        let started = usecase.start(Some(session_id.clone())).await.unwrap();

        // then (期待する結果):
        assert_eq!(started, session_id);
        assert_eq!(usecase.current().await, Some(session_id));
    }

    #[tokio::test]
    async fn test_start_generates_id_when_unspecified() {
        // テスト項目: ID 未指定ならセッション ID が生成される
        // given (前提条件):
        let usecase = ManageSessionUseCase::new(CurrentSession::new());

        // when (操作):
        let started = usecase.start(None).await.unwrap();

        // then (期待する結果):
        assert!(!started.as_str().is_empty());
        assert_eq!(usecase.current().await, Some(started));
    }

    #[tokio::test]
    async fn test_end_clears_session() {
        // テスト項目: 終了で現在のセッションが解除される
        // given (前提条件):
        let usecase = ManageSessionUseCase::new(CurrentSession::new());
        let started = usecase.start(None).await.unwrap();

        // when (操作):
        let ended = usecase.end().await;

        // then (期待する結果):
        assert_eq!(ended, Some(started));
        assert!(usecase.current().await.is_none());
    }
}
