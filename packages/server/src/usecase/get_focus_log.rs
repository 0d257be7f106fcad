//! UseCase: フォーカスログの取得（分析用の読み取りモデル）

use std::sync::Arc;

use crate::domain::{FocusLogRepository, FocusLogRow, SessionId};

/// フォーカスログ取得のユースケース
pub struct GetFocusLogUseCase {
    /// FocusLog Repository（永続化シンクの抽象化）
    focus_log: Arc<dyn FocusLogRepository>,
}

impl GetFocusLogUseCase {
    /// 新しい GetFocusLogUseCase を作成
    pub fn new(focus_log: Arc<dyn FocusLogRepository>) -> Self {
        Self { focus_log }
    }

    /// セッション ID でログ行を取得する
    pub async fn execute(&self, session_id: &SessionId) -> Vec<FocusLogRow> {
        self.focus_log.find_by_session(session_id).await
    }
}
