//! InMemory FocusLog Repository 実装
//!
//! 追記専用のフォーカスログ。実環境のドキュメントストアは外部コラボレータ
//! であり、このインメモリ実装が trait シームの向こう側に立つ。
//! 行の更新・削除パスは存在しない。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{FocusLogRow, FocusLogRepository, RepositoryError, SessionId};

/// インメモリ FocusLog Repository 実装
pub struct InMemoryFocusLogRepository {
    /// 追記順のログ行
    rows: Arc<Mutex<Vec<FocusLogRow>>>,
}

impl InMemoryFocusLogRepository {
    /// 新しい InMemoryFocusLogRepository を作成
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for InMemoryFocusLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FocusLogRepository for InMemoryFocusLogRepository {
    async fn append(&self, row: FocusLogRow) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().await;
        rows.push(row);
        Ok(())
    }

    async fn find_by_session(&self, session_id: &SessionId) -> Vec<FocusLogRow> {
        let rows = self.rows.lock().await;
        rows.iter()
            .filter(|row| &row.session_id == session_id)
            .cloned()
            .collect()
    }

    async fn count(&self) -> usize {
        let rows = self.rows.lock().await;
        rows.len()
    }
}
