//! UseCase: 教室状態の取得（HTTP デバッグ・スナップショット用の読み取りモデル）

use std::sync::Arc;

use crate::domain::{Classroom, ClassroomRepository, RepositoryError, StudentFocus};

/// 教室状態取得のユースケース
pub struct GetClassroomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ClassroomRepository>,
}

impl GetClassroomUseCase {
    /// 新しい GetClassroomUseCase を作成
    pub fn new(repository: Arc<dyn ClassroomRepository>) -> Self {
        Self { repository }
    }

    /// Classroom 集約を取得する
    pub async fn execute(&self) -> Result<Classroom, RepositoryError> {
        self.repository.get_classroom().await
    }

    /// 現在の教室スナップショットを取得する
    pub async fn focus_snapshot(&self) -> Vec<StudentFocus> {
        self.repository.focus_snapshot().await
    }
}
