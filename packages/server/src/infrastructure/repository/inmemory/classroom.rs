//! InMemory Classroom Repository 実装
//!
//! ドメイン層が定義する ClassroomRepository trait の具体的な実装。
//! Classroom 集約をそのままインメモリのストレージとして使用します。
//! フォーカスレコードはプロセスメモリのみに存在し、永続化されるのは
//! 導出されたログ行だけです（FocusLogRepository 側）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Classroom, ClassroomRepository, DomainError, FocusRecord, FocusScore, RepositoryError,
    StudentFocus, StudentId, StudentProfile, Timestamp,
};

/// インメモリ Classroom Repository 実装
pub struct InMemoryClassroomRepository {
    /// Classroom 集約
    classroom: Arc<Mutex<Classroom>>,
}

impl InMemoryClassroomRepository {
    /// 新しい InMemoryClassroomRepository を作成
    pub fn new(classroom: Arc<Mutex<Classroom>>) -> Self {
        Self { classroom }
    }
}

#[async_trait]
impl ClassroomRepository for InMemoryClassroomRepository {
    async fn get_classroom(&self) -> Result<Classroom, RepositoryError> {
        let classroom = self.classroom.lock().await;
        Ok(classroom.clone())
    }

    async fn register_student(&self, profile: StudentProfile) -> Result<(), RepositoryError> {
        let mut classroom = self.classroom.lock().await;
        classroom.register_student(profile).map_err(|e| match e {
            DomainError::RosterFull => RepositoryError::RosterFull,
            other => RepositoryError::StorageUnavailable(other.to_string()),
        })
    }

    async fn find_student(&self, student_id: &StudentId) -> Option<StudentProfile> {
        let classroom = self.classroom.lock().await;
        classroom.find_student(student_id).cloned()
    }

    async fn get_roster(&self) -> Vec<StudentProfile> {
        let classroom = self.classroom.lock().await;
        classroom.roster.clone()
    }

    async fn record_sample(
        &self,
        student_id: &StudentId,
        score: FocusScore,
        now: Timestamp,
    ) -> FocusRecord {
        let mut classroom = self.classroom.lock().await;
        classroom.record_sample(student_id, score, now).clone()
    }

    async fn get_focus_record(&self, student_id: &StudentId) -> Option<FocusRecord> {
        let classroom = self.classroom.lock().await;
        classroom.focus_record(student_id).cloned()
    }

    async fn remove_focus_record(&self, student_id: &StudentId) {
        let mut classroom = self.classroom.lock().await;
        classroom.remove_focus_record(student_id);
    }

    async fn count_registered(&self) -> usize {
        let classroom = self.classroom.lock().await;
        classroom.count_registered()
    }

    async fn focus_snapshot(&self) -> Vec<StudentFocus> {
        let classroom = self.classroom.lock().await;
        classroom.focus_snapshot()
    }
}
