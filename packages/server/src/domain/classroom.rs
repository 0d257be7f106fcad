//! 教室の集約（Classroom）
//!
//! 接続キーの 2 つのマップ（名簿とフォーカスレコード）を 1 つの集約として
//! 所有します。名簿は登録順を保持する Vec、フォーカスレコードは HashMap。
//! スナップショットの並び順は名簿の登録順に従います。

use std::collections::HashMap;

use serde::Serialize;

use super::entity::{FocusRecord, StudentFocus, StudentProfile};
use super::error::DomainError;
use super::value_object::{ClassroomId, FocusScore, StudentId, Timestamp};

/// 名簿のデフォルト容量
pub const DEFAULT_ROSTER_CAPACITY: usize = 100;

/// 教室の集約
///
/// - `roster`: 登録学生の名簿（登録順を保持、切断後も残る）
/// - `focus`: 接続ごとのフォーカスレコード（最初の報告で生成、切断で削除）
#[derive(Debug, Clone, Serialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub created_at: Timestamp,
    pub roster: Vec<StudentProfile>,
    pub focus: HashMap<StudentId, FocusRecord>,
    roster_capacity: usize,
}

impl Classroom {
    /// 新しい Classroom を作成（デフォルト容量）
    pub fn new(id: ClassroomId, created_at: Timestamp) -> Self {
        Self::with_capacity(id, created_at, DEFAULT_ROSTER_CAPACITY)
    }

    /// 名簿容量を指定して Classroom を作成
    pub fn with_capacity(id: ClassroomId, created_at: Timestamp, roster_capacity: usize) -> Self {
        Self {
            id,
            created_at,
            roster: Vec::new(),
            focus: HashMap::new(),
            roster_capacity,
        }
    }

    /// 学生を名簿に登録する
    ///
    /// 既に登録済みの ID の場合は表示名のみ更新し、名簿上の位置と
    /// 参加時刻は保持する（再入室）。新規登録は容量を超えるとエラー。
    pub fn register_student(&mut self, profile: StudentProfile) -> Result<(), DomainError> {
        if let Some(existing) = self.roster.iter_mut().find(|p| p.id == profile.id) {
            existing.name = profile.name;
            return Ok(());
        }
        if self.roster.len() >= self.roster_capacity {
            return Err(DomainError::RosterFull);
        }
        self.roster.push(profile);
        Ok(())
    }

    /// 名簿から学生を検索する
    pub fn find_student(&self, student_id: &StudentId) -> Option<&StudentProfile> {
        self.roster.iter().find(|p| &p.id == student_id)
    }

    /// フォーカスサンプルを記録する
    ///
    /// レコードは最初の報告時に遅延生成される。記録時にそのレコードの
    /// 履歴だけが保持期間で刈り込まれる（他の学生のレコードには触れない）。
    pub fn record_sample(
        &mut self,
        student_id: &StudentId,
        score: FocusScore,
        now: Timestamp,
    ) -> &FocusRecord {
        let record = self
            .focus
            .entry(student_id.clone())
            .or_insert_with(FocusRecord::new);
        record.record(score, now);
        record
    }

    /// フォーカスレコードを取得する
    pub fn focus_record(&self, student_id: &StudentId) -> Option<&FocusRecord> {
        self.focus.get(student_id)
    }

    /// フォーカスレコードを削除する（切断時）
    ///
    /// 名簿のエントリは削除しない。
    pub fn remove_focus_record(&mut self, student_id: &StudentId) -> Option<FocusRecord> {
        self.focus.remove(student_id)
    }

    /// 登録学生数を取得する
    pub fn count_registered(&self) -> usize {
        self.roster.len()
    }

    /// 教室全体のフォーカススナップショットを構築する
    ///
    /// 名簿の全学生を登録順に列挙する（フォーカスレコードの有無に依存しない）。
    /// レコードのない学生はスコア 100・タブ表示扱い。`is_tab_active` は
    /// 報告された真偽値ではなく `last_score > 0` から再導出される。
    pub fn focus_snapshot(&self) -> Vec<StudentFocus> {
        self.roster
            .iter()
            .map(|profile| {
                let record = self.focus.get(&profile.id);
                StudentFocus {
                    student_id: profile.id.clone(),
                    name: profile.name.clone(),
                    score: record.map(|r| r.last_score).unwrap_or(FocusScore::FULL),
                    is_tab_active: record.map(|r| r.last_score.value() > 0).unwrap_or(true),
                }
            })
            .collect()
    }
}
