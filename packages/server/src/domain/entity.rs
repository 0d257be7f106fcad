//! ドメイン層のエンティティ定義

use std::fmt;

use serde::Serialize;

use super::value_object::{FocusScore, SessionId, StudentId, StudentName, Timestamp};

/// フォーカス履歴の保持期間（ミリ秒）
///
/// この期間より古い履歴エントリは、そのレコード自身への書き込み時に破棄される。
pub const RETENTION_WINDOW_MS: i64 = 10 * 60 * 1000;

/// クライアントから報告された 1 回分のフォーカス計測
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FocusSample {
    /// クライアント側で計測した時刻（サーバは信用しない）
    pub timestamp: Timestamp,
    pub is_tab_active: bool,
    pub is_face_detected: bool,
    pub score: FocusScore,
}

/// フォーカス履歴の 1 エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// サーバが受信した時刻
    pub time: Timestamp,
    pub score: FocusScore,
}

/// 接続ごとのフォーカスレコード
///
/// 最初のフォーカス報告時に遅延生成され、切断時に削除される。
/// 履歴は保持期間内のエントリのみを保持する。
#[derive(Debug, Clone, Serialize)]
pub struct FocusRecord {
    pub last_score: FocusScore,
    pub history: Vec<HistoryEntry>,
}

impl FocusRecord {
    /// 新しい FocusRecord を作成（初期スコアは 100）
    pub fn new() -> Self {
        Self {
            last_score: FocusScore::FULL,
            history: Vec::new(),
        }
    }

    /// スコアを記録し、保持期間外の履歴を破棄する
    ///
    /// 破棄の基準はサーバの現在時刻であり、サンプル自身のタイムスタンプは
    /// 使わない（クライアントの時計ずれを補正しない）。追加した最新エントリは
    /// 常に保持される。
    pub fn record(&mut self, score: FocusScore, now: Timestamp) {
        self.last_score = score;
        self.history.push(HistoryEntry { time: now, score });

        let cutoff = now.value() - RETENTION_WINDOW_MS;
        self.history.retain(|entry| entry.time.value() > cutoff);
    }
}

impl Default for FocusRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// 名簿に登録された学生のプロフィール
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub id: StudentId,
    pub name: StudentName,
    pub joined_at: Timestamp,
}

impl StudentProfile {
    pub fn new(id: StudentId, name: StudentName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            joined_at,
        }
    }
}

/// 散漫の原因
///
/// タブ切り替えが顔未検出より優先される（両方該当する場合は TabSwitch）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistractionCause {
    TabSwitch,
    NoFace,
}

impl DistractionCause {
    /// 2 信号から散漫原因を解決する（どちらも問題なければ None）
    pub fn resolve(is_tab_active: bool, is_face_detected: bool) -> Option<Self> {
        if !is_tab_active {
            Some(Self::TabSwitch)
        } else if !is_face_detected {
            Some(Self::NoFace)
        } else {
            None
        }
    }
}

impl fmt::Display for DistractionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabSwitch => write!(f, "Tab Switch"),
            Self::NoFace => write!(f, "No Face"),
        }
    }
}

/// 教室スナップショットの 1 エントリ（登録学生ごとに導出される）
#[derive(Debug, Clone, Serialize)]
pub struct StudentFocus {
    pub student_id: StudentId,
    pub name: StudentName,
    pub score: FocusScore,
    pub is_tab_active: bool,
}

/// フォーカスログの永続化行（追記専用）
#[derive(Debug, Clone, Serialize)]
pub struct FocusLogRow {
    pub session_id: SessionId,
    pub student_id: StudentId,
    pub score: FocusScore,
    pub is_tab_active: bool,
    pub is_face_detected: bool,
    pub logged_at: Timestamp,
}
