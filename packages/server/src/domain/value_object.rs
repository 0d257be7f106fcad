//! ドメイン層の値オブジェクト定義
//!
//! 検証付きコンストラクタを持つ newtype 群。不正な値はドメイン層に
//! 入らないことを型で保証します。

use serde::Serialize;
use uuid::Uuid;

use super::error::DomainError;

/// 学生 ID・表示名の最大文字数
pub const MAX_NAME_LENGTH: usize = 64;

/// セッション ID の最大文字数
pub const MAX_SESSION_ID_LENGTH: usize = 128;

/// 散漫判定のしきい値（スコアがこの値未満で散漫とみなす）
pub const DISTRACTION_THRESHOLD: u8 = 50;

/// 学生を識別する接続 ID（値オブジェクト）
///
/// 接続の生存期間中は不変。WebSocket 接続のクエリパラメータから生成される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StudentId(String);

impl StudentId {
    /// 新しい StudentId を作成（空文字・長すぎる ID は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyStudentId);
        }
        let length = value.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(DomainError::StudentIdTooLong(length));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StudentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 学生の表示名（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentName(String);

impl StudentName {
    /// 新しい StudentName を作成（空白のみ・長すぎる名前は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStudentName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(DomainError::StudentNameTooLong(length));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 未登録の学生に対する代替名を合成する
    ///
    /// 接続 ID の先頭 4 文字から `"Student xxxx"` 形式の名前を作る。
    pub fn fallback(student_id: &StudentId) -> Self {
        let prefix: String = student_id.as_str().chars().take(4).collect();
        Self(format!("Student {}", prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 授業セッションの識別子（値オブジェクト）
///
/// フォーカスログの永続化パーティションキーとしてのみ使用される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(String);

impl SessionId {
    /// 新しい SessionId を作成（空文字・長すぎる ID は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptySessionId);
        }
        let length = value.chars().count();
        if length > MAX_SESSION_ID_LENGTH {
            return Err(DomainError::SessionIdTooLong(length));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// SessionId の生成ファクトリ
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// UUID v4 ベースの SessionId を生成
    pub fn generate() -> Result<SessionId, DomainError> {
        SessionId::new(Uuid::new_v4().to_string())
    }
}

/// 教室の識別子（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomId(String);

impl ClassroomId {
    /// 新しい ClassroomId を作成（空文字は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyClassroomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ClassroomId の生成ファクトリ
pub struct ClassroomIdFactory;

impl ClassroomIdFactory {
    /// UUID v4 ベースの ClassroomId を生成
    pub fn generate() -> Result<ClassroomId, DomainError> {
        ClassroomId::new(Uuid::new_v4().to_string())
    }
}

/// Unix タイムスタンプ（UTC、ミリ秒）の値オブジェクト
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// フォーカススコア（値オブジェクト）
///
/// 導出されるスコアは {0, 50, 100} の 3 値のみ。ワイヤから受け取る値は
/// `new` で 0〜100 に制限される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusScore(u8);

impl FocusScore {
    /// タブ非表示のスコア
    pub const ZERO: FocusScore = FocusScore(0);
    /// 顔未検出のスコア
    pub const HALF: FocusScore = FocusScore(50);
    /// 完全に集中しているスコア
    pub const FULL: FocusScore = FocusScore(100);

    /// 新しい FocusScore を作成（100 を超える値は拒否）
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > 100 {
            return Err(DomainError::FocusScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// タブ可視性と顔検出の 2 信号からスコアを導出する
    ///
    /// タブ非表示が最優先で 0、次に顔未検出で 50、どちらも問題なければ 100。
    pub fn from_signals(is_tab_active: bool, is_face_detected: bool) -> Self {
        if !is_tab_active {
            Self::ZERO
        } else if !is_face_detected {
            Self::HALF
        } else {
            Self::FULL
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// 散漫判定（スコアが 50 未満で散漫とみなす）
    pub fn is_distracted(&self) -> bool {
        self.0 < DISTRACTION_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_new_success() {
        // テスト項目: 有効な文字列から StudentId が作成できる
        // given (前提条件):
        let value = "alice".to_string();

        // when (操作):
        let result = StudentId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_student_id_new_empty_error() {
        // テスト項目: 空文字からの StudentId 作成はエラーになる
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = StudentId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::EmptyStudentId));
    }

    #[test]
    fn test_student_id_new_too_long_error() {
        // テスト項目: 長すぎる StudentId はエラーになる
        // given (前提条件):
        let value = "x".repeat(MAX_NAME_LENGTH + 1);

        // when (操作):
        let result = StudentId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::StudentIdTooLong(65)));
    }

    #[test]
    fn test_student_name_trims_whitespace() {
        // テスト項目: 表示名の前後の空白が除去される
        // given (前提条件):
        let value = "  Alice  ".to_string();

        // when (操作):
        let result = StudentName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_student_name_whitespace_only_error() {
        // テスト項目: 空白のみの表示名はエラーになる
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = StudentName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::EmptyStudentName));
    }

    #[test]
    fn test_student_name_fallback_uses_first_four_chars() {
        // テスト項目: 代替名が接続 ID の先頭 4 文字から合成される
        // given (前提条件):
        let student_id = StudentId::new("a1b2c3d4".to_string()).unwrap();

        // when (操作):
        let name = StudentName::fallback(&student_id);

        // then (期待する結果):
        assert_eq!(name.as_str(), "Student a1b2");
    }

    #[test]
    fn test_student_name_fallback_with_short_id() {
        // テスト項目: 4 文字未満の接続 ID でも代替名が合成できる
        // given (前提条件):
        let student_id = StudentId::new("ab".to_string()).unwrap();

        // when (操作):
        let name = StudentName::fallback(&student_id);

        // then (期待する結果):
        assert_eq!(name.as_str(), "Student ab");
    }

    #[test]
    fn test_session_id_factory_generates_distinct_ids() {
        // テスト項目: SessionIdFactory が毎回異なる ID を生成する
        // given (前提条件):

        // when (操作):
        let id1 = SessionIdFactory::generate().unwrap();
        let id2 = SessionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_focus_score_from_signals_table() {
        // テスト項目: 2 信号の全組み合わせでスコアが正しく導出される
        // given (前提条件): タブ非表示が最優先、次に顔未検出

        // when (操作) / then (期待する結果):
        assert_eq!(FocusScore::from_signals(false, false), FocusScore::ZERO);
        assert_eq!(FocusScore::from_signals(false, true), FocusScore::ZERO);
        assert_eq!(FocusScore::from_signals(true, false), FocusScore::HALF);
        assert_eq!(FocusScore::from_signals(true, true), FocusScore::FULL);
    }

    #[test]
    fn test_focus_score_new_rejects_out_of_range() {
        // テスト項目: 100 を超えるスコアは拒否される
        // given (前提条件):
        let value = 101;

        // when (操作):
        let result = FocusScore::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::FocusScoreOutOfRange(101)));
    }

    #[test]
    fn test_focus_score_is_distracted_boundary() {
        // テスト項目: 散漫判定は厳密に 50 未満（50 は散漫ではない）
        // given (前提条件):
        let below = FocusScore::new(49).unwrap();
        let at_threshold = FocusScore::new(50).unwrap();

        // when (操作) / then (期待する結果):
        assert!(below.is_distracted());
        assert!(!at_threshold.is_distracted());
        assert!(FocusScore::ZERO.is_distracted());
        assert!(!FocusScore::FULL.is_distracted());
    }
}
