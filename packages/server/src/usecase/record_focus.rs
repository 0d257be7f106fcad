//! UseCase: フォーカス報告の集約処理
//!
//! `focus_update` 1 件ごとに呼び出される集約処理の本体。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RecordFocusUseCase::execute() / persist() メソッド
//! - レコード更新・散漫判定・代替名解決・スナップショット構築・永続化ゲート
//!
//! ### なぜこのテストが必要か
//! - 散漫アラートはスコアが厳密に 50 未満のときだけ発火する
//! - スナップショットは名簿駆動であり、報告のたびに無条件で再構築される
//! - 永続化はセッション ID が設定されているときだけ行われ、
//!   ストア障害はセッションを壊さず警告ログに落ちる
//!
//! ### どのような状況を想定しているか
//! - 正常系：スコア 0/50/100 の報告、登録済み・未登録の学生
//! - 異常系：永続化ストアの障害（握りつぶし）
//! - エッジケース：履歴の刈り込み境界、セッション未設定

use std::sync::Arc;

use miharu_shared::time::Clock;

use crate::domain::{
    ClassroomRepository, CurrentSession, DistractionCause, FocusLogRepository, FocusLogRow,
    FocusRecord, FocusSample, MessagePusher, StudentFocus, StudentId, StudentName, Timestamp,
};

/// 1 件のフォーカス報告を処理した結果
///
/// UI 層はこれを元にワイヤ DTO を組み立ててブロードキャストする。
#[derive(Debug)]
pub struct RecordedFocus {
    /// 更新後のフォーカスレコード
    pub record: FocusRecord,
    /// 解決済みの表示名（未登録なら代替名）
    pub student_name: StudentName,
    /// 散漫原因（タブ切り替え優先、なければ None）
    pub cause: Option<DistractionCause>,
    /// 散漫アラートを発火すべきか（スコアが厳密に 50 未満）
    pub distracted: bool,
    /// 名簿駆動の教室スナップショット（登録順）
    pub snapshot: Vec<StudentFocus>,
}

/// フォーカス報告集約のユースケース
pub struct RecordFocusUseCase {
    /// Repository（教室集約へのアクセスの抽象化）
    repository: Arc<dyn ClassroomRepository>,
    /// FocusLog Repository（永続化シンクの抽象化）
    focus_log: Arc<dyn FocusLogRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 現在の授業セッション（永続化のゲート）
    session: CurrentSession,
    /// 時刻源（履歴の刈り込みとログのタイムスタンプに使用）
    clock: Arc<dyn Clock>,
}

impl RecordFocusUseCase {
    /// 新しい RecordFocusUseCase を作成
    pub fn new(
        repository: Arc<dyn ClassroomRepository>,
        focus_log: Arc<dyn FocusLogRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        session: CurrentSession,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            focus_log,
            message_pusher,
            session,
            clock,
        }
    }

    /// フォーカス報告を処理する
    ///
    /// 1. レコードの取得・生成とスコア記録（履歴はサーバ時刻で刈り込み）
    /// 2. 散漫原因の解決（タブ切り替え優先）
    /// 3. 表示名の解決（未登録なら接続 ID から代替名を合成）
    /// 4. 名簿駆動スナップショットの再構築（報告のたびに無条件）
    ///
    /// この処理自体は失敗しない。後続のブロードキャストと永続化は
    /// ベストエフォートで、どのステップの失敗も他のステップを妨げない。
    pub async fn execute(&self, student_id: StudentId, sample: FocusSample) -> RecordedFocus {
        let now = Timestamp::new(self.clock.now_millis());

        // 1. レコード更新（刈り込みはこのレコード自身の書き込みでのみ起こる）
        let record = self
            .repository
            .record_sample(&student_id, sample.score, now)
            .await;

        // 2. 散漫原因
        let cause = DistractionCause::resolve(sample.is_tab_active, sample.is_face_detected);

        // 3. 表示名（名簿から解決、未登録なら代替名）
        let student_name = match self.repository.find_student(&student_id).await {
            Some(profile) => profile.name,
            None => StudentName::fallback(&student_id),
        };

        // 4. 教室スナップショット（名簿の全学生、登録順）
        let snapshot = self.repository.focus_snapshot().await;

        RecordedFocus {
            record,
            student_name,
            cause,
            distracted: sample.score.is_distracted(),
            snapshot,
        }
    }

    /// 散漫アラートを全クライアントにブロードキャストする
    ///
    /// 報告した本人を含む全登録クライアントが対象（教師専用ではない）。
    pub async fn broadcast_alert(&self, message: &str) -> Result<(), String> {
        let targets = self.roster_targets().await;
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 教室スナップショットを全クライアントにブロードキャストする
    pub async fn broadcast_snapshot(&self, message: &str) -> Result<(), String> {
        let targets = self.roster_targets().await;
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// フォーカスログに 1 行を追記する
    ///
    /// セッション ID が未設定なら何もしない（前提条件であり失敗ではない）。
    /// ストア障害は警告ログに記録して握りつぶす。クライアントから見える
    /// 挙動には影響しない。
    pub async fn persist(&self, student_id: &StudentId, sample: &FocusSample) {
        let Some(session_id) = self.session.current().await else {
            return;
        };

        let row = FocusLogRow {
            session_id,
            student_id: student_id.clone(),
            score: sample.score,
            is_tab_active: sample.is_tab_active,
            is_face_detected: sample.is_face_detected,
            logged_at: Timestamp::new(self.clock.now_millis()),
        };

        if let Err(e) = self.focus_log.append(row).await {
            tracing::warn!(
                "Failed to persist focus log for '{}': {}",
                student_id.as_str(),
                e
            );
        }
    }

    /// ブロードキャスト対象（名簿の全学生）を取得する
    ///
    /// 切断済みの学生は MessagePusher 側でスキップされる。
    async fn roster_targets(&self) -> Vec<StudentId> {
        self.repository
            .get_roster()
            .await
            .into_iter()
            .map(|profile| profile.id)
            .collect()
    }
}
