//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    GetClassroomUseCase, GetFocusLogUseCase, JoinClassroomUseCase, LeaveClassroomUseCase,
    ManageSessionUseCase, RecordFocusUseCase, RelayEventUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinClassroomUseCase（参加のユースケース）
    pub join_classroom_usecase: Arc<JoinClassroomUseCase>,
    /// LeaveClassroomUseCase（退室のユースケース）
    pub leave_classroom_usecase: Arc<LeaveClassroomUseCase>,
    /// RecordFocusUseCase（フォーカス報告集約のユースケース）
    pub record_focus_usecase: Arc<RecordFocusUseCase>,
    /// RelayEventUseCase（イベント中継のユースケース）
    pub relay_event_usecase: Arc<RelayEventUseCase>,
    /// ManageSessionUseCase（セッション管理のユースケース）
    pub manage_session_usecase: Arc<ManageSessionUseCase>,
    /// GetClassroomUseCase（教室状態取得のユースケース）
    pub get_classroom_usecase: Arc<GetClassroomUseCase>,
    /// GetFocusLogUseCase（フォーカスログ取得のユースケース）
    pub get_focus_log_usecase: Arc<GetFocusLogUseCase>,
}
