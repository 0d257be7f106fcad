//! UseCase 層
//!
//! ドメイン層の trait（Repository / MessagePusher）にのみ依存する
//! アプリケーションロジック。UI 層（axum handler）から呼び出されます。

pub mod error;
pub mod get_classroom;
pub mod get_focus_log;
pub mod join_classroom;
pub mod leave_classroom;
pub mod manage_session;
pub mod record_focus;
pub mod relay_event;

pub use error::JoinError;
pub use get_classroom::GetClassroomUseCase;
pub use get_focus_log::GetFocusLogUseCase;
pub use join_classroom::JoinClassroomUseCase;
pub use leave_classroom::LeaveClassroomUseCase;
pub use manage_session::ManageSessionUseCase;
pub use record_focus::{RecordFocusUseCase, RecordedFocus};
pub use relay_event::RelayEventUseCase;
