//! インメモリ Repository 実装

pub mod classroom;
pub mod focus_log;

pub use classroom::InMemoryClassroomRepository;
pub use focus_log::InMemoryFocusLogRepository;
