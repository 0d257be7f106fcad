//! UI 層
//!
//! axum のハンドラ（WebSocket / HTTP）とサーバ実行ロジック。

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
