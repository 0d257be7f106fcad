//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    GetClassroomUseCase, GetFocusLogUseCase, JoinClassroomUseCase, LeaveClassroomUseCase,
    ManageSessionUseCase, RecordFocusUseCase, RelayEventUseCase,
};

use super::{
    handler::{
        http::{
            end_session, get_class_focus, get_classroom, get_session, get_session_logs,
            health_check, start_session,
        },
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Focus aggregation server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
pub struct Server {
    /// JoinClassroomUseCase（参加のユースケース）
    join_classroom_usecase: Arc<JoinClassroomUseCase>,
    /// LeaveClassroomUseCase（退室のユースケース）
    leave_classroom_usecase: Arc<LeaveClassroomUseCase>,
    /// RecordFocusUseCase（フォーカス報告集約のユースケース）
    record_focus_usecase: Arc<RecordFocusUseCase>,
    /// RelayEventUseCase（イベント中継のユースケース）
    relay_event_usecase: Arc<RelayEventUseCase>,
    /// ManageSessionUseCase（セッション管理のユースケース）
    manage_session_usecase: Arc<ManageSessionUseCase>,
    /// GetClassroomUseCase（教室状態取得のユースケース）
    get_classroom_usecase: Arc<GetClassroomUseCase>,
    /// GetFocusLogUseCase（フォーカスログ取得のユースケース）
    get_focus_log_usecase: Arc<GetFocusLogUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        join_classroom_usecase: Arc<JoinClassroomUseCase>,
        leave_classroom_usecase: Arc<LeaveClassroomUseCase>,
        record_focus_usecase: Arc<RecordFocusUseCase>,
        relay_event_usecase: Arc<RelayEventUseCase>,
        manage_session_usecase: Arc<ManageSessionUseCase>,
        get_classroom_usecase: Arc<GetClassroomUseCase>,
        get_focus_log_usecase: Arc<GetFocusLogUseCase>,
    ) -> Self {
        Self {
            join_classroom_usecase,
            leave_classroom_usecase,
            record_focus_usecase,
            relay_event_usecase,
            manage_session_usecase,
            get_classroom_usecase,
            get_focus_log_usecase,
        }
    }

    /// Run the focus aggregation server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_classroom_usecase: self.join_classroom_usecase,
            leave_classroom_usecase: self.leave_classroom_usecase,
            record_focus_usecase: self.record_focus_usecase,
            relay_event_usecase: self.relay_event_usecase,
            manage_session_usecase: self.manage_session_usecase,
            get_classroom_usecase: self.get_classroom_usecase,
            get_focus_log_usecase: self.get_focus_log_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/classroom", get(get_classroom))
            .route("/api/classroom/focus", get(get_class_focus))
            .route(
                "/api/session",
                get(get_session).post(start_session).delete(end_session),
            )
            .route("/api/sessions/{session_id}/logs", get(get_session_logs))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Focus aggregation server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
