//! Focus aggregation server for the Miharu classroom monitor.
//!
//! Receives focus samples from student clients, broadcasts distraction alerts
//! and classroom snapshots, and appends session-tagged rows to a focus log.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin miharu-server
//! cargo run --bin miharu-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use miharu_server::{
    domain::{Classroom, ClassroomIdFactory, CurrentSession, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryClassroomRepository, InMemoryFocusLogRepository},
    },
    ui::Server,
    usecase::{
        GetClassroomUseCase, GetFocusLogUseCase, JoinClassroomUseCase, LeaveClassroomUseCase,
        ManageSessionUseCase, RecordFocusUseCase, RelayEventUseCase,
    },
};
use miharu_shared::{
    logger::setup_logger,
    time::{SystemClock, now_utc_millis},
};

#[derive(Parser, Debug)]
#[command(name = "miharu-server")]
#[command(about = "Classroom focus aggregation server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. Session handle
    // 4. UseCases
    // 5. Server

    // 1. Create Repositories (in-memory)
    let classroom = Arc::new(Mutex::new(Classroom::new(
        ClassroomIdFactory::generate().expect("Failed to generate ClassroomId"),
        Timestamp::new(now_utc_millis()),
    )));
    tracing::info!("Classroom {} created!", classroom.lock().await.id.as_str());
    let repository = Arc::new(InMemoryClassroomRepository::new(classroom));
    let focus_log = Arc::new(InMemoryFocusLogRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients.clone()));

    // 3. Create the shared session handle
    let session = CurrentSession::new();

    // 4. Create UseCases
    let join_classroom_usecase = Arc::new(JoinClassroomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let leave_classroom_usecase = Arc::new(LeaveClassroomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let record_focus_usecase = Arc::new(RecordFocusUseCase::new(
        repository.clone(),
        focus_log.clone(),
        message_pusher.clone(),
        session.clone(),
        Arc::new(SystemClock),
    ));
    let relay_event_usecase = Arc::new(RelayEventUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let manage_session_usecase = Arc::new(ManageSessionUseCase::new(session));
    let get_classroom_usecase = Arc::new(GetClassroomUseCase::new(repository.clone()));
    let get_focus_log_usecase = Arc::new(GetFocusLogUseCase::new(focus_log));

    // 5. Create and run the server
    let server = Server::new(
        join_classroom_usecase,
        leave_classroom_usecase,
        record_focus_usecase,
        relay_event_usecase,
        manage_session_usecase,
        get_classroom_usecase,
        get_focus_log_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
