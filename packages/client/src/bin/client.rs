//! Focus-reporting student client with reconnection support.
//!
//! Connects to the classroom server, reports a focus score every 5 seconds,
//! and renders snapshots, distraction alerts and relayed quiz events.
//! Tab visibility and face presence are simulated from the command line.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval). Duplicate student_id connections are rejected by the server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin miharu-client -- --student-id alice --name Alice
//! cargo run --bin miharu-client -- -s bob
//! ```

use clap::Parser;

use miharu_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "miharu-client")]
#[command(about = "Focus-reporting classroom client with a unique student ID", long_about = None)]
struct Args {
    /// Student ID identifying this connection (must be unique)
    #[arg(short = 's', long)]
    student_id: String,

    /// Display name shown to the classroom (falls back to a synthesized name)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = miharu_client::runner::run_client(args.url, args.student_id, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
