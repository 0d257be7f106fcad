//! Focus aggregation server for the Miharu classroom monitor.
//!
//! Students report focus samples over WebSocket; the server maintains a
//! bounded per-student focus history, broadcasts classroom snapshots and
//! distraction alerts, and appends session-tagged rows to a focus log.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
