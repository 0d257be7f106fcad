//! CLI student client for the Miharu classroom focus monitor.
//!
//! Samples the two local attention signals (tab visibility and face
//! presence), reports a focus score to the server every five seconds, and
//! renders classroom snapshots, distraction alerts and relayed quiz events.

pub mod error;
pub mod formatter;
pub mod runner;
pub mod sampler;
pub mod session;
pub mod ui;
