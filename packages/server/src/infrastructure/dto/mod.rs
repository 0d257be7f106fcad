//! Data Transfer Objects (DTOs) for the focus monitor.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs (the wire contract)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
