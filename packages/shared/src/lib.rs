//! Shared utilities for the Miharu classroom focus monitor.
//!
//! This crate provides logging setup and time utilities used by both the
//! server and client binaries.

pub mod logger;
pub mod time;
