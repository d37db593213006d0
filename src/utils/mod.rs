//! Utility functions and helpers for translate-gateway.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret scrubbing.
//! - `retry`: Retry loop with exponential backoff for upstream calls.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;
