// translate-gateway - HTTP gateway for Google Translate
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod introspection;
pub mod metrics;
pub mod server;
pub mod translation;
pub mod utils;
