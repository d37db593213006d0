// CLI module for translate-gateway
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// translate-gateway - HTTP gateway for Google Translate
#[derive(Parser, Debug)]
#[command(name = "translate-gateway", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.translate-gateway/config.toml)
    #[arg(short, long, env = "TRANSLATE_GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port and PORT
    #[arg(short, long)]
    pub port: Option<u16>,
}
