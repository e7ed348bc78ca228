use std::net::IpAddr;

use clap::Parser;

/// HTTP API serving proposer rewards and sync committee duties per slot.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port the HTTP server listens on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,
}
