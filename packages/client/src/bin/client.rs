//! Terminal viewer for a Tebak relay.
//!
//! Prints status changes, guesses, gifts and likes as they arrive, and
//! switches the relayed live user from the prompt. Reconnects on
//! disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tebak-client
//! cargo run --bin tebak-client -- --username alice
//! ```

use clap::Parser;

use tebak_client::run_client;
use tebak_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tebak-client")]
#[command(about = "Terminal viewer for a Tebak relay", long_about = None)]
struct Args {
    /// Relay WebSocket URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Live username to relay right after connecting
    #[arg(short = 'n', long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
