//! Live-chat guess relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tebak-server
//! cargo run --bin tebak-server -- --port 3000 --upstream-url ws://127.0.0.1:8081/live
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tebak_server::{
    app::build_server,
    config::RelayConfig,
    domain::DEFAULT_MAX_RAW_LENGTH,
    infrastructure::connector::{WebSocketLiveConnector, websocket::DEFAULT_EVENT_BUFFER},
};
use tebak_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tebak-server")]
#[command(about = "Relays live-stream chat guesses, gifts and likes to overlays", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding index.html and the overlay assets
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    static_dir: PathBuf,

    /// WebSocket URL of the live-stream bridge
    #[arg(long, env = "UPSTREAM_URL", default_value = "ws://127.0.0.1:8081/live")]
    upstream_url: String,

    /// Longest chat line (in characters) considered for a guess
    #[arg(long, default_value_t = DEFAULT_MAX_RAW_LENGTH)]
    max_raw_length: usize,

    /// Seconds to wait before reconnecting
    #[arg(long, default_value_t = 5)]
    retry_delay_secs: u64,

    /// Seconds to wait for the bridge to confirm a room
    #[arg(long, default_value_t = 15)]
    connect_timeout_secs: u64,

    /// Gift type id that is sent as a combo (repeatable)
    #[arg(long = "streak-gift-type", default_values_t = [1])]
    streak_gift_types: Vec<i32>,

    /// Extra banned words, one per line
    #[arg(long)]
    banned_words_file: Option<PathBuf>,
}

impl From<&Args> for RelayConfig {
    fn from(args: &Args) -> Self {
        Self {
            upstream_url: args.upstream_url.clone(),
            static_dir: args.static_dir.clone(),
            max_raw_length: args.max_raw_length,
            retry_delay: Duration::from_secs(args.retry_delay_secs),
            connect_timeout: Duration::from_secs(args.connect_timeout_secs),
            streak_gift_types: args.streak_gift_types.clone(),
            banned_words_file: args.banned_words_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = RelayConfig::from(&args);
    tracing::info!("Upstream bridge: {}", config.upstream_url);

    let connector = Arc::new(WebSocketLiveConnector::new(
        config.upstream_url.clone(),
        config.connect_timeout,
        DEFAULT_EVENT_BUFFER,
    ));

    let server = match build_server(&config, connector, Arc::new(SystemClock)) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
