//! Whiteboard sync and WebRTC signaling relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-server
//! cargo run --bin kokuban-server -- --host 0.0.0.0 --port 3001 --draw-fanout all
//! ```

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use kokuban_server::{
    domain::DeliveryPolicy,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryWhiteboardRepository},
    },
    ui::{Server, ServerConfig},
    usecase::{
        BroadcastRouter, EventSequencer, GetBoardStateUseCase, SessionLifecycle, SignalingRelay,
    },
};
use kokuban_shared::{logger::setup_logger, time::SystemClock};

/// Who receives a stroke besides the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DrawFanoutArg {
    /// Everyone except the sender (the sender renders locally)
    Others,
    /// Everyone, including the sender
    All,
}

impl From<DrawFanoutArg> for DeliveryPolicy {
    fn from(arg: DrawFanoutArg) -> Self {
        match arg {
            DrawFanoutArg::Others => DeliveryPolicy::ToOthers,
            DrawFanoutArg::All => DeliveryPolicy::ToAll,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kokuban-server")]
#[command(about = "Whiteboard sync and WebRTC signaling relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KOKUBAN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Delivery of draw events
    #[arg(long, env = "KOKUBAN_DRAW_FANOUT", value_enum, default_value_t = DrawFanoutArg::Others)]
    draw_fanout: DrawFanoutArg,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            draw_fanout: args.draw_fanout.into(),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(&[env!("CARGO_BIN_NAME"), "tower_http"], &args.log_level);

    let config = ServerConfig::from(args);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories (in-memory)
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let whiteboard = Arc::new(InMemoryWhiteboardRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let sequencer = Arc::new(EventSequencer::new());
    let broadcast_router = Arc::new(BroadcastRouter::new(
        registry.clone(),
        whiteboard.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        config.draw_fanout,
    ));
    let signaling_relay = Arc::new(SignalingRelay::new(broadcast_router.clone()));
    let session_lifecycle = Arc::new(SessionLifecycle::new(
        registry.clone(),
        message_pusher,
        broadcast_router.clone(),
        sequencer.clone(),
        Arc::new(SystemClock),
    ));
    let get_board_state_usecase = Arc::new(GetBoardStateUseCase::new(
        registry, whiteboard, sequencer,
    ));

    // 4. Create and run the server
    let server = Server::new(
        session_lifecycle,
        broadcast_router,
        signaling_relay,
        get_board_state_usecase,
    );
    if let Err(e) = server.run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
