//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    domain::DeliveryPolicy,
    usecase::{BroadcastRouter, GetBoardStateUseCase, SessionLifecycle, SignalingRelay},
};

use super::{
    handler::{debug_board_state, get_board_summary, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Startup configuration of the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Who receives a stroke: everyone but the sender, or everyone.
    pub draw_fanout: DeliveryPolicy,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Whiteboard sync and signaling relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     session_lifecycle,
///     broadcast_router,
///     signaling_relay,
///     get_board_state_usecase,
/// );
/// server.run(&config).await?;
/// ```
pub struct Server {
    session_lifecycle: Arc<SessionLifecycle>,
    broadcast_router: Arc<BroadcastRouter>,
    signaling_relay: Arc<SignalingRelay>,
    get_board_state_usecase: Arc<GetBoardStateUseCase>,
}

impl Server {
    pub fn new(
        session_lifecycle: Arc<SessionLifecycle>,
        broadcast_router: Arc<BroadcastRouter>,
        signaling_relay: Arc<SignalingRelay>,
        get_board_state_usecase: Arc<GetBoardStateUseCase>,
    ) -> Self {
        Self {
            session_lifecycle,
            broadcast_router,
            signaling_relay,
            get_board_state_usecase,
        }
    }

    /// Build the axum router with all endpoints and layers.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            session_lifecycle: self.session_lifecycle,
            broadcast_router: self.broadcast_router,
            signaling_relay: self.signaling_relay,
            get_board_state_usecase: self.get_board_state_usecase,
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/board", get(get_board_summary))
            .route("/debug/board", get(debug_board_state))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to the configured address and serve until a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Kokuban relay listening on {} (draw fanout: {:?})",
            listener.local_addr()?,
            config.draw_fanout
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
