//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatText, ConnectionId, ConnectionIdFactory, DrawAction},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::RouteError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards everything pushed to this connection's channel
/// to its WebSocket sink.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the message pusher
/// * `sender` - WebSocket sink of this connection
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    // Replay is queued on `tx` before the reader starts, so it always comes first.
    match state
        .session_lifecycle
        .connect(connection_id.clone(), tx)
        .await
    {
        Ok(replayed) => {
            tracing::info!(
                "Client '{}' connected ({} stroke(s) replayed)",
                connection_id,
                replayed
            );
        }
        Err(e) => {
            tracing::warn!("Failed to connect '{}': {}", connection_id, e);
            state.session_lifecycle.disconnect(&connection_id).await;
            return;
        }
    }

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_to_completion(
                        state_clone.clone(),
                        connection_id_clone.clone(),
                        text.as_str().to_owned(),
                    )
                    .await;
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", connection_id_clone);
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id_clone);
                    break;
                }
                // Ping/pong is answered by the WebSocket layer
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other.
    // Aborting the reader never cuts a frame short, see `dispatch_to_completion`.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.session_lifecycle.disconnect(&connection_id).await;
}

/// Handle one frame on its own task and wait for it.
///
/// Aborting the caller only stops the wait. Once a frame is accepted its log
/// mutation and fan-out always finish together, and the reader still handles
/// frames one at a time in receipt order.
async fn dispatch_to_completion(state: Arc<AppState>, sender: ConnectionId, text: String) {
    let handle = tokio::spawn(async move { dispatch(&state, &sender, &text).await });
    if let Err(e) = handle.await {
        tracing::error!("Message handler task failed: {}", e);
    }
}

/// Parse one text frame and hand it to the matching use case.
///
/// Malformed frames are dropped; the connection stays open.
async fn dispatch(state: &AppState, sender: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Dropping malformed message from '{}': {}", sender, e);
            return;
        }
    };
    let name = message.name();

    let result = match message {
        ClientMessage::Draw(dto) => match DrawAction::try_from(dto) {
            Ok(action) => state.broadcast_router.handle_draw(sender, action).await,
            Err(e) => {
                tracing::warn!("Dropping invalid draw from '{}': {}", sender, e);
                return;
            }
        },
        ClientMessage::ClearCanvas => state.broadcast_router.handle_clear(sender).await,
        ClientMessage::Offer { payload } => {
            state.signaling_relay.relay_offer(sender, payload).await
        }
        ClientMessage::Answer { payload } => {
            state.signaling_relay.relay_answer(sender, payload).await
        }
        ClientMessage::IceCandidate { payload } => {
            state.signaling_relay.relay_candidate(sender, payload).await
        }
        ClientMessage::SendMessage { text } => match ChatText::try_from(text) {
            Ok(text) => state.broadcast_router.handle_chat(sender, text).await,
            Err(e) => {
                tracing::warn!("Dropping invalid chat message from '{}': {}", sender, e);
                return;
            }
        },
    };

    match result {
        Ok(targets) => {
            tracing::debug!(
                "Handled '{}' from '{}' ({} target(s))",
                name,
                sender,
                targets.len()
            );
        }
        Err(RouteError::UnknownConnection(id)) => {
            tracing::debug!("Ignoring '{}' from unregistered connection '{}'", name, id);
        }
        Err(e) => {
            tracing::warn!("Failed to deliver '{}' from '{}': {}", name, sender, e);
        }
    }
}
