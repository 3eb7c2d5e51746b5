//! Live update WebSocket endpoint.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::app::AppState;
use domain::services::UpdateEvent;

/// Upgrade to a WebSocket that streams update events.
///
/// GET /api/v1/updates
///
/// Each connected client gets every event published after it subscribed.
/// Inbound frames are ignored; the stream is one-way.
pub async fn updates_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let rx = state.updates_tx.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(mut socket: WebSocket, mut rx: broadcast::Receiver<UpdateEvent>) {
    debug!("Live update client connected");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(_) => continue,
                    };
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow consumer; it misses events rather than stalling publishers
                    warn!(skipped, "Live update client lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }

    debug!("Live update client disconnected");
}
