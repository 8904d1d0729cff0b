use crate::app::AppState;
use crate::state::SignalingState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ConnId, SignalMessage};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Push-binding entry point: upgrades to a WebSocket and assigns the
/// connection a fresh id.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

async fn handle_socket(socket: WebSocket, app: AppState) {
    let conn_id = ConnId::new();
    info!(%conn_id, "push connection opened");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    app.relay.register(conn_id, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = app.state.clone();
        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => handle_frame(&state, conn_id, &text).await,
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    app.relay.unregister(&conn_id);
    app.state.disconnect(conn_id).await;
    info!(%conn_id, "push connection closed");
}

/// One inbound frame from a push connection. Malformed frames and frames a
/// client has no business sending are dropped without closing the
/// connection.
pub async fn handle_frame(state: &SignalingState, conn_id: ConnId, text: &str) {
    let msg: SignalMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(%conn_id, "dropping malformed frame: {e}");
            return;
        }
    };

    match msg {
        SignalMessage::Join { room } => {
            if room.is_empty() {
                warn!(%conn_id, "join with empty room id dropped");
                return;
            }
            state.join(conn_id, &room).await;
        }
        SignalMessage::Leave { room } => {
            // leaving does not close the socket; the client may join
            // another room on the same connection later
            state.leave(conn_id, &room).await;
        }
        msg @ (SignalMessage::Offer { .. }
        | SignalMessage::Answer { .. }
        | SignalMessage::IceCandidate { .. }) => {
            // relay is addressed by the sender's recorded room
            let Some(room) = state.room_of(&conn_id) else {
                debug!(%conn_id, "signal from a connection outside any room dropped");
                return;
            };
            if msg.room() != room {
                debug!(
                    %conn_id,
                    frame_room = msg.room(),
                    room = %room,
                    "frame names a different room than the membership, using the membership"
                );
            }
            state.broadcast(conn_id, &room, msg).await;
        }
        SignalMessage::UserJoined { .. } | SignalMessage::UserLeft { .. } => {
            warn!(%conn_id, "server-originated frame type from a client dropped");
        }
    }
}
