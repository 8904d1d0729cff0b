use axum::extract::ws::Message;
use beacon_core::{ConnId, SignalMessage};
use beacon_server::AppState;
use beacon_server::relay::handle_frame;
use tokio::sync::mpsc;

/// A fake push connection: registered with the relay like a real WebSocket,
/// but frames are fed in directly and captured from the send queue.
pub struct TestConn {
    pub id: ConnId,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl TestConn {
    pub fn connect(app: &AppState) -> Self {
        let id = ConnId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        app.relay.register(id, tx);
        Self { id, rx }
    }

    /// Feed one raw inbound frame through the relay's frame handler.
    pub async fn send_raw(&self, app: &AppState, text: &str) {
        handle_frame(&app.state, self.id, text).await;
    }

    pub async fn send(&self, app: &AppState, msg: &SignalMessage) {
        let text = serde_json::to_string(msg).expect("frame serializes");
        self.send_raw(app, &text).await;
    }

    pub async fn join(&self, app: &AppState, room: &str) {
        self.send(
            app,
            &SignalMessage::Join {
                room: room.to_string(),
            },
        )
        .await;
    }

    /// Everything queued for this connection so far, parsed.
    pub fn drain(&mut self) -> Vec<SignalMessage> {
        let mut frames = Vec::new();
        while let Ok(Message::Text(text)) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&text).expect("server frames parse"));
        }
        frames
    }

    /// Simulate the socket closing: unregister and run the cleanup path.
    pub async fn disconnect(&self, app: &AppState) {
        app.relay.unregister(&self.id);
        app.state.disconnect(self.id).await;
    }
}
