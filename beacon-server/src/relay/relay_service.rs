use crate::relay::RelaySink;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ConnId, SignalMessage};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct RelayInner {
    /// Send queue for every open push connection.
    conns: DashMap<ConnId, mpsc::UnboundedSender<Message>>,
}

/// Owns the outbound half of every push connection. Cheap to clone; all
/// clones share the same connection table.
#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl RelayService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RelayInner {
                conns: DashMap::new(),
            }),
        }
    }

    pub fn register(&self, conn_id: ConnId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.conns.insert(conn_id, tx);
    }

    pub fn unregister(&self, conn_id: &ConnId) {
        self.inner.conns.remove(conn_id);
    }
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelaySink for RelayService {
    async fn deliver(&self, conn_id: ConnId, msg: SignalMessage) {
        let Some(conn) = self.inner.conns.get(&conn_id) else {
            debug!(%conn_id, "recipient not connected, frame dropped");
            return;
        };

        match serde_json::to_string(&msg) {
            Ok(json) => {
                // queueing never blocks; a closed receiver just drops the frame
                if conn.send(Message::Text(json.into())).is_err() {
                    debug!(%conn_id, "send queue closed, frame dropped");
                }
            }
            Err(e) => error!("failed to serialize outgoing frame: {e}"),
        }
    }
}
