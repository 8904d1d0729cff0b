use async_trait::async_trait;
use beacon_core::{ConnId, SignalMessage};

/// Delivery seam between the room state and the transport. The production
/// implementation pushes frames into per-connection WebSocket send queues;
/// tests substitute a capturing mock.
#[async_trait]
pub trait RelaySink: Send + Sync {
    /// Best-effort delivery of one frame to one connection. A recipient
    /// that is not currently open is skipped, never retried.
    async fn deliver(&self, conn_id: ConnId, msg: SignalMessage);
}
