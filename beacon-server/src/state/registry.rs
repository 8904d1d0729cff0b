use crate::config::Config;
use crate::relay::RelaySink;
use crate::state::room_state::RoomState;
use beacon_core::{ConnId, SignalMessage};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub(crate) struct StateInner {
    pub(crate) rooms: DashMap<String, RoomState>,
    /// Which room each push connection currently belongs to. A connection
    /// holds at most one room; `join` moves it.
    pub(crate) memberships: DashMap<ConnId, String>,
    pub(crate) sink: Arc<dyn RelaySink>,
    pub(crate) room_ttl: Duration,
}

/// Single source of truth for room state, shared by the push relay and the
/// pull HTTP store. Constructed once at startup and injected into handlers.
#[derive(Clone)]
pub struct SignalingState {
    pub(crate) inner: Arc<StateInner>,
}

impl SignalingState {
    pub fn new(sink: Arc<dyn RelaySink>, config: Config) -> Self {
        Self {
            inner: Arc::new(StateInner {
                rooms: DashMap::new(),
                memberships: DashMap::new(),
                sink,
                room_ttl: config.room_ttl,
            }),
        }
    }

    /// Adds `conn_id` to `room_id`, creating the room if absent. Joining the
    /// room the connection is already in is a no-op; joining a different
    /// room leaves the old one first, so a connection never holds two
    /// memberships. Existing members are notified with `user-joined`.
    pub async fn join(&self, conn_id: ConnId, room_id: &str) {
        let previous = self
            .inner
            .memberships
            .get(&conn_id)
            .map(|room| room.value().clone());

        if let Some(previous) = previous {
            if previous == room_id {
                return;
            }
            self.leave(conn_id, &previous).await;
        }

        self.inner.memberships.insert(conn_id, room_id.to_string());

        let others: Vec<ConnId> = {
            let mut room = self
                .inner
                .rooms
                .entry(room_id.to_string())
                .or_insert_with(|| {
                    info!(room = room_id, "creating room");
                    RoomState::new()
                });
            room.touch();
            let others = room.members.iter().copied().collect();
            room.members.insert(conn_id);
            others
        };

        for member in others {
            self.inner
                .sink
                .deliver(
                    member,
                    SignalMessage::UserJoined {
                        room: room_id.to_string(),
                        payload: None,
                    },
                )
                .await;
        }
    }

    /// Removes `conn_id` from `room_id` and notifies the remaining members
    /// with `user-left`. Once the member set empties and no pull-store data
    /// remains, the room entry is dropped.
    pub async fn leave(&self, conn_id: ConnId, room_id: &str) {
        self.inner
            .memberships
            .remove_if(&conn_id, |_, room| room == room_id);

        let remaining: Vec<ConnId> = {
            let Some(mut room) = self.inner.rooms.get_mut(room_id) else {
                return;
            };
            if !room.members.remove(&conn_id) {
                return;
            }
            room.touch();
            room.members.iter().copied().collect()
        };

        if remaining.is_empty() {
            let removed = self
                .inner
                .rooms
                .remove_if(room_id, |_, room| {
                    room.members.is_empty() && !room.has_session_data()
                })
                .is_some();
            if removed {
                info!(room = room_id, "room emptied, dropping");
            }
        }

        for member in remaining {
            self.inner
                .sink
                .deliver(
                    member,
                    SignalMessage::UserLeft {
                        room: room_id.to_string(),
                        payload: None,
                    },
                )
                .await;
        }
    }

    /// Delivers `msg` to every member of `room_id` except `sender`. An
    /// unknown room is a silent no-op: signaling is best-effort and the
    /// peers renegotiate on loss.
    pub async fn broadcast(&self, sender: ConnId, room_id: &str, msg: SignalMessage) {
        let recipients: Vec<ConnId> = match self.inner.rooms.get(room_id) {
            Some(room) => room
                .members
                .iter()
                .copied()
                .filter(|member| *member != sender)
                .collect(),
            None => {
                debug!(room = room_id, "broadcast to unknown room dropped");
                return;
            }
        };

        for member in recipients {
            self.inner.sink.deliver(member, msg.clone()).await;
        }
    }

    /// Cleanup path for a closed connection; equivalent to an implicit
    /// `leave`. The membership entry is taken atomically, so racing a close
    /// against an in-flight frame still runs this at most once.
    pub async fn disconnect(&self, conn_id: ConnId) {
        if let Some((_, room_id)) = self.inner.memberships.remove(&conn_id) {
            self.leave(conn_id, &room_id).await;
        }
    }

    /// The room `conn_id` currently belongs to, if any.
    pub fn room_of(&self, conn_id: &ConnId) -> Option<String> {
        self.inner
            .memberships
            .get(conn_id)
            .map(|room| room.value().clone())
    }

    pub fn room_count(&self) -> usize {
        self.inner.rooms.len()
    }
}
