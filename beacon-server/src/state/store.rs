use crate::state::registry::SignalingState;
use crate::state::room_state::RoomState;
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Pull-store view over the shared room map. Offer and answer are
/// last-write-wins; candidates accumulate in arrival order. Reads are
/// non-destructive, so polling is idempotent.
impl SignalingState {
    pub fn put_offer(&self, room_id: &str, offer: Value) {
        self.with_room(room_id, |room| room.offer = Some(offer));
    }

    pub fn put_answer(&self, room_id: &str, answer: Value) {
        self.with_room(room_id, |room| room.answer = Some(answer));
    }

    pub fn push_candidate(&self, room_id: &str, candidate: Value) {
        self.with_room(room_id, |room| room.candidates.push(candidate));
    }

    pub fn offer(&self, room_id: &str) -> Option<Value> {
        self.inner.rooms.get(room_id).and_then(|room| room.offer.clone())
    }

    pub fn answer(&self, room_id: &str) -> Option<Value> {
        self.inner
            .rooms
            .get(room_id)
            .and_then(|room| room.answer.clone())
    }

    pub fn candidates(&self, room_id: &str) -> Vec<Value> {
        self.inner
            .rooms
            .get(room_id)
            .map(|room| room.candidates.clone())
            .unwrap_or_default()
    }

    /// Explicit session close: drops a room's stored negotiation data once
    /// the caller's peer connection is established. Push memberships are
    /// untouched; the room entry itself goes away only when memberless.
    /// Closing an unknown room is fine.
    pub fn close_session(&self, room_id: &str) {
        if let Some(mut room) = self.inner.rooms.get_mut(room_id) {
            room.offer = None;
            room.answer = None;
            room.candidates.clear();
            room.touch();
        }

        let removed = self
            .inner
            .rooms
            .remove_if(room_id, |_, room| {
                room.members.is_empty() && !room.has_session_data()
            })
            .is_some();
        if removed {
            info!(room = room_id, "session closed, dropping room");
        }
    }

    /// Drops memberless rooms whose last write is older than the configured
    /// TTL. Rooms with live push members are never reaped.
    pub fn reap_idle(&self) -> usize {
        let ttl = self.inner.room_ttl;
        let before = self.inner.rooms.len();
        self.inner
            .rooms
            .retain(|_, room| !room.members.is_empty() || room.touched.elapsed() < ttl);
        before - self.inner.rooms.len()
    }

    pub fn spawn_reaper(&self, interval: Duration) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let reaped = state.reap_idle();
                if reaped > 0 {
                    info!(reaped, "reaped idle rooms");
                } else {
                    debug!("reaper sweep found nothing to drop");
                }
            }
        })
    }

    fn with_room(&self, room_id: &str, write: impl FnOnce(&mut RoomState)) {
        let mut room = self
            .inner
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!(room = room_id, "creating room");
                RoomState::new()
            });
        write(&mut room);
        room.touch();
    }
}
