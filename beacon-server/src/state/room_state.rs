use beacon_core::ConnId;
use serde_json::Value;
use std::collections::HashSet;
use tokio::time::Instant;

/// All state for one room, shared by both bindings: the push member set
/// and the pull-store negotiation data.
pub(crate) struct RoomState {
    pub(crate) members: HashSet<ConnId>,
    pub(crate) offer: Option<Value>,
    pub(crate) answer: Option<Value>,
    pub(crate) candidates: Vec<Value>,
    /// Last membership change or store write, used by the reaper.
    pub(crate) touched: Instant,
}

impl RoomState {
    pub(crate) fn new() -> Self {
        Self {
            members: HashSet::new(),
            offer: None,
            answer: None,
            candidates: Vec::new(),
            touched: Instant::now(),
        }
    }

    pub(crate) fn touch(&mut self) {
        self.touched = Instant::now();
    }

    pub(crate) fn has_session_data(&self) -> bool {
        self.offer.is_some() || self.answer.is_some() || !self.candidates.is_empty()
    }
}
