use std::time::Duration;

/// Runtime knobs for the signaling server.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long an idle room with no push members keeps its stored
    /// offer/answer/candidates before the reaper drops it.
    pub room_ttl: Duration,
    /// Interval between reaper sweeps.
    pub reap_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            room_ttl: Duration::from_secs(300),
            reap_interval: Duration::from_secs(30),
        }
    }
}
