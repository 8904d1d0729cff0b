mod registry;
mod room_state;
mod store;

pub use registry::SignalingState;
