pub mod model;

pub use model::{ConnId, SignalMessage};
