mod app;
mod config;
mod error;
pub mod http;
pub mod relay;
pub mod state;

pub use app::{AppState, router};
pub use config::Config;
pub use error::SignalingError;
