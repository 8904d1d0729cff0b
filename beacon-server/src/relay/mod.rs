mod relay_service;
mod relay_sink;
mod ws_handler;

pub use relay_service::*;
pub use relay_sink::*;
pub use ws_handler::*;
