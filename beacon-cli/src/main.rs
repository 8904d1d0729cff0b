use anyhow::Result;
use beacon_server::{AppState, Config, router};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// WebRTC signaling server: WebSocket relay on `/ws` plus a polled
/// offer/answer/ICE store on `/offer`, `/answer` and `/ice-candidate`.
#[derive(Parser)]
#[command(name = "beacon", version, about)]
struct Args {
    /// Address to serve both bindings on.
    #[arg(long, default_value = "0.0.0.0:3001")]
    bind: SocketAddr,

    /// Seconds an idle, memberless room keeps its stored data.
    #[arg(long, default_value_t = 300)]
    room_ttl: u64,

    /// Seconds between reaper sweeps.
    #[arg(long, default_value_t = 30)]
    reap_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config {
        room_ttl: Duration::from_secs(args.room_ttl),
        reap_interval: Duration::from_secs(args.reap_interval),
    };

    let app = AppState::new(config.clone());
    app.state.spawn_reaper(config.reap_interval);

    info!("signaling server listening on http://{}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, router(app)).await?;

    Ok(())
}
