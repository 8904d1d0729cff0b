use crate::config::Config;
use crate::http::{
    close_session, fetch_answer, fetch_candidates, fetch_offer, store_answer, store_candidate,
    store_offer,
};
use crate::relay::{RelayService, ws_handler};
use crate::state::SignalingState;
use axum::Router;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Everything the handlers need, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub state: SignalingState,
    pub relay: RelayService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let relay = RelayService::new();
        let state = SignalingState::new(Arc::new(relay.clone()), config);
        Self { state, relay }
    }
}

/// Both bindings on one router: `/ws` for the push relay, the rest is the
/// pull store. Browser clients arrive from another origin, hence the
/// permissive CORS layer.
pub fn router(app: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/offer", post(store_offer).get(fetch_offer))
        .route("/answer", post(store_answer).get(fetch_answer))
        .route(
            "/ice-candidate",
            post(store_candidate).get(fetch_candidates),
        )
        .route("/session", delete(close_session))
        .layer(cors)
        .with_state(app)
}
