//! Pull-binding handlers. Each store endpoint validates only that `roomId`
//! is present and non-empty; the offer/answer/candidate payloads are opaque
//! and stored as-is.

use crate::app::AppState;
use crate::error::SignalingError;
use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    #[serde(rename = "roomId")]
    room_id: Option<String>,
}

impl RoomQuery {
    fn require(&self) -> Result<&str, SignalingError> {
        match self.room_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(SignalingError::MissingField("roomId")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreAck {
    success: bool,
}

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    offer: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    candidates: Vec<Value>,
}

pub async fn store_offer(
    State(app): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<StoreAck>, SignalingError> {
    let room_id = room_id_of(&body)?;
    let offer = field(&body, "offer")?;
    app.state.put_offer(&room_id, offer);
    Ok(Json(StoreAck { success: true }))
}

pub async fn fetch_offer(
    State(app): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<OfferResponse>, SignalingError> {
    let room_id = query.require()?;
    Ok(Json(OfferResponse {
        offer: app.state.offer(room_id),
    }))
}

pub async fn store_answer(
    State(app): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<StoreAck>, SignalingError> {
    let room_id = room_id_of(&body)?;
    let answer = field(&body, "answer")?;
    app.state.put_answer(&room_id, answer);
    Ok(Json(StoreAck { success: true }))
}

pub async fn fetch_answer(
    State(app): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<AnswerResponse>, SignalingError> {
    let room_id = query.require()?;
    Ok(Json(AnswerResponse {
        answer: app.state.answer(room_id),
    }))
}

pub async fn store_candidate(
    State(app): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<StoreAck>, SignalingError> {
    let room_id = room_id_of(&body)?;
    let candidate = field(&body, "candidate")?;
    app.state.push_candidate(&room_id, candidate);
    Ok(Json(StoreAck { success: true }))
}

pub async fn fetch_candidates(
    State(app): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<CandidatesResponse>, SignalingError> {
    let room_id = query.require()?;
    Ok(Json(CandidatesResponse {
        candidates: app.state.candidates(room_id),
    }))
}

/// Drops a room's stored negotiation data once the caller is connected.
pub async fn close_session(
    State(app): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<StoreAck>, SignalingError> {
    let room_id = query.require()?;
    app.state.close_session(room_id);
    Ok(Json(StoreAck { success: true }))
}

fn room_id_of(body: &Value) -> Result<String, SignalingError> {
    match body.get("roomId").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(SignalingError::MissingField("roomId")),
    }
}

fn field(body: &Value, name: &'static str) -> Result<Value, SignalingError> {
    match body.get(name) {
        Some(Value::Null) | None => Err(SignalingError::MissingField(name)),
        Some(value) => Ok(value.clone()),
    }
}
