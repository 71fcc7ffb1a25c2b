//! Wire payload shapes for the client↔server event protocol (§6). Square
//! labels serialize through `Square`'s own (de)serializer, which already
//! normalizes case.

use crate::moves::{GameOutcome, ResolvedMove};
use crate::pieces::Color;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clocks {
    pub w: u64,
    pub b: u64,
}

impl Clocks {
    pub fn get(self, color: Color) -> u64 {
        match color {
            Color::White => self.w,
            Color::Black => self.b,
        }
    }

    pub fn set(&mut self, color: Color, value: u64) {
        match color {
            Color::White => self.w = value,
            Color::Black => self.b = value,
        }
    }
}

/// Acknowledgement error codes (§7): each corresponds to a single
/// contract violation and never terminates the connection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolError {
    #[error("missing-room-id")]
    #[serde(rename = "missing-room-id")]
    MissingRoomId,
    #[error("not-found")]
    #[serde(rename = "not-found")]
    NotFound,
    #[error("room-locked")]
    #[serde(rename = "room-locked")]
    RoomLocked,
    #[error("invalid-payload")]
    #[serde(rename = "invalid-payload")]
    InvalidPayload,
    #[error("not-ready")]
    #[serde(rename = "not-ready")]
    NotReady,
    #[error("game-over")]
    #[serde(rename = "game-over")]
    GameOver,
    #[error("illegal-move")]
    #[serde(rename = "illegal-move")]
    IllegalMove,
    #[error("server-error")]
    #[serde(rename = "server-error")]
    ServerError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomPayload {
    #[serde(rename = "timeMinutes")]
    pub time_minutes: Option<f64>,
}

/// `joinRoom` accepts either `{roomId}` or a bare string (§6).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JoinRoomPayload {
    Object { #[serde(rename = "roomId")] room_id: Option<String> },
    Bare(String),
}

impl JoinRoomPayload {
    pub fn room_id(&self) -> Option<&str> {
        match self {
            JoinRoomPayload::Object { room_id } => room_id.as_deref(),
            JoinRoomPayload::Bare(s) => Some(s.as_str()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MakeMovePayload {
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub resolved: ResolvedMove,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRoomAck {
    #[serde(rename = "roomId")]
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Ack {
    Ok { ok: bool },
    CreateRoom(CreateRoomAck),
    Error { error: ProtocolError },
}

impl Ack {
    pub fn ok() -> Self {
        Ack::Ok { ok: true }
    }

    pub fn error(err: ProtocolError) -> Self {
        Ack::Error { error: err }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStartEvent {
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub color: Color,
    pub state: Position,
    pub clocks: Clocks,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerJoinedEvent {
    #[serde(rename = "socketId")]
    pub socket_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveMadeEvent {
    pub resolved: ResolvedMove,
    pub state: Position,
    pub clocks: Clocks,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    pub clocks: Clocks,
    pub turn: Color,
    pub ts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndResult {
    Checkmate,
    Stalemate,
    Timeout,
}

impl From<GameOutcome> for EndResult {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Checkmate => EndResult::Checkmate,
            GameOutcome::Stalemate => EndResult::Stalemate,
            GameOutcome::Ongoing => unreachable!("gameEnd only emitted for a terminal outcome"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameEndEvent {
    pub result: EndResult,
    pub winner: Option<Color>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerLeftEvent {
    #[serde(rename = "socketId")]
    pub socket_id: String,
}

/// Every server→room broadcast (§6), tagged by event name on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum ServerEvent {
    #[serde(rename = "gameStart")]
    GameStart(GameStartEvent),
    #[serde(rename = "playerJoined")]
    PlayerJoined(PlayerJoinedEvent),
    #[serde(rename = "moveMade")]
    MoveMade(MoveMadeEvent),
    #[serde(rename = "clock")]
    Clock(ClockEvent),
    #[serde(rename = "gameEnd")]
    GameEnd(GameEndEvent),
    #[serde(rename = "playerLeft")]
    PlayerLeft(PlayerLeftEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_room_accepts_bare_string() {
        let parsed: JoinRoomPayload = serde_json::from_str("\"ab12c\"").unwrap();
        assert_eq!(parsed.room_id(), Some("ab12c"));
    }

    #[test]
    fn join_room_accepts_object() {
        let parsed: JoinRoomPayload = serde_json::from_str(r#"{"roomId":"ab12c"}"#).unwrap();
        assert_eq!(parsed.room_id(), Some("ab12c"));
    }

    #[test]
    fn protocol_error_serializes_to_spec_codes() {
        let value = serde_json::to_value(ProtocolError::RoomLocked).unwrap();
        assert_eq!(value, serde_json::json!("room-locked"));
    }
}
