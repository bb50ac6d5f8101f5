//! Wire types: the request/response vocabulary between clients and the
//! room server.
//!
//! Every frame on the wire is an [`Envelope`]. Clients send
//! `Envelope<Request>`, the server answers each one with exactly one
//! `Envelope<Response>` carrying the same `seq`, so a client can match
//! replies to requests.

use othello_engine::Position;
use othello_room::{PlayerId, Room, RoomError, RoomId};
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Longest chat message accepted, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Error codes, HTTP-style.
pub mod codes {
    /// Malformed or invalid request.
    pub const BAD_REQUEST: u16 = 400;
    /// The actor is not a member of the room.
    pub const FORBIDDEN: u16 = 403;
    /// Unknown room.
    pub const NOT_FOUND: u16 = 404;
    /// Valid request, wrong moment: out of turn, illegal move, refused
    /// skip, or the game is over.
    pub const CONFLICT: u16 = 409;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The top-level frame.
///
/// `seq` is chosen by the client and echoed in the reply. `timestamp` is
/// milliseconds since server start on replies; clients may leave it 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<P> {
    pub seq: u64,
    #[serde(default)]
    pub timestamp: u64,
    pub payload: P,
}

impl<P> Envelope<P> {
    /// Wraps `payload` with a zero timestamp.
    pub fn new(seq: u64, payload: P) -> Self {
        Self {
            seq,
            timestamp: 0,
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Client → Server commands.
///
/// `#[serde(tag = "type")]` produces flat JSON:
/// `{ "type": "MakeMove", "room_id": "...", "player_id": "...", "position": { "row": 2, "col": 3 } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    CreateRoom {
        creator_id: PlayerId,
        creator_name: String,
    },
    ListRooms,
    GetRoom {
        room_id: RoomId,
    },
    JoinRoom {
        room_id: RoomId,
        player_id: PlayerId,
        player_name: String,
    },
    MakeMove {
        room_id: RoomId,
        player_id: PlayerId,
        position: Position,
    },
    SkipTurn {
        room_id: RoomId,
        player_id: PlayerId,
    },
    Surrender {
        room_id: RoomId,
        player_id: PlayerId,
    },
    SendMessage {
        room_id: RoomId,
        player_id: PlayerId,
        message: String,
    },
    LeaveRoom {
        room_id: RoomId,
        player_id: PlayerId,
    },
    /// Liveness probe; answered without touching the room table.
    Health,
}

impl Request {
    /// Checks the input rules the room manager relies on:
    ///
    /// - ids and display names are non-empty
    /// - `position.row` and `position.col` are in `0..=7`
    /// - chat messages are 1 to [`MAX_MESSAGE_CHARS`] characters
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] naming the first broken rule.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Self::ListRooms | Self::Health => Ok(()),
            Self::CreateRoom {
                creator_id,
                creator_name,
            } => {
                require_non_empty("creator_id", creator_id.as_str())?;
                require_non_empty("creator_name", creator_name)
            }
            Self::GetRoom { room_id } => require_non_empty("room_id", room_id.as_str()),
            Self::JoinRoom {
                room_id,
                player_id,
                player_name,
            } => {
                require_ids(room_id, player_id)?;
                require_non_empty("player_name", player_name)
            }
            Self::SkipTurn { room_id, player_id }
            | Self::Surrender { room_id, player_id }
            | Self::LeaveRoom { room_id, player_id } => require_ids(room_id, player_id),
            Self::MakeMove {
                room_id,
                player_id,
                position,
            } => {
                require_ids(room_id, player_id)?;
                if !position.is_on_board() {
                    return Err(ProtocolError::InvalidMessage(format!(
                        "position {position} is off the board (row and col must be 0-7)"
                    )));
                }
                Ok(())
            }
            Self::SendMessage {
                room_id,
                player_id,
                message,
            } => {
                require_ids(room_id, player_id)?;
                let len = message.chars().count();
                if !(1..=MAX_MESSAGE_CHARS).contains(&len) {
                    return Err(ProtocolError::InvalidMessage(format!(
                        "message must be 1-{MAX_MESSAGE_CHARS} characters, got {len}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// The request's type tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateRoom { .. } => "CreateRoom",
            Self::ListRooms => "ListRooms",
            Self::GetRoom { .. } => "GetRoom",
            Self::JoinRoom { .. } => "JoinRoom",
            Self::MakeMove { .. } => "MakeMove",
            Self::SkipTurn { .. } => "SkipTurn",
            Self::Surrender { .. } => "Surrender",
            Self::SendMessage { .. } => "SendMessage",
            Self::LeaveRoom { .. } => "LeaveRoom",
            Self::Health => "Health",
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ProtocolError> {
    if value.is_empty() {
        return Err(ProtocolError::InvalidMessage(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_ids(room_id: &RoomId, player_id: &PlayerId) -> Result<(), ProtocolError> {
    require_non_empty("room_id", room_id.as_str())?;
    require_non_empty("player_id", player_id.as_str())
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Server → Client replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// The room after the command was applied.
    Room { room: Room },

    /// Answer to `ListRooms`: rooms with a free seat and a running game.
    RoomList { rooms: Vec<Room> },

    /// The last participant left and the room was deleted.
    RoomClosed { room_id: RoomId },

    /// Answer to `Health`.
    Health { status: String },

    /// The command was not performed. `code` follows [`codes`].
    Error { code: u16, message: String },
}

impl Response {
    /// Builds an `Error` reply.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }

    /// The `Health` reply of a live server.
    pub fn healthy() -> Self {
        Self::Health {
            status: "ok".to_string(),
        }
    }

    /// Returns `true` for `Error` replies.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<&RoomError> for Response {
    fn from(err: &RoomError) -> Self {
        let code = match err {
            RoomError::NotFound(_) => codes::NOT_FOUND,
            RoomError::NotAParticipant(_, _) => codes::FORBIDDEN,
            RoomError::NotYourTurn(_, _) | RoomError::Engine(_) => codes::CONFLICT,
        };
        Self::error(code, err.to_string())
    }
}

impl From<&ProtocolError> for Response {
    fn from(err: &ProtocolError) -> Self {
        Self::error(codes::BAD_REQUEST, err.to_string())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The JSON shapes below are what clients parse; a change here is a
    //! breaking protocol change.

    use othello_engine::EngineError;
    use serde_json::json;

    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn make_move(position: Position) -> Request {
        Request::MakeMove {
            room_id: RoomId::from("r1"),
            player_id: PlayerId::from("p1"),
            position,
        }
    }

    fn send(message: &str) -> Request {
        Request::SendMessage {
            room_id: RoomId::from("r1"),
            player_id: PlayerId::from("p1"),
            message: message.to_string(),
        }
    }

    // =====================================================================
    // JSON shapes
    // =====================================================================

    #[test]
    fn test_make_move_json_shape() {
        let json = serde_json::to_value(Envelope::new(7, make_move(pos(2, 3)))).unwrap();
        assert_eq!(
            json,
            json!({
                "seq": 7,
                "timestamp": 0,
                "payload": {
                    "type": "MakeMove",
                    "room_id": "r1",
                    "player_id": "p1",
                    "position": { "row": 2, "col": 3 }
                }
            })
        );
    }

    #[test]
    fn test_unit_request_json_shape() {
        let json = serde_json::to_value(Request::ListRooms).unwrap();
        assert_eq!(json, json!({ "type": "ListRooms" }));
    }

    #[test]
    fn test_envelope_timestamp_defaults_to_zero() {
        let env: Envelope<Request> =
            serde_json::from_value(json!({ "seq": 3, "payload": { "type": "Health" } })).unwrap();
        assert_eq!(env, Envelope::new(3, Request::Health));
    }

    #[test]
    fn test_error_response_json_shape() {
        let json = serde_json::to_value(Response::error(404, "room x not found")).unwrap();
        assert_eq!(
            json,
            json!({ "type": "Error", "code": 404, "message": "room x not found" })
        );
    }

    // =====================================================================
    // validate()
    // =====================================================================

    #[test]
    fn test_validate_accepts_board_corners() {
        assert!(make_move(pos(0, 0)).validate().is_ok());
        assert!(make_move(pos(7, 7)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_off_board_position() {
        assert!(matches!(
            make_move(pos(8, 0)).validate(),
            Err(ProtocolError::InvalidMessage(_))
        ));
        assert!(make_move(pos(0, 8)).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_ids() {
        let req = Request::JoinRoom {
            room_id: RoomId::from(""),
            player_id: PlayerId::from("p1"),
            player_name: "P".into(),
        };
        assert!(req.validate().is_err());

        let req = Request::CreateRoom {
            creator_id: PlayerId::from(""),
            creator_name: "P".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let req = Request::CreateRoom {
            creator_id: PlayerId::from("p1"),
            creator_name: String::new(),
        };
        assert!(req.validate().is_err());

        let req = Request::JoinRoom {
            room_id: RoomId::from("r1"),
            player_id: PlayerId::from("p1"),
            player_name: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_message_length_bounds() {
        assert!(send("").validate().is_err());
        assert!(send("x").validate().is_ok());
        assert!(send(&"x".repeat(500)).validate().is_ok());
        assert!(send(&"x".repeat(501)).validate().is_err());
        // Counted in characters, not bytes.
        assert!(send(&"é".repeat(500)).validate().is_ok());
    }

    // =====================================================================
    // Error mapping
    // =====================================================================

    #[test]
    fn test_room_errors_map_to_codes() {
        let room = RoomId::from("r1");
        let player = PlayerId::from("p1");
        let cases = [
            (RoomError::NotFound(room.clone()), codes::NOT_FOUND),
            (
                RoomError::NotAParticipant(player.clone(), room.clone()),
                codes::FORBIDDEN,
            ),
            (RoomError::NotYourTurn(player, room), codes::CONFLICT),
            (
                RoomError::Engine(EngineError::InvalidMove(pos(0, 0))),
                codes::CONFLICT,
            ),
        ];
        for (err, expected) in cases {
            match Response::from(&err) {
                Response::Error { code, .. } => assert_eq!(code, expected, "{err}"),
                other => panic!("expected error response, got {other:?}"),
            }
        }
    }
}
