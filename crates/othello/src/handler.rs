//! Per-connection handler and request dispatch.
//!
//! Each accepted connection gets its own task running
//! [`handle_connection`]. Every frame it receives is answered with exactly
//! one reply frame:
//!
//!   1. decode `Envelope<Request>` (failure → `Error` 400, seq 0)
//!   2. validate the request (failure → `Error` 400)
//!   3. lock the room table and [`dispatch`]
//!   4. encode `Envelope<Response>` with the request's seq and send it

use std::sync::Arc;

use othello_protocol::{Codec, Envelope, Request, Response};
use othello_room::{Room, RoomManager};
use othello_transport::{Connection, WebSocketConnection};

use crate::server::ServerState;
use crate::OthelloError;

/// Serves one client until it disconnects, errors, or goes idle.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), OthelloError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, peer = %conn.peer_addr(), "client connected");

    loop {
        let data = match tokio::time::timeout(state.idle_timeout, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "client disconnected");
                break;
            }
            Ok(Err(e)) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
            Err(_) => {
                tracing::info!(%conn_id, "closing idle connection");
                let _ = conn.close().await;
                break;
            }
        };

        let reply = match state.codec.decode::<Envelope<Request>>(&data) {
            Ok(envelope) => Envelope {
                seq: envelope.seq,
                timestamp: state.uptime_ms(),
                payload: process(&state, envelope.payload).await,
            },
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "undecodable frame");
                Envelope {
                    seq: 0,
                    timestamp: state.uptime_ms(),
                    payload: Response::from(&e),
                }
            }
        };

        let bytes = state.codec.encode(&reply)?;
        conn.send(&bytes).await?;
    }

    Ok(())
}

async fn process<C: Codec>(state: &ServerState<C>, request: Request) -> Response {
    if let Err(e) = request.validate() {
        tracing::debug!(request = request.kind(), error = %e, "invalid request");
        return Response::from(&e);
    }
    if request == Request::Health {
        return Response::healthy();
    }

    let mut rooms = state.rooms.lock().await;
    dispatch(&mut rooms, request)
}

/// Applies one validated request to the room table.
///
/// Room errors become `Error` replies; the table is unchanged when a
/// command is rejected.
pub fn dispatch(rooms: &mut RoomManager, request: Request) -> Response {
    let kind = request.kind();
    let result = match request {
        Request::CreateRoom {
            creator_id,
            creator_name,
        } => Ok(room_reply(rooms.create_room(creator_id, creator_name))),
        Request::ListRooms => Ok(Response::RoomList {
            rooms: rooms.list_available_rooms(),
        }),
        Request::GetRoom { room_id } => rooms.get_room(&room_id).map(room_reply),
        Request::JoinRoom {
            room_id,
            player_id,
            player_name,
        } => rooms
            .join_room(&room_id, player_id, player_name)
            .map(room_reply),
        Request::MakeMove {
            room_id,
            player_id,
            position,
        } => rooms
            .make_move(&room_id, &player_id, position)
            .map(room_reply),
        Request::SkipTurn { room_id, player_id } => {
            rooms.skip_turn(&room_id, &player_id).map(room_reply)
        }
        Request::Surrender { room_id, player_id } => {
            rooms.surrender(&room_id, &player_id).map(room_reply)
        }
        Request::SendMessage {
            room_id,
            player_id,
            message,
        } => rooms
            .send_message(&room_id, &player_id, message)
            .map(room_reply),
        Request::LeaveRoom { room_id, player_id } => {
            rooms
                .leave_room(&room_id, &player_id)
                .map(move |remaining| match remaining {
                    Some(room) => room_reply(room),
                    None => Response::RoomClosed { room_id },
                })
        }
        Request::Health => Ok(Response::healthy()),
    };

    result.unwrap_or_else(|e| {
        tracing::debug!(request = kind, error = %e, "request rejected");
        Response::from(&e)
    })
}

fn room_reply(room: Room) -> Response {
    Response::Room { room }
}
