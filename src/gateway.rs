//! Connection gateway: WebSocket transport around the room.
//!
//! Holds no game logic. Each socket gets a session from the room, a writer
//! task draining that session's outbox into the socket, and a reader loop
//! routing decoded frames back into the room.

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::protocol::ClientMessage;
use crate::room::{Room, RoomSnapshot};
use crate::session::SessionId;
use axum::{
    Json, Router,
    body::Body,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::Request,
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use strictly_chess_rules::RulesEngine;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Builds the HTTP router: `/ws` for play, `/health` and `/state` for
/// diagnostics.
pub fn router<R: RulesEngine>(room: Room<R>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler::<R>))
        .route("/health", get(health))
        .route("/state", get(state_handler::<R>))
        .with_state(room)
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
}

/// Binds the configured address and serves the relay until the process exits.
#[instrument(skip(config), fields(addr = %config.bind_addr()))]
pub async fn serve(config: &RelayConfig) -> Result<(), RelayError> {
    let room = Room::new(config.rules()?);
    let listener = TcpListener::bind((config.host().as_str(), *config.port())).await?;
    serve_on(listener, room).await
}

/// Serves the relay on an already bound listener.
pub async fn serve_on<R: RulesEngine>(
    listener: TcpListener,
    room: Room<R>,
) -> Result<(), RelayError> {
    let addr = listener.local_addr()?;
    info!(%addr, "Relay ready at ws://{}/ws", addr);
    axum::serve(listener, router(room)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn state_handler<R: RulesEngine>(State(room): State<Room<R>>) -> Json<RoomSnapshot> {
    Json(room.snapshot())
}

async fn ws_handler<R: RulesEngine>(
    ws: WebSocketUpgrade,
    State(room): State<Room<R>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, room))
}

/// A live socket's hold on its session.
///
/// Dropping it stops the writer and releases the session, whether the reader
/// loop ended normally or unwound.
struct Connection<R: RulesEngine> {
    room: Room<R>,
    session: SessionId,
    writer: AbortHandle,
}

impl<R: RulesEngine> Drop for Connection<R> {
    fn drop(&mut self) {
        self.writer.abort();
        self.room.disconnect(self.session);
    }
}

#[instrument(skip_all)]
async fn handle_socket<R: RulesEngine>(socket: WebSocket, room: Room<R>) {
    let (session, mut outbox) = room.connect();
    let (mut sink, mut stream) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(message) = outbox.recv().await {
            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    warn!(%session, error = %e, "Failed to encode outbound message");
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                debug!(%session, "Socket closed while sending");
                break;
            }
        }
    });
    let connection = Connection {
        room,
        session,
        writer: writer.abort_handle(),
    };

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => dispatch(&connection.room, session, text.as_str()),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!(%session, error = %e, "Socket read failed");
                break;
            }
        }
    }
}

/// Routes one decoded text frame into the room.
fn dispatch<R: RulesEngine>(room: &Room<R>, session: SessionId, text: &str) {
    match ClientMessage::parse(text) {
        Ok(ClientMessage::MoveIntent(intent)) => {
            // Outcome has already been published to the relevant sessions.
            let _ = room.submit_move(session, intent);
        }
        Ok(ClientMessage::SyncRequest) => room.request_sync(session),
        Err(e) => {
            warn!(%session, error = %e, "Undecodable frame");
            room.reject_malformed(session);
        }
    }
}
