use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};

use crate::game::{ConnectionId, MoveResult};
use crate::models::{AppState, MoveRequest, ServerMessage, SessionMessage};

/// WebSocket handler for one tic-tac-toe connection
pub struct TicTacToeWebSocket {
    pub id: ConnectionId,
    pub app_state: web::Data<AppState>,
}

impl Actor for TicTacToeWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("WebSocket connection started: {}", self.id);

        // Register first so the join broadcast reaches this connection too
        self.app_state.register(self.id, ctx.address().recipient());

        match self.app_state.join(self.id) {
            Ok(player) => info!("Player {} connected as {}", self.id, player),
            // The address is dropped from the registry in `stopping`
            Err(e) => {
                warn!("Connection attempt from {} rejected: {}", self.id, e);
                if let Ok(text) = serde_json::to_string(&ServerMessage::error(e.to_string())) {
                    ctx.text(text);
                }
                ctx.close(None);
                ctx.stop();
            }
        }
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let Some(player) = self.app_state.leave(self.id) {
            info!("Player {} ({}) disconnected", self.id, player);
        }
        self.app_state.unregister(self.id);
        info!("WebSocket connection closed: {}", self.id);

        Running::Stop
    }
}

impl Handler<SessionMessage> for TicTacToeWebSocket {
    type Result = ();

    fn handle(&mut self, msg: SessionMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for TicTacToeWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                debug!("Received text message from {}: {}", self.id, text);
                self.handle_text(&text);
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported, dropping frame from {}", self.id);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                warn!("Protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }
}

impl TicTacToeWebSocket {
    /// Malformed input is logged and dropped; the connection stays open
    fn handle_text(&self, text: &str) {
        let request = match serde_json::from_str::<MoveRequest>(text) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid move format from {}: {}", self.id, e);
                return;
            }
        };

        if let MoveResult::Accepted(payload) = self.app_state.submit_move(self.id, request) {
            info!(
                "Accepted move ({}, {}) from {}, {} to move",
                request.row, request.col, self.id, payload.current_player
            );
        }
    }
}

/// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let id = ConnectionId::new();
    info!("New WebSocket connection: {}", id);

    let ws = TicTacToeWebSocket {
        id,
        app_state: app_state.clone(),
    };

    ws::start(ws, &req, stream)
}
