use actix::Recipient;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::game::{ConnectionId, GameSession, MoveResult, Player, SessionError};
use crate::models::{MoveRequest, ServerMessage, SessionMessage};

/// Application state shared between connections.
///
/// Each event holds the `session` lock for its whole read-modify-write and
/// while its broadcast is enqueued, so every connection observes payloads in
/// mutation order. Lock order is always `session`, then `sessions`.
#[derive(Default)]
pub struct AppState {
    pub session: Mutex<GameSession>,
    pub sessions: Mutex<HashMap<ConnectionId, Recipient<SessionMessage>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: ConnectionId, recipient: Recipient<SessionMessage>) {
        let mut sessions = self.sessions.lock();
        sessions.insert(id, recipient);
        info!("Total active sessions: {}", sessions.len());
    }

    pub fn unregister(&self, id: ConnectionId) {
        let mut sessions = self.sessions.lock();
        sessions.remove(&id);
        info!("Total active sessions: {}", sessions.len());
    }

    /// Seats `id`, tells it its role, then broadcasts the board to both seats.
    /// Joining again from a seated connection changes nothing and sends nothing.
    pub fn join(&self, id: ConnectionId) -> Result<Player, SessionError> {
        let mut session = self.session.lock();
        if let Some(player) = session.role_of(id) {
            debug!("Connection {} already seated as {}", id, player);
            return Ok(player);
        }
        let player = session.join(id)?;
        self.send_to(id, &ServerMessage::Assigned { player });
        self.broadcast_state(&session);
        info!("Session phase after join: {:?}", session.phase());
        Ok(player)
    }

    pub fn submit_move(&self, id: ConnectionId, request: MoveRequest) -> MoveResult {
        let mut session = self.session.lock();
        let result = session.submit_move(id, request.row, request.col);
        match &result {
            MoveResult::Accepted(_) => self.broadcast_state(&session),
            MoveResult::Ignored(reason) => {
                debug!("Ignored move {:?} from {}: {}", request, id, reason)
            }
        }
        result
    }

    /// No broadcast follows a leave; a remaining player keeps the last state
    /// they were sent.
    pub fn leave(&self, id: ConnectionId) -> Option<Player> {
        let mut session = self.session.lock();
        let vacated = session.leave(id);
        if vacated.is_some() {
            info!("Session phase after leave: {:?}", session.phase());
        }
        vacated
    }

    fn broadcast_state(&self, session: &GameSession) {
        let message = ServerMessage::State(session.payload());
        for id in session.bound_connections() {
            self.send_to(id, &message);
        }
    }

    /// Delivery failures are logged and otherwise ignored
    pub fn send_to(&self, id: ConnectionId, message: &ServerMessage) {
        let text = match serde_json::to_string(message) {
            Ok(s) => s,
            Err(e) => {
                warn!("Error serializing message: {}", e);
                return;
            }
        };

        let sessions = self.sessions.lock();
        match sessions.get(&id) {
            Some(recipient) => {
                if let Err(e) = recipient.try_send(SessionMessage(text)) {
                    warn!("Failed to deliver message to {}: {}", id, e);
                }
            }
            None => warn!("Session not found for connection ID: {}", id),
        }
    }
}
