use log::{debug, info};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::game::board::{Board, Outcome, Player, BOARD_SIZE};

/// Opaque identity of one transport connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        ConnectionId(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Game is full")]
    SessionFull,
}

/// Why a submitted move left the session untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredMove {
    NotSeated,
    GameOver,
    NotYourTurn,
    OutOfBounds,
    Occupied,
}

impl fmt::Display for IgnoredMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            IgnoredMove::NotSeated => "connection holds no slot",
            IgnoredMove::GameOver => "game already finished",
            IgnoredMove::NotYourTurn => "not this player's turn",
            IgnoredMove::OutOfBounds => "coordinates outside the board",
            IgnoredMove::Occupied => "cell already taken",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult {
    /// The move was applied; the payload must be broadcast
    Accepted(StatePayload),
    Ignored(IgnoredMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    WaitingForPlayers,
    Active,
    Finished,
}

/// Snapshot delivered to every bound connection after a state change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePayload {
    pub board: Board,
    pub current_player: Player,
    pub winner: Option<Player>,
    pub draw: bool,
}

/// Authoritative state of the single game served by this process.
///
/// Slot X is always filled before slot O. The session resets to a fresh board
/// only when the last seated connection leaves.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    slot_x: Option<ConnectionId>,
    slot_o: Option<ConnectionId>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats `id` in the first free slot. A connection that is already
    /// seated keeps its role.
    pub fn join(&mut self, id: ConnectionId) -> Result<Player, SessionError> {
        if let Some(role) = self.role_of(id) {
            return Ok(role);
        }
        if self.slot_x.is_none() {
            self.slot_x = Some(id);
            info!("Connection {} seated as X", id);
            Ok(Player::X)
        } else if self.slot_o.is_none() {
            self.slot_o = Some(id);
            info!("Connection {} seated as O", id);
            Ok(Player::O)
        } else {
            Err(SessionError::SessionFull)
        }
    }

    /// Applies a move for the seated connection `id`. Anything that is not a
    /// legal move for the player to act is ignored without mutation.
    pub fn submit_move(&mut self, id: ConnectionId, row: i64, col: i64) -> MoveResult {
        let Some(role) = self.role_of(id) else {
            return MoveResult::Ignored(IgnoredMove::NotSeated);
        };
        if self.outcome().is_terminal() {
            return MoveResult::Ignored(IgnoredMove::GameOver);
        }
        if role != self.current_player {
            return MoveResult::Ignored(IgnoredMove::NotYourTurn);
        }
        let (Some(r), Some(c)) = (to_index(row), to_index(col)) else {
            return MoveResult::Ignored(IgnoredMove::OutOfBounds);
        };
        if !self.board.place(r, c, role) {
            return MoveResult::Ignored(IgnoredMove::Occupied);
        }

        self.current_player = role.opponent();
        debug!("{} played ({}, {}), {} to move", role, r, c, self.current_player);
        match self.outcome() {
            Outcome::Win(player) => info!("{} wins", player),
            Outcome::Draw => info!("Game ended in a draw"),
            Outcome::InProgress => {}
        }
        MoveResult::Accepted(self.payload())
    }

    /// Frees whatever slot `id` holds and returns its role. Resets the
    /// session once both slots are empty.
    pub fn leave(&mut self, id: ConnectionId) -> Option<Player> {
        let vacated = match self.role_of(id) {
            Some(Player::X) => self.slot_x.take().map(|_| Player::X),
            Some(Player::O) => self.slot_o.take().map(|_| Player::O),
            None => None,
        };
        if let Some(role) = vacated {
            info!("Connection {} left slot {}", id, role);
            if self.slot_x.is_none() && self.slot_o.is_none() {
                self.board = Board::new();
                self.current_player = Player::X;
                info!("Both slots empty, game reset");
            }
        }
        vacated
    }

    pub fn payload(&self) -> StatePayload {
        let outcome = self.outcome();
        StatePayload {
            board: self.board,
            current_player: self.current_player,
            winner: outcome.winner(),
            draw: outcome == Outcome::Draw,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.slot_x.is_none() || self.slot_o.is_none() {
            SessionPhase::WaitingForPlayers
        } else if self.outcome().is_terminal() {
            SessionPhase::Finished
        } else {
            SessionPhase::Active
        }
    }

    pub fn role_of(&self, id: ConnectionId) -> Option<Player> {
        if self.slot_x == Some(id) {
            Some(Player::X)
        } else if self.slot_o == Some(id) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Broadcast recipients, X first
    pub fn bound_connections(&self) -> Vec<ConnectionId> {
        self.slot_x.into_iter().chain(self.slot_o).collect()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }
}

fn to_index(coord: i64) -> Option<usize> {
    usize::try_from(coord).ok().filter(|&i| i < BOARD_SIZE)
}
