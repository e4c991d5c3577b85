use actix::Message;
use serde::{Deserialize, Serialize};

use crate::game::{Player, StatePayload};

/// Move request sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub row: i64,
    pub col: i64,
}

/// Message sent from server to client
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ServerMessage {
    State(StatePayload),
    Assigned { player: Player },
    Error { error: String },
}

impl ServerMessage {
    pub fn error(text: impl Into<String>) -> Self {
        ServerMessage::Error { error: text.into() }
    }
}

/// Message type for pushing serialized text to a connection actor
#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionMessage(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn move_request_accepts_negative_and_extra_fields() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"row": -1, "col": 2, "note": "hi"}"#).unwrap();
        assert_eq!(request, MoveRequest { row: -1, col: 2 });
    }

    #[test]
    fn move_request_rejects_malformed_input() {
        for raw in [
            "not json",
            r#"{"row": 1}"#,
            r#"{"row": "1", "col": 1}"#,
            r#"{"row": 1.5, "col": 0}"#,
            r#"{"row": null, "col": 0}"#,
            r#"{"col": 1}"#,
            "42",
        ] {
            assert!(serde_json::from_str::<MoveRequest>(raw).is_err(), "{}", raw);
        }
    }

    #[test]
    fn assignment_and_error_shapes() {
        let assigned = serde_json::to_value(ServerMessage::Assigned { player: Player::O }).unwrap();
        assert_eq!(assigned, json!({ "player": "O" }));

        let error = serde_json::to_value(ServerMessage::error("Game is full")).unwrap();
        assert_eq!(error, json!({ "error": "Game is full" }));
    }
}
