//! Wire protocol for the control surface.
//!
//! One JSON object per line in each direction, tagged by `"type"`:
//!
//! ```text
//! -> {"type":"StartGame","game":4}
//! <- {"type":"Success","message":"Started Pattern Race"}
//! -> {"type":"GetStatus"}
//! <- {"type":"Status","leds":[..],"buttons":[..],"scores":[..],"gameActive":true,"gameName":"Pattern Race"}
//! ```

use crate::engine::Status;
use crate::hardware::{NUM_BUTTONS, NUM_LEDS};
use crate::variant::{GameVariant, NUM_GAMES};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Request {
    GetStatus,
    /// Set LED `led`; without `state` the LED toggles.
    SetLed {
        led: i64,
        #[cfg_attr(feature = "serde", serde(default))]
        state: Option<i64>,
    },
    StartGame {
        game: i64,
    },
    StopGame,
    ListGames,
    /// Drive a virtual button line. Only boards without physical buttons
    /// accept this.
    PressButton {
        button: i64,
        pressed: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Response {
    Status(StatusSnapshot),
    Games { games: Vec<GameInfo> },
    Success { message: String },
    Error { message: String },
}

impl Response {
    pub fn success(message: impl Into<String>) -> Self {
        Response::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatusSnapshot {
    pub leds: [bool; NUM_LEDS],
    pub buttons: [bool; NUM_BUTTONS],
    pub scores: [u32; NUM_GAMES],
    pub game_active: bool,
    pub game_name: String,
}

impl From<&Status> for StatusSnapshot {
    fn from(status: &Status) -> Self {
        Self {
            leds: status.leds,
            buttons: status.buttons,
            scores: status.scores,
            game_active: status.game_active(),
            game_name: status.active.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameInfo {
    pub id: usize,
    pub name: String,
    pub description: String,
}

/// The six playable games in id order.
pub fn catalog() -> Vec<GameInfo> {
    GameVariant::PLAYABLE
        .iter()
        .enumerate()
        .map(|(id, v)| GameInfo {
            id,
            name: v.name().to_string(),
            description: v.description().to_string(),
        })
        .collect()
}

#[cfg(feature = "serde")]
pub fn decode_request(line: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(line.trim())
}

#[cfg(feature = "serde")]
pub fn encode_response(response: &Response) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn set_led_state_is_optional() {
        assert_eq!(
            decode_request(r#"{"type":"SetLed","led":3}"#).unwrap(),
            Request::SetLed { led: 3, state: None }
        );
        assert_eq!(
            decode_request(r#"{"type":"SetLed","led":3,"state":1}"#).unwrap(),
            Request::SetLed {
                led: 3,
                state: Some(1)
            }
        );
    }

    #[test]
    fn negative_ids_still_decode() {
        // Range checks belong to the engine, not the decoder.
        assert_eq!(
            decode_request(r#"{"type":"StartGame","game":-1}"#).unwrap(),
            Request::StartGame { game: -1 }
        );
    }

    #[test]
    fn malformed_lines_fail() {
        assert!(decode_request("StartGame 3").is_err());
        assert!(decode_request(r#"{"type":"Launch"}"#).is_err());
        assert!(decode_request(r#"{"type":"StartGame"}"#).is_err());
    }

    #[test]
    fn status_uses_camel_case() {
        let snapshot = StatusSnapshot {
            leds: [true, false, false, false, false, false],
            buttons: [false; NUM_BUTTONS],
            scores: [0, 3, 0, 0, 0, 0],
            game_active: true,
            game_name: "Whack-a-Mole".to_string(),
        };
        let json = encode_response(&Response::Status(snapshot)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "Status");
        assert_eq!(value["gameActive"], true);
        assert_eq!(value["gameName"], "Whack-a-Mole");
        assert_eq!(value["scores"][1], 3);
        assert_eq!(value["leds"].as_array().unwrap().len(), NUM_LEDS);
    }

    #[test]
    fn catalog_lists_six_games() {
        let games = catalog();
        assert_eq!(games.len(), NUM_GAMES);
        assert_eq!(games[0].name, "Simon Says");
        assert_eq!(games[5].name, "LED Chase");
    }
}
