//! Wire format of the games HTTP API.
//!
//! Boards travel as rows of single-character cell codes: `e` covered, `X` covered and marked,
//! `E` revealed, `B` revealed bomb. Covered bombs are never sent, they look like `e`/`X`.

use serde::{Deserialize, Serialize};

/// Header carrying the id of the player that owns the games being addressed.
pub const OWNER_HEADER: &str = "x-user-id";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub rows: u16,
    pub columns: u16,
    #[serde(alias = "bombs_number")]
    pub bombs_count: u32,
}

/// Target of a reveal or mark action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRequest {
    pub row: i32,
    pub column: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    New,
    OnGoing,
    Won,
    Lost,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub rows: u16,
    pub columns: u16,
    pub bombs_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: String,
    pub owner_id: String,
    pub state: GameStatus,
    pub settings: SettingsView,
    pub board: Vec<String>,
    /// RFC 3339, set by the first reveal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// RFC 3339, set when the game is won or lost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    pub revision: u64,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_legacy_field_name() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"rows": 6, "columns": 5, "bombs_number": 10}"#).unwrap();

        assert_eq!(
            request,
            CreateGameRequest {
                rows: 6,
                columns: 5,
                bombs_count: 10
            }
        );
    }

    #[test]
    fn game_view_omits_unset_timestamps() {
        let view = GameView {
            id: "xyz".into(),
            owner_id: "alice".into(),
            state: GameStatus::OnGoing,
            settings: SettingsView {
                rows: 1,
                columns: 2,
                bombs_count: 1,
            },
            board: vec!["Ee".into()],
            started_at: Some("2006-01-02T15:04:05+00:00".into()),
            ended_at: None,
            revision: 2,
        };

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["state"], "ongoing");
        assert!(json.get("ended_at").is_none());
        assert_eq!(serde_json::from_value::<GameView>(json).unwrap(), view);
    }
}
