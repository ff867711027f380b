use chrono::{DateTime, SecondsFormat, Utc};
use sweeper_core::{Game, GameSettings, GameState};
use sweeper_protocol::{GameStatus, GameView, SettingsView};

/// Client-facing copy of `game`, with covered bombs hidden.
pub fn game_view(game: &Game) -> GameView {
    GameView {
        id: game.id().to_owned(),
        owner_id: game.owner_id().to_owned(),
        state: status(game.state()),
        settings: settings_view(game.settings()),
        board: game.board().hide_bombs().to_rows(),
        started_at: game.started_at().map(timestamp),
        ended_at: game.ended_at().map(timestamp),
        revision: game.revision(),
    }
}

fn status(state: GameState) -> GameStatus {
    match state {
        GameState::New => GameStatus::New,
        GameState::OnGoing => GameStatus::OnGoing,
        GameState::Won => GameStatus::Won,
        GameState::Lost => GameStatus::Lost,
    }
}

fn settings_view(settings: GameSettings) -> SettingsView {
    SettingsView {
        rows: settings.rows,
        columns: settings.columns,
        bombs_count: settings.bombs_count,
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
