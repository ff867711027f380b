use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use sweeper_core::{GameSettings, Position};
use sweeper_protocol::{CellRequest, CreateGameRequest, GameView, OWNER_HEADER};

use crate::error::ApiFailure;
use crate::storage::is_valid_key;
use crate::view::game_view;
use crate::{AppState, Service};

/// Caller identity, taken from the owner header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(OWNER_HEADER)
            .ok_or_else(|| ApiFailure::invalid_input(format!("missing {OWNER_HEADER} header")))?;

        match value.to_str() {
            Ok(owner) if is_valid_key(owner) => Ok(Self(owner.to_owned())),
            _ => Err(ApiFailure::invalid_input(format!(
                "malformed {OWNER_HEADER} header"
            ))),
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiFailure> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiFailure::invalid_input(rejection.body_text()))
}

fn game_id(id: String) -> Result<String, ApiFailure> {
    // Nothing can be stored under an id outside the key charset.
    if is_valid_key(&id) {
        Ok(id)
    } else {
        Err(ApiFailure::not_found())
    }
}

/// Runs a blocking service call off the async workers.
async fn call<T, F>(state: &AppState, f: F) -> Result<T, ApiFailure>
where
    T: Send + 'static,
    F: FnOnce(&Service) -> sweeper_core::Result<T> + Send + 'static,
{
    let service = state.service();
    tokio::task::spawn_blocking(move || f(service.as_ref()))
        .await
        .map_err(|err| ApiFailure::internal(format!("game task failed: {err}")))?
        .map_err(ApiFailure::from)
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn create_game(
    State(state): State<AppState>,
    Owner(owner): Owner,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GameView>), ApiFailure> {
    let request = body(payload)?;
    let settings = GameSettings::new(request.rows, request.columns, request.bombs_count)?;

    let game = call(&state, move |service| service.create(&owner, settings)).await?;
    Ok((StatusCode::CREATED, Json(game_view(&game))))
}

pub async fn list_games(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<GameView>>, ApiFailure> {
    let games = call(&state, move |service| service.get_all(&owner)).await?;
    Ok(Json(games.iter().map(game_view).collect()))
}

pub async fn get_game(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiFailure> {
    let id = game_id(id)?;
    let game = call(&state, move |service| service.get(&owner, &id)).await?;
    Ok(Json(game_view(&game)))
}

pub async fn reveal_cell(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
    payload: Result<Json<CellRequest>, JsonRejection>,
) -> Result<Json<GameView>, ApiFailure> {
    let id = game_id(id)?;
    let CellRequest { row, column } = body(payload)?;

    let game = call(&state, move |service| {
        service.reveal_cell(&owner, &id, Position::new(row, column))
    })
    .await?;
    Ok(Json(game_view(&game)))
}

pub async fn mark_cell(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
    payload: Result<Json<CellRequest>, JsonRejection>,
) -> Result<Json<GameView>, ApiFailure> {
    let id = game_id(id)?;
    let CellRequest { row, column } = body(payload)?;

    let game = call(&state, move |service| {
        service.mark_cell(&owner, &id, Position::new(row, column))
    })
    .await?;
    Ok(Json(game_view(&game)))
}
