//! HTTP routes for the game server.

use crate::api::{
    ErrorResponse, GameView, GuessLetterRequest, GuessPhraseRequest, GuessResponse,
    PlayingResponse, StartGameRequest,
};
use crate::service::{HangmanService, ServiceError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use impiccato::GameError;
use tracing::{info, instrument, warn};

/// Builds the router for all game endpoints.
#[instrument(skip(service))]
pub fn router(service: HangmanService) -> Router {
    info!("Building game routes");
    Router::new()
        .route("/health", get(health))
        .route("/sessions/{id}", get(get_game).delete(abandon_game))
        .route("/sessions/{id}/game", post(start_game))
        .route("/sessions/{id}/playing", get(is_playing))
        .route("/sessions/{id}/letter", post(guess_letter))
        .route("/sessions/{id}/phrase", post(guess_phrase))
        .with_state(service)
}

/// A [`ServiceError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Game(GameError::InvalidState(_)) => StatusCode::CONFLICT,
            ServiceError::Game(GameError::EmptyDictionary) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Game(
                GameError::InvalidMode(_) | GameError::MissingPhrase | GameError::InvalidInput(_),
            ) => StatusCode::BAD_REQUEST,
        };
        warn!(status = %status, error = %self.0, "Request rejected");
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(service, req), fields(mode = %req.mode))]
async fn start_game(
    State(service): State<HangmanService>,
    Path(id): Path<String>,
    Json(req): Json<StartGameRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    service.initialize(&id, &req.mode, req.phrase.as_deref())?;
    let game = service.snapshot(&id)?;
    Ok((StatusCode::CREATED, Json(GameView::from(&game))))
}

#[instrument(skip(service))]
async fn get_game(
    State(service): State<HangmanService>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = service.snapshot(&id)?;
    Ok(Json(GameView::from(&game)))
}

#[instrument(skip(service))]
async fn is_playing(
    State(service): State<HangmanService>,
    Path(id): Path<String>,
) -> Json<PlayingResponse> {
    Json(PlayingResponse {
        playing: service.is_playing(&id),
    })
}

#[instrument(skip(service, req), fields(letter = %req.letter))]
async fn guess_letter(
    State(service): State<HangmanService>,
    Path(id): Path<String>,
    Json(req): Json<GuessLetterRequest>,
) -> Result<Json<GuessResponse>, ApiError> {
    let (outcome, game) = service.guess_letter_with_game(&id, &req.letter)?;
    Ok(Json(GuessResponse {
        correct: outcome.correct,
        repeated: outcome.repeated,
        game: GameView::from(&game),
    }))
}

#[instrument(skip(service, req))]
async fn guess_phrase(
    State(service): State<HangmanService>,
    Path(id): Path<String>,
    Json(req): Json<GuessPhraseRequest>,
) -> Result<Json<GuessResponse>, ApiError> {
    let (outcome, game) = service.guess_phrase_with_game(&id, &req.phrase)?;
    Ok(Json(GuessResponse {
        correct: outcome.correct,
        repeated: outcome.repeated,
        game: GameView::from(&game),
    }))
}

#[instrument(skip(service))]
async fn abandon_game(
    State(service): State<HangmanService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.abandon(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
