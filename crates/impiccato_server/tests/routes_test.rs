//! Tests for the HTTP routes, driven in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use impiccato::{Dictionary, ManualClock, Status};
use impiccato_server::api::{ErrorResponse, GameView, GuessResponse, PlayingResponse};
use impiccato_server::{HangmanService, SessionStore, router};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let clock = Arc::new(ManualClock::new(0.0));
    let dictionary = Dictionary::seeded(["CIAO"], 3).expect("Valid dictionary");
    router(HangmanService::new(
        SessionStore::new(),
        clock,
        Arc::new(dictionary),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Valid request");

    let response = app.clone().oneshot(request).await.expect("Infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Readable body")
        .to_bytes();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).expect("Valid JSON body")
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_start_game_hides_phrase() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "multiplayer", "phrase": "Babbo Natale"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let raw: Value = parse(&body);
    assert!(raw.get("phrase").is_none());
    let view: GameView = parse(&body);
    assert_eq!(view.hidden_phrase, "_____ ______");
    assert_eq!(view.stage_image, "images/stages/1.png");
    assert_eq!(view.status, Status::Playing);
}

#[tokio::test]
async fn test_letter_guess_round_trip() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "multiplayer", "phrase": "Babbo Natale"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions/p1/letter",
        Some(json!({"letter": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let guess: GuessResponse = parse(&body);
    assert!(guess.correct);
    assert!(!guess.repeated);
    assert_eq!(guess.game.hidden_phrase, "B_bb_ ______");
    assert_eq!(guess.game.attempts, 1);

    let (_, body) = send(
        &app,
        Method::POST,
        "/sessions/p1/letter",
        Some(json!({"letter": "B"})),
    )
    .await;
    let again: GuessResponse = parse(&body);
    assert!(again.repeated);
    assert_eq!(again.game.attempts, 1);
}

#[tokio::test]
async fn test_phrase_guess_reveals_phrase_when_over() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "singleplayer"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions/p1/phrase",
        Some(json!({"phrase": "ciao"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let guess: GuessResponse = parse(&body);
    assert!(guess.correct);
    assert_eq!(guess.game.status, Status::Won);
    assert_eq!(guess.game.phrase.as_deref(), Some("CIAO"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions/p1/letter",
        Some(json!({"letter": "c"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = parse(&body);
    assert!(error.error.contains("won"));

    let (_, body) = send(&app, Method::GET, "/sessions/p1/playing", None).await;
    let playing: PlayingResponse = parse(&body);
    assert!(!playing.playing);
}

#[tokio::test]
async fn test_bad_requests() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "battle royale"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "multiplayer"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "multiplayer", "phrase": "HELLO"})),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/sessions/p1/letter",
        Some(json!({"letter": "he"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_and_abandoned_sessions() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/sessions/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        Method::POST,
        "/sessions/ghost/letter",
        Some(json!({"letter": "a"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        Method::POST,
        "/sessions/p1/game",
        Some(json!({"mode": "singleplayer"})),
    )
    .await;
    let (_, body) = send(&app, Method::GET, "/sessions/p1/playing", None).await;
    assert!(parse::<PlayingResponse>(&body).playing);

    let (status, _) = send(&app, Method::DELETE, "/sessions/p1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/sessions/p1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
