//! Tests for session custody and expiry.

use impiccato::{GameSession, ManualClock, Status};
use impiccato_server::SessionStore;
use std::sync::Arc;
use std::thread;

fn game(phrase: &str) -> GameSession {
    GameSession::multiplayer(phrase, &ManualClock::new(0.0)).expect("Valid phrase")
}

#[test]
fn test_insert_replaces_previous_game() {
    let store = SessionStore::new();
    store.insert("alice", game("Ciao"), 0.0);
    store.insert("alice", game("Babbo Natale"), 1.0);

    assert_eq!(store.len(), 1);
    let stored = store.get("alice", 2.0).expect("Session exists");
    assert_eq!(stored.phrase(), "Babbo Natale");
}

#[test]
fn test_sessions_are_independent() {
    let store = SessionStore::new();
    let clock = ManualClock::new(0.0);
    store.insert("alice", game("Ciao"), 0.0);
    store.insert("bob", game("Ciao"), 0.0);

    store
        .with_session("alice", 1.0, |g| g.guess_letter("z", &clock))
        .expect("Session exists")
        .expect("Valid guess");

    assert_eq!(store.get("alice", 1.0).expect("Exists").stage(), 1);
    assert_eq!(store.get("bob", 1.0).expect("Exists").stage(), 0);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_missing_session_yields_none() {
    let store = SessionStore::new();
    assert!(store.get("nobody", 0.0).is_none());
    assert!(store.with_session("nobody", 0.0, |_| ()).is_none());
    assert!(store.remove("nobody").is_none());
}

#[test]
fn test_remove_returns_game() {
    let store = SessionStore::new();
    store.insert("alice", game("Ciao"), 0.0);

    let removed = store.remove("alice").expect("Session existed");
    assert_eq!(removed.phrase(), "Ciao");
    assert!(store.is_empty());
}

#[test]
fn test_purge_drops_only_idle_sessions() {
    let store = SessionStore::new();
    store.insert("idle", game("Ciao"), 0.0);
    store.insert("busy", game("Ciao"), 0.0);

    // Touching a session keeps it alive.
    store.with_session("busy", 90.0, |_| ());

    assert_eq!(store.purge_expired(100.0, 50.0), 1);
    assert!(store.get("idle", 100.0).is_none());
    assert!(store.get("busy", 100.0).is_some());
}

#[test]
fn test_concurrent_guesses_are_serialized() {
    let store = SessionStore::new();
    let clock = Arc::new(ManualClock::new(0.0));
    store.insert("alice", game("abcdefghijklmnopqrstuvwxyz"), 0.0);

    let handles: Vec<_> = "abcdefghijklmnopqrstuvwxy"
        .chars()
        .flat_map(|c| [c, c])
        .map(|c| {
            let store = store.clone();
            let clock = Arc::clone(&clock);
            thread::spawn(move || {
                store
                    .with_session("alice", 0.0, |g| g.guess_letter(&c.to_string(), &*clock))
                    .expect("Session exists")
                    .expect("Valid guess");
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Guess thread panicked");
    }

    let game = store.get("alice", 0.0).expect("Session exists");
    assert_eq!(game.attempts(), 25);
    assert_eq!(game.tried_chars().len(), 25);
    assert_eq!(game.stage(), 0);
    assert_eq!(game.status(), Status::Playing);
}

#[test]
fn test_guess_racing_removal_is_never_lost() {
    let clock = Arc::new(ManualClock::new(0.0));

    for _ in 0..200 {
        let store = SessionStore::new();
        store.insert("alice", game("Ciao"), 0.0);

        let guesser = {
            let store = store.clone();
            let clock = Arc::clone(&clock);
            thread::spawn(move || {
                store.with_session("alice", 0.0, |g| g.guess_letter("z", &*clock))
            })
        };
        let removed = store.remove("alice").expect("Session existed");
        let guessed = guesser.join().expect("Guess thread panicked");

        // A guess that reports success must be part of the game that was removed.
        match guessed {
            Some(result) => {
                result.expect("Valid guess");
                assert_eq!(removed.attempts(), 1);
            }
            None => assert_eq!(removed.attempts(), 0),
        }
    }
}

#[test]
fn test_guess_after_replacement_lands_on_new_game() {
    let store = SessionStore::new();
    let clock = ManualClock::new(0.0);
    store.insert("alice", game("Ciao"), 0.0);
    store
        .with_session("alice", 1.0, |g| g.guess_letter("z", &clock))
        .expect("Session exists")
        .expect("Valid guess");

    store.insert("alice", game("Babbo Natale"), 2.0);
    store
        .with_session("alice", 3.0, |g| g.guess_letter("b", &clock))
        .expect("Session exists")
        .expect("Valid guess");

    let stored = store.get("alice", 4.0).expect("Session exists");
    assert_eq!(stored.phrase(), "Babbo Natale");
    assert_eq!(stored.attempts(), 1);
    assert_eq!(stored.stage(), 0);
}

#[test]
fn test_purged_session_is_not_touched_again() {
    let store = SessionStore::new();
    store.insert("alice", game("Ciao"), 0.0);

    assert_eq!(store.purge_expired(100.0, 10.0), 1);
    assert!(store.with_session("alice", 100.0, |_| ()).is_none());
    assert_eq!(store.purge_expired(200.0, 10.0), 0);
}
