//! Impiccato server - hangman games held in server-side custody.
//!
//! # Architecture
//!
//! - **Store**: per-player sessions, each behind its own lock
//! - **Service**: game operations keyed by session id, with the clock and
//!   phrase provider injected
//! - **Routes**: JSON over HTTP (axum)
//! - **Play**: a terminal front end over the same service
//!
//! # Example
//!
//! ```
//! use impiccato_server::HangmanService;
//!
//! let service = HangmanService::with_defaults();
//! service.initialize("player-1", "multiplayer", Some("Babbo Natale"))?;
//! service.guess_letter("player-1", "b")?;
//! assert_eq!(service.hidden_phrase("player-1")?, "B_bb_ ______");
//! # Ok::<(), impiccato_server::ServiceError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod cli;
mod config;
mod play;
mod routes;
mod server;
mod service;
mod store;

pub use config::{ConfigError, ServerConfig};
pub use play::play;
pub use routes::{ApiError, router};
pub use server::{build_service, serve, spawn_session_reaper};
pub use service::{HangmanService, ServiceError};
pub use store::{SessionId, SessionStore};
