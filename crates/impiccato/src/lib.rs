//! Impiccato - server-authoritative hangman game logic.
//!
//! The crate holds the game-state machine and nothing else: a
//! [`GameSession`] record, the operations that mutate it in response to a
//! guess, and the pure views derived from it (the hidden phrase and the
//! condemned-stage illustration).
//!
//! Time and phrase selection are injected through the [`Clock`] and
//! [`PhraseProvider`] capabilities so the state machine stays deterministic
//! under test.
//!
//! # Example
//!
//! ```
//! use impiccato::{GameSession, ManualClock, Mode, Status};
//!
//! let clock = ManualClock::new(0.0);
//! let mut game = GameSession::multiplayer("Babbo Natale", &clock)?;
//!
//! let outcome = game.guess_letter("b", &clock)?;
//! assert!(outcome.correct);
//! assert_eq!(game.hidden_phrase(), "B_bb_ ______");
//! assert_eq!(game.mode(), Mode::Multiplayer);
//! assert_eq!(game.status(), Status::Playing);
//! # Ok::<(), impiccato::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod dictionary;
mod error;
mod session;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dictionary::{Dictionary, PhraseProvider};
pub use error::GameError;
pub use session::{GameSession, GuessOutcome};
pub use types::{MAX_STAGE, Mode, Status};
