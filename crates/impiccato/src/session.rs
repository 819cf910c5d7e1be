//! The hangman game-state machine.

use super::{Clock, GameError, MAX_STAGE, Mode, PhraseProvider, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Result of a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// Whether the letter occurs in the phrase, or the phrase matched.
    pub correct: bool,
    /// The letter had already been tried; nothing changed.
    pub repeated: bool,
}

/// One player's game, owned by the server.
///
/// The secret phrase never leaves this record while the game is on; clients
/// only ever see [`GameSession::hidden_phrase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    mode: Mode,
    phrase: String,
    stage: u8,
    status: Status,
    tried_chars: BTreeSet<char>,
    start_time: f64,
    duration: Option<f64>,
    attempts: u32,
}

/// Validates a phrase supplied by the player starting a multiplayer game.
fn chosen_phrase(phrase: Option<&str>) -> Result<String, GameError> {
    let phrase = phrase.map(str::trim).unwrap_or_default();
    if phrase.is_empty() {
        warn!("Multiplayer game requested without a phrase");
        return Err(GameError::MissingPhrase);
    }
    Ok(phrase.to_string())
}

/// Case folding used for every comparison against the phrase.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl GameSession {
    /// Starts a new game.
    ///
    /// Singleplayer games ignore `phrase` and draw one from `provider`;
    /// multiplayer games require a non-blank `phrase`.
    #[instrument(skip(phrase, provider, clock))]
    pub fn initialize(
        mode: Mode,
        phrase: Option<&str>,
        provider: &dyn PhraseProvider,
        clock: &dyn Clock,
    ) -> Result<Self, GameError> {
        let phrase = match mode {
            Mode::Singleplayer => provider.pick()?,
            Mode::Multiplayer => chosen_phrase(phrase)?,
        };
        Ok(Self::start(mode, phrase, clock))
    }

    /// Starts a singleplayer game with a phrase drawn from `provider`.
    pub fn singleplayer(
        provider: &dyn PhraseProvider,
        clock: &dyn Clock,
    ) -> Result<Self, GameError> {
        Self::initialize(Mode::Singleplayer, None, provider, clock)
    }

    /// Starts a multiplayer game on a phrase chosen by the other player.
    pub fn multiplayer(phrase: &str, clock: &dyn Clock) -> Result<Self, GameError> {
        let phrase = chosen_phrase(Some(phrase))?;
        Ok(Self::start(Mode::Multiplayer, phrase, clock))
    }

    fn start(mode: Mode, phrase: String, clock: &dyn Clock) -> Self {
        let session = Self {
            mode,
            phrase,
            stage: 0,
            status: Status::Playing,
            tried_chars: BTreeSet::new(),
            start_time: clock.now(),
            duration: None,
            attempts: 0,
        };
        info!(
            %mode,
            length = session.phrase.chars().count(),
            "Game started"
        );
        session
    }

    /// Guesses a single character.
    ///
    /// A character that was already tried is answered from the record without
    /// touching it: no attempt is counted and no stage is lost.
    #[instrument(skip(self, clock), fields(stage = self.stage, attempts = self.attempts))]
    pub fn guess_letter(
        &mut self,
        letter: &str,
        clock: &dyn Clock,
    ) -> Result<GuessOutcome, GameError> {
        self.ensure_playing()?;

        let mut chars = letter.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(' '), None) => {
                warn!("Rejected space as a letter");
                return Err(GameError::InvalidInput(
                    "spaces are always shown and cannot be guessed".to_string(),
                ));
            }
            (Some(c), None) => fold(c),
            _ => {
                warn!("Rejected letter guess");
                return Err(GameError::InvalidInput(format!(
                    "expected exactly one character, got {letter:?}"
                )));
            }
        };

        if self.tried_chars.contains(&letter) {
            debug!(%letter, "Letter already tried");
            return Ok(GuessOutcome {
                correct: self.occurs(letter),
                repeated: true,
            });
        }

        self.attempts += 1;
        let correct = self.occurs(letter);
        self.tried_chars.insert(letter);

        if !correct {
            self.stage += 1;
        }

        if self.stage >= MAX_STAGE {
            self.finish(Status::Lost, clock);
        } else if self.is_fully_revealed() {
            self.finish(Status::Won, clock);
        }

        debug!(%letter, correct, stage = self.stage, "Letter guessed");
        Ok(GuessOutcome {
            correct,
            repeated: false,
        })
    }

    /// Guesses the whole phrase.
    ///
    /// The comparison ignores case but not spacing.
    #[instrument(skip(self, candidate, clock), fields(stage = self.stage, attempts = self.attempts))]
    pub fn guess_phrase(
        &mut self,
        candidate: &str,
        clock: &dyn Clock,
    ) -> Result<GuessOutcome, GameError> {
        self.ensure_playing()?;

        if candidate.trim().is_empty() {
            warn!("Rejected blank phrase guess");
            return Err(GameError::InvalidInput("phrase guess is blank".to_string()));
        }

        let correct = candidate.chars().map(fold).eq(self.phrase.chars().map(fold));

        self.attempts += 1;

        if correct {
            self.finish(Status::Won, clock);
        } else {
            self.stage += 1;
            if self.stage >= MAX_STAGE {
                self.finish(Status::Lost, clock);
            }
        }

        debug!(correct, stage = self.stage, "Phrase guessed");
        Ok(GuessOutcome {
            correct,
            repeated: false,
        })
    }

    /// Renders the phrase with every untried character replaced by `_`.
    ///
    /// Spaces are always shown. Output has as many characters as the phrase.
    pub fn hidden_phrase(&self) -> String {
        self.phrase
            .chars()
            .map(|c| {
                if c == ' ' || self.tried_chars.contains(&fold(c)) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Index of the condemned illustration for the current stage (1 to 7).
    pub fn stage_image_index(&self) -> u8 {
        self.stage + 1
    }

    /// Asset path of the condemned illustration for the current stage.
    pub fn condemned_image_path(&self) -> String {
        format!("images/stages/{}.png", self.stage_image_index())
    }

    /// Returns true while guesses are accepted.
    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// Returns the game mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the secret phrase, in its original casing.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Returns the number of wrong attempts so far.
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Returns the game status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the lowercased characters tried so far.
    pub fn tried_chars(&self) -> &BTreeSet<char> {
        &self.tried_chars
    }

    /// Returns when the game started, in seconds since the UNIX epoch.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Returns how long the game took, once it is over.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Returns the number of counted guesses, right or wrong.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.is_playing() {
            Ok(())
        } else {
            warn!(status = %self.status, "Guess after game over");
            Err(GameError::InvalidState(self.status))
        }
    }

    fn occurs(&self, letter: char) -> bool {
        self.phrase.chars().any(|c| fold(c) == letter)
    }

    fn is_fully_revealed(&self) -> bool {
        self.phrase
            .chars()
            .filter(|&c| c != ' ')
            .all(|c| self.tried_chars.contains(&fold(c)))
    }

    fn finish(&mut self, status: Status, clock: &dyn Clock) {
        let duration = (clock.now() - self.start_time).max(0.0);
        self.status = status;
        self.duration = Some(duration);
        info!(
            %status,
            attempts = self.attempts,
            stage = self.stage,
            duration,
            "Game over"
        );
    }
}
