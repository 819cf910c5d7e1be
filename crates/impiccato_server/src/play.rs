//! Line-oriented terminal game.

use crate::service::{HangmanService, ServiceError};
use impiccato::{GameError, MAX_STAGE, Mode, Status};
use std::io::{BufRead, Write};
use tracing::{info, instrument};

/// Session id used for the single local game.
const LOCAL_SESSION: &str = "terminal";

/// Plays one game reading guesses from `input` and writing to `output`.
///
/// A line with one character guesses a letter, anything longer guesses the
/// phrase. Ends when the game is over or `input` runs dry.
#[instrument(skip_all)]
pub fn play<R: BufRead, W: Write>(
    service: &HangmanService,
    phrase: Option<&str>,
    input: R,
    mut output: W,
) -> anyhow::Result<Status> {
    let mode = if phrase.is_some() {
        Mode::Multiplayer
    } else {
        Mode::Singleplayer
    };
    service.initialize(LOCAL_SESSION, &mode.to_string(), phrase)?;
    info!(%mode, "Terminal game started");

    writeln!(output, "Impiccato ({mode})")?;
    show(service, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let guess = line.trim();
        if guess.is_empty() {
            continue;
        }

        let result = if guess.chars().count() == 1 {
            service.guess_letter(LOCAL_SESSION, guess)
        } else {
            service.guess_phrase(LOCAL_SESSION, guess)
        };

        match result {
            Ok(outcome) if outcome.repeated => writeln!(output, "Already tried {guess:?}.")?,
            Ok(outcome) if outcome.correct => writeln!(output, "Yes!")?,
            Ok(_) => writeln!(output, "No.")?,
            Err(ServiceError::Game(GameError::InvalidInput(reason))) => {
                writeln!(output, "{reason}")?
            }
            Err(e) => return Err(e.into()),
        }

        show(service, &mut output)?;
        if !service.is_playing(LOCAL_SESSION) {
            break;
        }
    }

    let game = service.snapshot(LOCAL_SESSION)?;
    match game.status() {
        Status::Won => writeln!(
            output,
            "You won in {} attempts ({:.1}s).",
            game.attempts(),
            game.duration().unwrap_or_default()
        )?,
        Status::Lost => writeln!(output, "Hanged! The phrase was {:?}.", game.phrase())?,
        Status::Playing => writeln!(output, "Game abandoned.")?,
    }
    service.abandon(LOCAL_SESSION)?;
    Ok(game.status())
}

fn show<W: Write>(service: &HangmanService, output: &mut W) -> anyhow::Result<()> {
    let game = service.snapshot(LOCAL_SESSION)?;
    let tried: String = game.tried_chars().iter().collect();
    writeln!(
        output,
        "{}   [{}/{}]  tried: {}",
        game.hidden_phrase(),
        game.stage(),
        MAX_STAGE,
        tried
    )?;
    Ok(())
}
