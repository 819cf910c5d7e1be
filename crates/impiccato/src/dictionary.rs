//! Phrase selection for singleplayer games.

use super::GameError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Supplies secret phrases for singleplayer games.
pub trait PhraseProvider: Send + Sync {
    /// Draws one phrase, uniformly over everything the provider holds.
    fn pick(&self) -> Result<String, GameError>;
}

/// Phrases shipped with the game.
const BUILTIN: &[&str] = &[
    "Babbo Natale",
    "Albero di Natale",
    "Ciao",
    "Acqua in bocca",
    "In bocca al lupo",
    "Chi dorme non piglia pesci",
    "Roma non fu fatta in un giorno",
    "Tutte le strade portano a Roma",
    "Meglio tardi che mai",
    "Il lupo perde il pelo ma non il vizio",
    "Non tutte le ciambelle riescono col buco",
    "Chi va piano va sano e va lontano",
    "Tra il dire e il fare c'è di mezzo il mare",
    "Chi trova un amico trova un tesoro",
    "Ogni cosa a suo tempo",
    "Pizza margherita",
    "Spaghetti alla carbonara",
    "Torre di Pisa",
    "Colosseo",
    "Fontana di Trevi",
    "Canal Grande",
    "Vespa",
    "Gelato al cioccolato",
    "Pinocchio",
    "La Divina Commedia",
    "Il barone rampante",
    "Tiramisù",
    "Calcio",
    "Cappuccino",
    "Panettone",
];

/// A fixed list of phrases with a uniform random choice over it.
#[derive(Debug)]
pub struct Dictionary {
    phrases: Vec<String>,
    rng: Mutex<StdRng>,
}

impl Dictionary {
    /// Creates a dictionary from the given phrases, seeded from OS entropy.
    ///
    /// Entries are trimmed and blank entries dropped.
    #[instrument(skip(phrases))]
    pub fn new<I, S>(phrases: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rng(phrases, StdRng::from_entropy())
    }

    /// Creates a dictionary whose draws are reproducible for a given seed.
    #[instrument(skip(phrases))]
    pub fn seeded<I, S>(phrases: I, seed: u64) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rng(phrases, StdRng::seed_from_u64(seed))
    }

    /// Creates the dictionary shipped with the game.
    #[instrument]
    pub fn builtin() -> Self {
        Self {
            phrases: BUILTIN.iter().map(|p| p.to_string()).collect(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn with_rng<I, S>(phrases: I, rng: StdRng) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(Into::into)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return Err(GameError::EmptyDictionary);
        }

        debug!(count = phrases.len(), "Dictionary loaded");
        Ok(Self {
            phrases,
            rng: Mutex::new(rng),
        })
    }

    /// Returns every phrase in the dictionary.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Returns the number of phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always false; construction rejects empty dictionaries.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl PhraseProvider for Dictionary {
    #[instrument(skip(self), fields(count = self.phrases.len()))]
    fn pick(&self) -> Result<String, GameError> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        self.phrases
            .choose(&mut *rng)
            .cloned()
            .ok_or(GameError::EmptyDictionary)
    }
}
