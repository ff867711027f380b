//! Collaborators the engine depends on but does not implement: persistence, randomness and time.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, Utc};

use crate::{Game, RepositoryError};

/// Whole-aggregate persistence keyed by `(owner_id, game_id)`.
pub trait GameRepository {
    /// `Ok(None)` when no game is stored under the key.
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Game>, RepositoryError>;

    fn get_all(&self, owner_id: &str) -> Result<Vec<Game>, RepositoryError>;

    /// Full overwrite of the stored aggregate.
    ///
    /// `game.revision()` must be exactly one past the stored revision, or `1` for a key that
    /// does not exist yet; anything else is a [`RepositoryError::Conflict`].
    fn save(&self, game: &Game) -> Result<(), RepositoryError>;
}

pub trait RandomSource {
    /// A fresh, unique game id.
    fn generate_id(&self) -> String;

    /// A uniformly random permutation of `0..n`.
    fn generate_permutation(&self, n: usize) -> Vec<usize>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<T: GameRepository + ?Sized> GameRepository for &T {
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Game>, RepositoryError> {
        (**self).get(owner_id, game_id)
    }

    fn get_all(&self, owner_id: &str) -> Result<Vec<Game>, RepositoryError> {
        (**self).get_all(owner_id)
    }

    fn save(&self, game: &Game) -> Result<(), RepositoryError> {
        (**self).save(game)
    }
}

impl<T: GameRepository + ?Sized> GameRepository for Box<T> {
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Game>, RepositoryError> {
        (**self).get(owner_id, game_id)
    }

    fn get_all(&self, owner_id: &str) -> Result<Vec<Game>, RepositoryError> {
        (**self).get_all(owner_id)
    }

    fn save(&self, game: &Game) -> Result<(), RepositoryError> {
        (**self).save(game)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &T {
    fn generate_id(&self) -> String {
        (**self).generate_id()
    }

    fn generate_permutation(&self, n: usize) -> Vec<usize> {
        (**self).generate_permutation(n)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn generate_id(&self) -> String {
        (**self).generate_id()
    }

    fn generate_permutation(&self, n: usize) -> Vec<usize> {
        (**self).generate_permutation(n)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
