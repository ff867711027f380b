#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use ports::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod game;
mod generator;
mod ports;
mod types;

/// Largest accepted board side.
pub const MAX_DIM: Dim = 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub rows: Dim,
    pub columns: Dim,
    pub bombs_count: CellCount,
}

impl GameSettings {
    pub const fn new_unchecked(rows: Dim, columns: Dim, bombs_count: CellCount) -> Self {
        Self {
            rows,
            columns,
            bombs_count,
        }
    }

    pub fn new(rows: Dim, columns: Dim, bombs_count: CellCount) -> Result<Self> {
        let settings = Self::new_unchecked(rows, columns, bombs_count);
        settings.validate()?;
        Ok(settings)
    }

    /// Both sides in `1..=MAX_DIM`, at most one bomb per cell.
    pub fn validate(&self) -> Result<()> {
        let sides = 1..=MAX_DIM;
        if !sides.contains(&self.rows)
            || !sides.contains(&self.columns)
            || self.bombs_count > self.total_cells()
        {
            Err(GameError::InvalidSettings)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// First reveal of the game, bombs were just placed.
    Started,
    Revealed,
    Won,
    Lost,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Started => true,
            Revealed => true,
            Won => true,
            Lost => true,
        }
    }
}
