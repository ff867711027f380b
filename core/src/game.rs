use alloc::string::String;
use alloc::vec;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Created, no bombs on the board yet.
    #[default]
    New,
    OnGoing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_new(self) -> bool {
        matches!(self, Self::New)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The persisted aggregate: one player's board plus its lifecycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: String,
    owner_id: String,
    board: Board,
    settings: GameSettings,
    state: GameState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    revision: u64,
}

impl Game {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        settings: GameSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            id: id.into(),
            owner_id: owner_id.into(),
            board: Board::new_empty(settings.rows, settings.columns)?,
            settings,
            state: GameState::New,
            started_at: None,
            ended_at: None,
            revision: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// The real board, bombs included. Use [`Board::hide_bombs`] before showing it to a player.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }

    /// Flags or unflags a covered cell. Allowed in every lifecycle state.
    pub fn toggle_mark(&mut self, pos: Position) -> Result<MarkOutcome> {
        let pos = self.board.validate_position(pos)?;

        Ok(match self.board[pos].toggled_mark() {
            Some(cell) => {
                self.board[pos] = cell;
                MarkOutcome::Changed
            }
            None => MarkOutcome::NoChange,
        })
    }

    pub fn reveal<G, C>(&mut self, pos: Position, random: &G, clock: &C) -> Result<RevealOutcome>
    where
        G: RandomSource + ?Sized,
        C: Clock + ?Sized,
    {
        use Cell::*;

        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        let pos = self.board.validate_position(pos)?;

        Ok(match self.board[pos] {
            EmptyCovered if self.state.is_new() => {
                let now = clock.now();
                self.state = GameState::OnGoing;
                self.started_at = Some(now);
                self.board[pos] = EmptyRevealed;

                let permutation = random.generate_permutation(self.board.total_cells() as usize);
                let placed = place_bombs(&mut self.board, self.settings.bombs_count, pos, &permutation);
                log::info!("Game {} started at {pos}, {placed} bombs placed", self.id);

                if self.is_cleared() {
                    self.finish(GameState::Won, now);
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Started
                }
            }
            EmptyCovered => {
                let revealed = cascade_reveal(&mut self.board, pos);
                log::debug!("Game {}: revealed {revealed} cells from {pos}", self.id);

                if self.is_cleared() {
                    self.finish(GameState::Won, clock.now());
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
            BombCovered => {
                self.board[pos] = BombRevealed;
                self.finish(GameState::Lost, clock.now());
                RevealOutcome::Lost
            }
            EmptyCoveredMarked | EmptyRevealed | BombCoveredMarked | BombRevealed => {
                RevealOutcome::NoChange
            }
        })
    }

    /// Every cell without a bomb is revealed. Counts the bombs actually on the board, which is
    /// one short of the settings when they asked for a bomb in every cell.
    fn is_cleared(&self) -> bool {
        let safe = self.board.total_cells() - self.board.bomb_count();
        self.board.count(Cell::EmptyRevealed) == safe
    }

    fn finish(&mut self, state: GameState, now: DateTime<Utc>) {
        debug_assert!(state.is_finished());
        self.state = state;
        self.ended_at = Some(now);
        log::info!("Game {} finished: {:?}", self.id, state);
    }
}

/// Flood-fills revealed ground from `start`, which must be covered empty ground.
///
/// Uses an explicit stack so that reveal depth is bounded by the heap, not the call stack.
fn cascade_reveal(board: &mut Board, start: Position) -> CellCount {
    let mut revealed = 0;
    let mut pending = vec![start];

    while let Some(pos) = pending.pop() {
        if board[pos] != Cell::EmptyCovered {
            continue;
        }

        board[pos] = Cell::EmptyRevealed;
        revealed += 1;
        pending.extend(board.neighbors_if_no_bombs(pos));
    }

    revealed
}
