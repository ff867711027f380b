use alloc::vec::Vec;

use crate::*;

/// Player-facing operations over persisted games.
///
/// Stateless between calls: every operation loads the aggregate, applies the rules and writes the
/// whole aggregate back when something changed. Returned games still carry their bombs; hide them
/// with [`Board::hide_bombs`] before they leave the process.
#[derive(Debug)]
pub struct GameService<R, G, C> {
    repository: R,
    random: G,
    clock: C,
}

impl<R, G, C> GameService<R, G, C>
where
    R: GameRepository,
    G: RandomSource,
    C: Clock,
{
    pub fn new(repository: R, random: G, clock: C) -> Self {
        Self {
            repository,
            random,
            clock,
        }
    }

    pub fn create(&self, owner_id: &str, settings: GameSettings) -> Result<Game> {
        let mut game = Game::new(self.random.generate_id(), owner_id, settings)?;
        self.persist(&mut game)?;
        log::info!(
            "Game {} created for {owner_id}: {}x{} with {} bombs",
            game.id(),
            settings.rows,
            settings.columns,
            settings.bombs_count
        );
        Ok(game)
    }

    pub fn get(&self, owner_id: &str, game_id: &str) -> Result<Game> {
        self.repository
            .get(owner_id, game_id)
            .map_err(|err| {
                GameError::from_repository("failed at getting game from repository", err)
            })?
            .ok_or(GameError::NotFound)
    }

    pub fn get_all(&self, owner_id: &str) -> Result<Vec<Game>> {
        self.repository.get_all(owner_id).map_err(|err| {
            GameError::from_repository("failed at getting games from repository", err)
        })
    }

    pub fn mark_cell(&self, owner_id: &str, game_id: &str, pos: Position) -> Result<Game> {
        let mut game = self.get(owner_id, game_id)?;

        if game.toggle_mark(pos)?.has_update() {
            self.persist(&mut game)?;
        } else {
            log::debug!("Game {game_id}: mark at {pos} changed nothing");
        }
        Ok(game)
    }

    pub fn reveal_cell(&self, owner_id: &str, game_id: &str, pos: Position) -> Result<Game> {
        let mut game = self.get(owner_id, game_id)?;

        let outcome = game.reveal(pos, &self.random, &self.clock)?;
        if outcome.has_update() {
            self.persist(&mut game)?;
        } else {
            log::debug!("Game {game_id}: reveal at {pos} changed nothing");
        }
        Ok(game)
    }

    fn persist(&self, game: &mut Game) -> Result<()> {
        game.bump_revision();
        self.repository
            .save(game)
            .map_err(|err| GameError::from_repository("failed at saving game into repository", err))
    }
}
