use rand::RngCore;

use super::board::Board;
use super::shift::Outcome;
use super::{Card, Direction, Idx, Score};
use crate::error::{Error, Result};

pub(crate) const DEFAULT_SIZE: usize = 4;
pub(crate) const DEFAULT_TARGET: Card = 2048;

const INITIAL_TILES: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) size: usize,
    pub(crate) target: Card,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            target: DEFAULT_TARGET,
        }
    }
}

impl GameConfig {
    fn validate(&self) -> Result<()> {
        validate_size(self.size)?;
        if self.target < 4 || !self.target.is_power_of_two() {
            return Err(Error::InvalidTarget(self.target));
        }
        Ok(())
    }
}

fn validate_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(Error::BoardTooSmall(size));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Playing,
    Won,
    Over,
}

/// Turn describes a move that changed the board.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Turn {
    pub(crate) direction: Direction,
    pub(crate) score: Score,
    pub(crate) spawned: Option<(Idx, Card)>,
    pub(crate) reached_target: bool,
}

/// Game drives a board through a session: it keeps the running score, spawns a card after every
/// move that changed something and watches for the target card and for the end of the game.
pub(crate) struct Game {
    rng: Box<dyn RngCore>,
    board: Board,
    score: Score,
    target: Card,
    won: bool,
}

impl Game {
    /// Start a new game using the given random number generator.
    pub(crate) fn new(config: GameConfig, rng: impl RngCore + 'static) -> Result<Self> {
        config.validate()?;
        let mut game = Self {
            rng: Box::new(rng),
            board: Board::empty(config.size),
            score: 0,
            target: config.target,
            won: false,
        };
        game.deal();
        log::info!(
            "new {0}x{0} game, target {1}",
            config.size,
            config.target
        );
        Ok(game)
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn size(&self) -> usize {
        self.board.size()
    }

    pub(crate) fn target(&self) -> Card {
        self.target
    }

    pub(crate) fn has_won(&self) -> bool {
        self.won
    }

    pub(crate) fn is_game_over(&self) -> bool {
        !self.board.has_moves()
    }

    pub(crate) fn status(&self) -> Status {
        if self.is_game_over() {
            Status::Over
        } else if self.has_won() {
            Status::Won
        } else {
            Status::Playing
        }
    }

    /// shift attempts to shift the board in the given direction and returns a Turn if anything
    /// changed. Moves that leave the board as it was spawn nothing and score nothing.
    pub(crate) fn shift(&mut self, direction: Direction) -> Option<Turn> {
        let shift = self.board.shift(&direction);
        if shift.outcome == Outcome::Unchanged {
            log::debug!("shift {direction} changed nothing");
            return None;
        }
        debug_assert_eq!(shift.board.tile_sum(), self.board.tile_sum());

        self.score += shift.score;
        // only cards the player moved count towards the target, never the one spawned after
        let reached_target = !self.won && shift.board.contains(self.target);
        let (board, spawned) = shift.board.with_random_tile(&mut self.rng);
        self.board = board;

        if reached_target {
            self.won = true;
            log::info!("reached {} with score {}", self.target, self.score);
        }
        log::debug!(
            "shift {direction}: +{0} (total {1}), spawned {spawned:?}, {2} empty",
            shift.score,
            self.score,
            self.board.empty_count()
        );
        if self.is_game_over() {
            log::info!(
                "game over with score {0}, highest card {1}",
                self.score,
                self.board.max_card()
            );
        }

        Some(Turn {
            direction,
            score: shift.score,
            spawned,
            reached_target,
        })
    }

    /// Throw away the current board and start again on a `size` x `size` board.
    pub(crate) fn restart(&mut self, size: usize) -> Result<()> {
        validate_size(size)?;
        self.board = Board::empty(size);
        self.score = 0;
        self.won = false;
        self.deal();
        log::info!("restarted on a {0}x{0} board", size);
        Ok(())
    }

    fn deal(&mut self) {
        for _ in 0..INITIAL_TILES {
            let (board, _) = self.board.with_random_tile(&mut self.rng);
            self.board = board;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}
