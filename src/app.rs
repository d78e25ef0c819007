use crate::engine::game::Game;
use crate::engine::{Direction, Idx, Score};
use crate::error::Result;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::layout;
use crate::tui::renderer::Renderer;

pub(crate) const MIN_SIZE: usize = 2;
pub(crate) const MAX_SIZE: usize = 16;

pub(crate) struct Slide48<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    game: Game,
    last_spawn: Option<Idx>,
}

impl<R: Renderer, E: EventSource> Slide48<R, E> {
    pub(crate) fn new(game: Game, renderer: R, event_source: E) -> Self {
        Self {
            renderer,
            event_source,
            game,
            last_spawn: None,
        }
    }

    /// Run takes control of the terminal until the player quits and returns the final score.
    pub(crate) fn run(mut self) -> Result<Score> {
        match self.inner_run() {
            Err(e) => {
                self.renderer.recover();
                Err(e)
            }
            Ok(_) => Ok(self.game.score()),
        }
    }

    fn inner_run(&mut self) -> Result<()> {
        self.renderer.clear()?;
        loop {
            self.renderer
                .render(&layout::frame(&self.game, self.last_spawn.as_ref()))?;

            match self.event_source.next_event()? {
                Event::UserInput(UserInput::Direction(d)) => self.shift(d),
                Event::UserInput(UserInput::Restart) => {
                    self.last_spawn = None;
                    self.game.restart(self.game.size())?
                }
                Event::UserInput(UserInput::Grow) => self.resize_board(1)?,
                Event::UserInput(UserInput::Shrink) => self.resize_board(-1)?,
                Event::UserInput(UserInput::Quit) => break,
                Event::Resize => self.renderer.clear()?,
            }
        }
        log::info!("quit with score {}", self.game.score());
        Ok(())
    }
}

impl<R: Renderer, E: EventSource> Slide48<R, E> {
    fn shift(&mut self, direction: Direction) {
        // a move that changes nothing keeps the previous highlight
        if let Some(turn) = self.game.shift(direction) {
            if turn.reached_target {
                log::info!(
                    "{0} reached moving {1} (+{2})",
                    self.game.target(),
                    turn.direction,
                    turn.score
                );
            }
            self.last_spawn = turn.spawned.map(|(idx, _)| idx);
        }
    }

    fn resize_board(&mut self, delta: isize) -> Result<()> {
        let size = self
            .game
            .size()
            .saturating_add_signed(delta)
            .clamp(MIN_SIZE, MAX_SIZE);
        if size == self.game.size() {
            return Ok(());
        }
        self.game.restart(size)?;
        self.last_spawn = None;
        self.renderer.clear()
    }
}
