//! Conway's Game of Life drawn directly onto the terminal

use crate::config::LifeConfig;
use crate::grid::Grid;
use crate::input::{Control, CrosstermEvents, Events};
use crate::terminal::{Display, Terminal};
use log::{debug, info, trace, warn};
use rand::prelude::*;
use std::io;

/// Where the loop goes after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    ResizeRequested,
    Terminated,
}

/// Owns the display, the event source and the current grid
pub struct Life<D: Display, E: Events, R: Rng = StdRng> {
    display: D,
    events: E,
    rng: R,
    config: LifeConfig,
    grid: Grid,
    paused: bool,
    generation: u64,
}

impl<D: Display, E: Events, R: Rng> Life<D, E, R> {
    /// Prepare the screen and seed the first grid
    pub fn new(mut display: D, events: E, mut rng: R, config: LifeConfig) -> io::Result<Self> {
        let (cols, rows) = display.dimensions()?;
        display.clear_screen()?;
        display.hide_cursor()?;
        let grid = Grid::new(cols, rows, config.density, &mut rng);
        info!("starting {}x{} grid, density 1/{}", cols, rows, config.density);

        Ok(Self {
            display,
            events,
            rng,
            config,
            grid,
            paused: false,
            generation: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run one generation: evaluate and draw every cell, wait out the tick,
    /// then commit. A resize or quit during the wait skips the commit.
    pub fn tick(&mut self) -> io::Result<Phase> {
        let was_paused = self.paused;
        if !was_paused {
            self.render_pass()?;
        }

        match self.events.wait(self.config.tick)? {
            Some(Control::Resize) => return Ok(Phase::ResizeRequested),
            Some(Control::Quit) => return Ok(Phase::Terminated),
            Some(Control::TogglePause) => {
                self.paused = !self.paused;
                debug!("paused: {}", self.paused);
            }
            None => {}
        }

        // Pausing still lets the generation already drawn land.
        if !was_paused {
            self.grid.commit_all();
            self.generation += 1;
            trace!("generation {}: {} alive", self.generation, self.grid.live_count());
        }

        Ok(Phase::Running)
    }

    /// Draw each cell as it stands while recording its next state
    fn render_pass(&mut self) -> io::Result<()> {
        self.draw(true)
    }

    fn draw(&mut self, evaluate: bool) -> io::Result<()> {
        for slot in 0..self.grid.len() {
            let cell = &self.grid.cells()[slot];
            let (at, alive) = (cell.coord(), cell.is_alive);

            self.display.position_cursor(at.0, at.1)?;
            if evaluate {
                self.grid.evaluate(at);
            }

            if alive {
                self.display.fill_cell()?;
            } else {
                self.display.clear_cell()?;
            }
        }
        Ok(())
    }

    /// Throw the grid away and start over at the current terminal size
    pub fn rebuild(&mut self) -> io::Result<()> {
        self.display.teardown()?;
        self.display.reset_cursor()?;
        let (cols, rows) = self.display.dimensions()?;
        self.display.clear_screen()?;
        // The hard reset brings the cursor back.
        self.display.hide_cursor()?;

        self.grid = Grid::new(cols, rows, self.config.density, &mut self.rng);
        self.generation = 0;
        info!("rebuilt grid at {}x{}", cols, rows);

        // A paused loop skips its render pass, so show the new grid now.
        if self.paused {
            self.draw(false)?;
        }
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn shutdown(&mut self) -> io::Result<()> {
        self.display.show_cursor()?;
        self.display.teardown()?;
        info!("shut down after {} generations", self.generation);
        Ok(())
    }

    /// Loop until asked to quit
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.tick()? {
                Phase::Running => {}
                Phase::ResizeRequested => self.rebuild()?,
                Phase::Terminated => return self.shutdown(),
            }
        }
    }
}

/// Run on the real terminal
pub fn run(config: LifeConfig) -> io::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let term = Terminal::new()?;
    let events = CrosstermEvents::new()?;
    let mut life = Life::new(term, events, rng, config)?;
    let result = life.run();
    hand_back(&mut life, result)
}

/// A failed run still restores the terminal; the original error wins
fn hand_back<D: Display, E: Events, R: Rng>(
    life: &mut Life<D, E, R>,
    result: io::Result<()>,
) -> io::Result<()> {
    if result.is_err() {
        if let Err(e) = life.shutdown() {
            warn!("terminal restore failed: {}", e);
        }
    }
    result
}
