// simulation.rs - Generation loop shared by every backend

use log::{debug, info};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::grid::Grid;
use crate::life::{Shade, advance};
use crate::patterns::PatternError;
use crate::render::{Canvas, CellRect, Display};
use crate::theme::Palette;

const HISTORY_LEN: usize = 10;
const REPORT_EVERY: u64 = 100;

/// Why the loop stopped. Every variant is a normal exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    CloseRequested,
    Interrupted,
    GenerationLimit,
}

/// A grid state seen again within the last few generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub generation: u64,
    pub period: u64,
}

// Ring of recent grid hashes.
struct CycleDetector {
    history: [(u64, u64); HISTORY_LEN], // (hash, generation)
    count: usize,
    found: Option<Cycle>,
}

impl CycleDetector {
    fn new() -> Self {
        Self {
            history: [(0, 0); HISTORY_LEN],
            count: 0,
            found: None,
        }
    }

    /// Returns the cycle the first time one shows up.
    fn record(&mut self, hash: u64, generation: u64) -> Option<Cycle> {
        if self.found.is_some() {
            return None;
        }
        let filled = self.count.min(HISTORY_LEN);
        if let Some(&(_, seen)) = self.history[..filled].iter().find(|(h, _)| *h == hash) {
            let cycle = Cycle { generation, period: generation - seen };
            self.found = Some(cycle);
            return Some(cycle);
        }
        self.history[self.count % HISTORY_LEN] = (hash, generation);
        self.count += 1;
        None
    }
}

pub struct Simulation {
    cells: Grid,
    shades: Vec<Shade>,
    palette: Palette,
    delay: Duration,
    generation: u64,
    cycles: CycleDetector,
}

impl Simulation {
    pub fn new(cells: Grid, palette: Palette, delay: Duration) -> Self {
        let mut cycles = CycleDetector::new();
        cycles.record(cells.hash_cells(), 0);
        Self {
            cells,
            shades: Vec::new(),
            palette,
            delay,
            generation: 0,
            cycles,
        }
    }

    /// Seeds from the configured pattern, or with coin flips from `rng`.
    pub fn from_config<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Self, PatternError> {
        let cells = match config.pattern {
            Some(pattern) => pattern.place(config.rows, config.columns)?,
            None => Grid::random(config.rows, config.columns, rng),
        };
        Ok(Self::new(cells, config.theme.palette(), config.delay()))
    }

    /// Advances one generation and returns the shades to draw.
    pub fn step(&mut self) -> &[Shade] {
        let next = advance(&self.cells);
        self.cells = next.cells;
        self.shades = next.shades;
        self.generation += 1;

        if let Some(cycle) = self.cycles.record(self.cells.hash_cells(), self.generation) {
            info!(
                "grid settled into a period-{} cycle at generation {}",
                cycle.period, cycle.generation
            );
        }
        if self.generation % REPORT_EVERY == 0 {
            debug!("generation {}: {} live cells", self.generation, self.cells.population());
        }
        &self.shades
    }

    /// Draws the latest generation. Nothing is drawn before the first step.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let columns = self.cells.columns();
        for (index, &shade) in self.shades.iter().enumerate() {
            let rect = CellRect::at(index / columns, index % columns);
            canvas.fill_rect(rect, self.palette.color(shade));
        }
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn shades(&self) -> &[Shade] {
        &self.shades
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cycle(&self) -> Option<Cycle> {
        self.cycles.found
    }
}

/// Drives `display` until it asks to close, `shutdown` resolves, or `limit`
/// generations have run.
///
/// Each generation: poll for exit, advance, draw, wait out the delay,
/// present. `shutdown` is only observed while waiting, and acted on at the
/// next poll. The display is released on every exit, errors included.
pub async fn run<D, S>(
    sim: &mut Simulation,
    display: &mut D,
    limit: Option<u64>,
    shutdown: S,
) -> Result<Exit, D::Error>
where
    D: Display,
    S: Future,
{
    tokio::pin!(shutdown);

    let result = drive(sim, display, limit, shutdown).await;
    let released = display.release();
    let exit = result?;
    released?;

    info!("stopped after {} generations ({exit:?})", sim.generation());
    Ok(exit)
}

async fn drive<D, S>(
    sim: &mut Simulation,
    display: &mut D,
    limit: Option<u64>,
    mut shutdown: std::pin::Pin<&mut S>,
) -> Result<Exit, D::Error>
where
    D: Display,
    S: Future,
{
    let mut interrupted = false;

    display.fill(sim.palette().background);
    display.present()?;

    loop {
        if interrupted {
            return Ok(Exit::Interrupted);
        }
        if display.close_requested() {
            return Ok(Exit::CloseRequested);
        }
        if limit.is_some_and(|limit| sim.generation() >= limit) {
            return Ok(Exit::GenerationLimit);
        }

        sim.step();
        sim.paint(display);

        tokio::select! {
            biased;
            _ = &mut shutdown => interrupted = true,
            () = tokio::time::sleep(sim.delay()) => {}
        }

        display.present()?;
    }
}
