// life.rs - The B3/S23 update rule

use crate::grid::Grid;

/// How a cell is drawn for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Alive, // alive before and after
    Born,  // dead before, alive after
    Dying, // alive before, dead after
    Empty, // dead before and after
}

impl Shade {
    fn of(was_alive: bool, is_alive: bool) -> Self {
        match (was_alive, is_alive) {
            (true, true) => Shade::Alive,
            (false, true) => Shade::Born,
            (true, false) => Shade::Dying,
            (false, false) => Shade::Empty,
        }
    }
}

/// Next generation plus the shade of every cell, row-major.
#[derive(Debug, Clone)]
pub struct Generation {
    pub cells: Grid,
    pub shades: Vec<Shade>,
}

/// Conway's rule for a single cell.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Computes the next generation from `current` without touching it.
pub fn advance(current: &Grid) -> Generation {
    let mut cells = Grid::new(current.rows(), current.columns());
    let mut shades = Vec::with_capacity(current.len());

    for row in 0..current.rows() {
        for col in 0..current.columns() {
            let alive = current.get(row, col);
            let next = next_state(alive, current.live_neighbors(row, col));
            if next {
                cells.set(row, col, true);
            }
            shades.push(Shade::of(alive, next));
        }
    }

    Generation { cells, shades }
}
