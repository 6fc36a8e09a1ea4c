// grid.rs - Grid types for Conway's Game of Life

use rand::Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Smallest number of rows or columns a playing field may have.
pub const MIN_DIMENSION: usize = 20;
/// Largest number of rows or columns; keeps cell counts and window pixels in range.
pub const MAX_DIMENSION: usize = 10_000;

/// Row-major matrix of dead/alive cells.
///
/// Neighborhoods wrap on the low side only: row or column `-1` is the last
/// row or column, while row `rows` (or column `columns`) lies outside the
/// grid and counts as dead.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Builds a grid with the given cells alive. Coordinates outside the
    /// grid are ignored.
    pub fn from_live(rows: usize, columns: usize, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, columns);
        for &(row, col) in live {
            if row < rows && col < columns {
                grid.set(row, col, true);
            }
        }
        grid
    }

    /// Every cell is an independent fair coin flip drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let cells = (0..rows * columns).map(|_| rng.gen_bool(0.5)).collect();
        Self { rows, columns, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let index = self.index(row, col);
        self.cells[index] = alive;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells as `(row, col)` in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| (index / self.columns, index % self.columns))
    }

    /// Counts live cells in the 3x3 block around `(row, col)`, excluding the
    /// cell itself.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for nr in low_wrapped_span(row, self.rows) {
            for nc in low_wrapped_span(col, self.columns) {
                if (nr, nc) != (row, col) && self.get(nr, nc) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn hash_cells(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.columns,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.columns
        );
        row * self.columns + col
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.columns)?;
        for row in self.cells.chunks(self.columns.max(1)) {
            let line: String = row.iter().map(|&alive| if alive { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// Indices index-1..=index+1 where -1 maps to len-1 and len is dropped.
// Tiny grids can alias the wrapped index onto the others, so duplicates go.
fn low_wrapped_span(index: usize, len: usize) -> impl Iterator<Item = usize> {
    let before = if index == 0 { len.checked_sub(1) } else { Some(index - 1) };
    let before = before.filter(|&b| b != index);
    let after = (index + 1 < len)
        .then_some(index + 1)
        .filter(|&a| Some(a) != before);
    before.into_iter().chain(Some(index)).chain(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn top_left_corner_counts_bottom_right_corner() {
        let grid = Grid::from_live(20, 20, &[(0, 0), (19, 19)]);
        assert_eq!(grid.live_neighbors(0, 0), 1);
    }

    #[test]
    fn bottom_right_corner_does_not_wrap_forward() {
        let grid = Grid::from_live(20, 20, &[(0, 0), (19, 19)]);
        assert_eq!(grid.live_neighbors(19, 19), 0);
    }

    #[test]
    fn top_edge_wraps_to_bottom_row() {
        let grid = Grid::from_live(20, 20, &[(19, 4), (19, 5), (19, 6)]);
        assert_eq!(grid.live_neighbors(0, 5), 3);
        assert_eq!(grid.live_neighbors(18, 5), 3);
    }

    #[test]
    fn left_edge_wraps_to_last_column() {
        let grid = Grid::from_live(20, 25, &[(4, 24), (5, 24), (6, 24)]);
        assert_eq!(grid.live_neighbors(5, 0), 3);
        assert_eq!(grid.live_neighbors(5, 23), 3);
    }

    #[test]
    fn interior_cell_sees_full_neighborhood() {
        let live: Vec<_> = (4..=6)
            .flat_map(|r| (4..=6).map(move |c| (r, c)))
            .collect();
        let grid = Grid::from_live(20, 20, &live);
        assert_eq!(grid.live_neighbors(5, 5), 8);
        assert_eq!(grid.live_neighbors(4, 4), 3);
    }

    #[test]
    fn from_live_ignores_out_of_range() {
        let grid = Grid::from_live(20, 20, &[(20, 0), (0, 20), (3, 3)]);
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn random_grid_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(23, 41, &mut rng);
        assert_eq!(grid.rows(), 23);
        assert_eq!(grid.columns(), 41);
        assert_eq!(grid.len(), 23 * 41);
    }

    #[test]
    fn random_grid_is_about_half_alive() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 200;
        let total: usize = (0..trials)
            .map(|_| Grid::random(50, 50, &mut rng).population())
            .sum();
        let fraction = total as f64 / (trials * 2500) as f64;
        assert!((fraction - 0.5).abs() < 0.01, "live fraction {fraction}");
    }

    #[test]
    fn same_seed_same_grid() {
        let a = Grid::random(20, 20, &mut StdRng::seed_from_u64(42));
        let b = Grid::random(20, 20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.hash_cells(), b.hash_cells());
    }

    #[test]
    #[should_panic(expected = "outside 20x20 grid")]
    fn get_outside_grid_panics() {
        Grid::new(20, 20).get(20, 0);
    }
}
