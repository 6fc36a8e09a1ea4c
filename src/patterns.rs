// patterns.rs - Named starting patterns

use std::fmt;
use thiserror::Error;

use crate::grid::Grid;

/// Live cells of a pattern, relative to its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown pattern '{0}'")]
    Unknown(String),

    #[error("pattern '{name}' needs {needed_rows}x{needed_columns} cells, grid is {rows}x{columns}")]
    TooLarge {
        name: &'static str,
        needed_rows: usize,
        needed_columns: usize,
        rows: usize,
        columns: usize,
    },
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 2), (1, 1), (1, 2), (2, 0), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

impl Pattern {
    /// Case-insensitive; spaces, dashes and underscores are interchangeable.
    pub fn find(name: &str) -> Result<&'static Pattern, PatternError> {
        let key = |name: &str| -> String {
            name.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = key(name);
        PATTERNS
            .iter()
            .find(|pattern| key(pattern.name) == wanted)
            .ok_or_else(|| PatternError::Unknown(name.to_string()))
    }

    /// Bounding box as `(rows, columns)`.
    pub fn size(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Places the pattern in the middle of an otherwise dead grid.
    pub fn place(&self, rows: usize, columns: usize) -> Result<Grid, PatternError> {
        let (needed_rows, needed_columns) = self.size();
        if needed_rows > rows || needed_columns > columns {
            return Err(PatternError::TooLarge {
                name: self.name,
                needed_rows,
                needed_columns,
                rows,
                columns,
            });
        }

        let (top, left) = ((rows - needed_rows) / 2, (columns - needed_columns) / 2);
        let live: Vec<_> = self.cells.iter().map(|&(r, c)| (top + r, left + c)).collect();
        Ok(Grid::from_live(rows, columns, &live))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
