// render.rs - What the simulation needs from a renderer

use egui::Color32;

/// Distance in pixels between the top-left corners of neighboring cells.
pub const CELL_PITCH: u32 = 9;
/// Side of the square drawn for a cell, leaving a 1px gap.
pub const CELL_SIZE: u32 = CELL_PITCH - 1;

/// Square in window pixels covering one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl CellRect {
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            x: col as u32 * CELL_PITCH,
            y: row as u32 * CELL_PITCH,
            size: CELL_SIZE,
        }
    }

    /// Inverse of [`CellRect::at`].
    pub fn cell(&self) -> (usize, usize) {
        ((self.y / CELL_PITCH) as usize, (self.x / CELL_PITCH) as usize)
    }
}

/// Window size in pixels as `(width, height)`, saturating at `u32::MAX`.
pub fn window_size(rows: usize, columns: usize) -> (u32, u32) {
    let pixels = |cells: usize| u32::try_from(cells).unwrap_or(u32::MAX).saturating_mul(CELL_PITCH);
    (pixels(columns), pixels(rows))
}

/// Drawing surface.
pub trait Canvas {
    fn fill(&mut self, color: Color32);
    fn fill_rect(&mut self, rect: CellRect, color: Color32);
}

/// A canvas that owns its frame loop: it shows frames and reports when the
/// user wants out.
pub trait Display: Canvas {
    type Error: std::error::Error + Send + Sync + 'static;

    fn present(&mut self) -> Result<(), Self::Error>;

    fn close_requested(&mut self) -> bool;

    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
