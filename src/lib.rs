// lib.rs - Conway's Game of Life on a window or a terminal

pub mod config;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod render;
pub mod simulation;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use config::{Backend, Command, Config, ConfigError};
pub use grid::Grid;
pub use life::{Generation, Shade, advance};
pub use simulation::{Exit, Simulation};
pub use theme::{Palette, Theme};
