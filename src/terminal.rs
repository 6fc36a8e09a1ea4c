// terminal.rs - ANSI true-color renderer for running without a window

use anyhow::{Context, Result};
use egui::Color32;
use log::info;
use std::io::{self, Write};

use crate::config::Config;
use crate::render::{Canvas, CellRect, Display};
use crate::simulation::{Exit, Simulation, run};

const CLEAR_SCREEN: &str = "\x1b[2J";
const HOME: &str = "\x1b[H";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const RESET: &str = "\x1b[0m";

/// Keeps one color per cell and writes the whole frame on `present`, two
/// terminal columns per cell so cells come out roughly square.
pub struct TerminalDisplay<W: Write> {
    out: W,
    rows: usize,
    columns: usize,
    frame: Vec<Color32>,
    clear: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, rows: usize, columns: usize) -> Self {
        Self {
            out,
            rows,
            columns,
            frame: vec![Color32::BLACK; rows * columns],
            clear: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Canvas for TerminalDisplay<W> {
    fn fill(&mut self, color: Color32) {
        self.frame.fill(color);
        self.clear = true;
    }

    fn fill_rect(&mut self, rect: CellRect, color: Color32) {
        let (row, col) = rect.cell();
        if row < self.rows && col < self.columns {
            self.frame[row * self.columns + col] = color;
        }
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    type Error = io::Error;

    fn present(&mut self) -> io::Result<()> {
        let mut text = String::with_capacity(self.frame.len() * 24);
        if std::mem::take(&mut self.clear) {
            text.push_str(HIDE_CURSOR);
            text.push_str(CLEAR_SCREEN);
        }
        text.push_str(HOME);

        for row in self.frame.chunks(self.columns.max(1)) {
            let mut current = None;
            for &color in row {
                if current != Some(color) {
                    text.push_str(&format!("\x1b[48;2;{};{};{}m", color.r(), color.g(), color.b()));
                    current = Some(color);
                }
                text.push_str("  ");
            }
            text.push_str(RESET);
            text.push_str("\r\n");
        }

        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    // Ctrl-C arrives through the loop's shutdown future instead.
    fn close_requested(&mut self) -> bool {
        false
    }

    fn release(&mut self) -> io::Result<()> {
        write!(self.out, "{RESET}{SHOW_CURSOR}")?;
        self.out.flush()
    }
}

/// Runs the simulation on stdout until Ctrl-C or the generation limit.
pub fn run_terminal(config: &Config, mut sim: Simulation) -> Result<Exit> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the runtime")?;

    let stdout = io::stdout();
    let mut display = TerminalDisplay::new(stdout.lock(), config.rows, config.columns);
    info!("rendering {}x{} grid to the terminal, Ctrl-C to stop", config.rows, config.columns);

    runtime
        .block_on(run(&mut sim, &mut display, config.generations, tokio::signal::ctrl_c()))
        .context("failed to write to the terminal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_clears_and_later_frames_only_home() {
        let mut display = TerminalDisplay::new(Vec::new(), 2, 2);
        display.fill(Color32::BLACK);
        display.present().unwrap();
        display.present().unwrap();
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(text.matches(CLEAR_SCREEN).count(), 1);
        assert_eq!(text.matches(HOME).count(), 2);
    }

    #[test]
    fn rects_land_in_their_cells() {
        let mut display = TerminalDisplay::new(Vec::new(), 2, 3);
        display.fill(Color32::BLACK);
        display.fill_rect(CellRect::at(1, 2), Color32::from_rgb(0, 105, 62));
        display.present().unwrap();
        let text = String::from_utf8(display.into_inner()).unwrap();

        let lines: Vec<&str> = text.split("\r\n").collect();
        assert!(!lines[0].contains("48;2;0;105;62"));
        assert!(lines[1].ends_with("\x1b[48;2;0;105;62m  \x1b[0m"));
    }

    #[test]
    fn out_of_range_rects_are_dropped() {
        let mut display = TerminalDisplay::new(Vec::new(), 2, 2);
        display.fill(Color32::WHITE);
        display.fill_rect(CellRect::at(5, 5), Color32::BLACK);
        assert!(display.frame.iter().all(|&c| c == Color32::WHITE));
    }

    #[test]
    fn release_restores_the_cursor() {
        let mut display = TerminalDisplay::new(Vec::new(), 2, 2);
        display.release().unwrap();
        assert!(String::from_utf8(display.into_inner()).unwrap().ends_with(SHOW_CURSOR));
    }
}
