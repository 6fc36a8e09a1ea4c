//! Drives the generation loop through a recording display.

use std::convert::Infallible;
use std::io;
use std::time::Duration;

use conway_life::render::{Canvas, CellRect, Display};
use conway_life::simulation::run;
use conway_life::terminal::TerminalDisplay;
use conway_life::{Exit, Grid, Simulation, Theme};
use egui::Color32;

/// Records draw calls and asks to close after a fixed number of presents.
struct FakeDisplay {
    close_after: usize,
    presents: usize,
    fills: Vec<Color32>,
    rects: Vec<(CellRect, Color32)>,
    released: bool,
}

impl FakeDisplay {
    fn closing_after(presents: usize) -> Self {
        Self {
            close_after: presents,
            presents: 0,
            fills: Vec::new(),
            rects: Vec::new(),
            released: false,
        }
    }
}

impl Canvas for FakeDisplay {
    fn fill(&mut self, color: Color32) {
        self.fills.push(color);
    }

    fn fill_rect(&mut self, rect: CellRect, color: Color32) {
        self.rects.push((rect, color));
    }
}

impl Display for FakeDisplay {
    type Error = Infallible;

    fn present(&mut self) -> Result<(), Infallible> {
        self.presents += 1;
        Ok(())
    }

    fn close_requested(&mut self) -> bool {
        self.presents >= self.close_after
    }

    fn release(&mut self) -> Result<(), Infallible> {
        self.released = true;
        Ok(())
    }
}

/// Fails on the n-th present, like a terminal whose pipe went away.
struct BrokenDisplay {
    fail_on: usize,
    presents: usize,
    released: bool,
}

impl Canvas for BrokenDisplay {
    fn fill(&mut self, _color: Color32) {}

    fn fill_rect(&mut self, _rect: CellRect, _color: Color32) {}
}

impl Display for BrokenDisplay {
    type Error = io::Error;

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        if self.presents == self.fail_on {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
        }
        Ok(())
    }

    fn close_requested(&mut self) -> bool {
        false
    }

    fn release(&mut self) -> io::Result<()> {
        self.released = true;
        Ok(())
    }
}

fn blinker(theme: Theme) -> Simulation {
    let cells = Grid::from_live(20, 20, &[(5, 4), (5, 5), (5, 6)]);
    Simulation::new(cells, theme.palette(), Duration::ZERO)
}

#[tokio::test]
async fn close_request_ends_the_loop() {
    let mut sim = blinker(Theme::Dark);
    // One present for the initial fill, then one per generation.
    let mut display = FakeDisplay::closing_after(4);

    let exit = run(&mut sim, &mut display, None, std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(exit, Exit::CloseRequested);
    assert_eq!(sim.generation(), 3);
    assert_eq!(display.rects.len(), 3 * 400);
    assert!(display.released);
}

#[tokio::test]
async fn window_starts_filled_with_background() {
    let mut sim = blinker(Theme::Dartmouth);
    let mut display = FakeDisplay::closing_after(1);

    run(&mut sim, &mut display, None, std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(display.fills, vec![Color32::from_rgb(0, 105, 62)]);
    assert_eq!(sim.generation(), 0);
    assert!(display.rects.is_empty());
}

#[tokio::test]
async fn generation_limit_ends_the_loop() {
    let mut sim = blinker(Theme::Light);
    let mut display = FakeDisplay::closing_after(usize::MAX);

    let exit = run(&mut sim, &mut display, Some(2), std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(exit, Exit::GenerationLimit);
    assert_eq!(sim.generation(), 2);
    // Period two: back to the horizontal blinker.
    assert_eq!(sim.cells(), &Grid::from_live(20, 20, &[(5, 4), (5, 5), (5, 6)]));
}

#[tokio::test]
async fn shutdown_signal_stops_after_the_current_generation() {
    let mut sim = blinker(Theme::Dark);
    let mut display = FakeDisplay::closing_after(usize::MAX);

    let exit = run(&mut sim, &mut display, None, std::future::ready(()))
        .await
        .unwrap();

    assert_eq!(exit, Exit::Interrupted);
    assert_eq!(sim.generation(), 1);
    assert_eq!(display.presents, 2);
}

#[tokio::test]
async fn drawn_frame_shows_vertical_blinker() {
    let palette = Theme::Dark.palette();
    let mut sim = blinker(Theme::Dark);
    let mut display = FakeDisplay::closing_after(2);

    run(&mut sim, &mut display, None, std::future::pending::<()>())
        .await
        .unwrap();

    let alive: Vec<(usize, usize)> = display
        .rects
        .iter()
        .filter(|(_, color)| *color == palette.alive)
        .map(|(rect, _)| rect.cell())
        .collect();
    assert_eq!(alive, vec![(4, 5), (5, 5), (6, 5)]);

    let dying: Vec<(usize, usize)> = display
        .rects
        .iter()
        .filter(|(_, color)| *color == palette.dying)
        .map(|(rect, _)| rect.cell())
        .collect();
    assert_eq!(dying, vec![(5, 4), (5, 6)]);
}

#[tokio::test]
async fn delay_is_waited_between_generations() {
    let cells = Grid::from_live(20, 20, &[(5, 4), (5, 5), (5, 6)]);
    let mut sim = Simulation::new(cells, Theme::Dark.palette(), Duration::from_millis(20));
    let mut display = FakeDisplay::closing_after(usize::MAX);

    let started = std::time::Instant::now();
    run(&mut sim, &mut display, Some(3), std::future::pending::<()>())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn terminal_display_renders_each_generation() {
    let mut sim = blinker(Theme::Dark);
    let mut display = TerminalDisplay::new(Vec::new(), 20, 20);

    run(&mut sim, &mut display, Some(2), std::future::pending::<()>())
        .await
        .unwrap();

    let text = String::from_utf8(display.into_inner()).unwrap();
    assert_eq!(text.matches("\x1b[H").count(), 3);
    assert!(text.contains("\x1b[48;2;255;255;255m"));
    assert!(text.ends_with("\x1b[0m\x1b[?25h"));
}

#[tokio::test]
async fn failed_present_still_releases_the_display() {
    let mut sim = blinker(Theme::Dark);
    let mut display = BrokenDisplay {
        fail_on: 3,
        presents: 0,
        released: false,
    };

    let err = run(&mut sim, &mut display, None, std::future::pending::<()>())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(sim.generation(), 2);
    assert!(display.released);
}
