// ui.rs - eframe window backend

use anyhow::{Result, anyhow};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Vec2};
use log::info;
use std::time::Instant;

use crate::config::Config;
use crate::render::{Canvas, CellRect, window_size};
use crate::simulation::Simulation;

// Paints cells relative to the panel's top-left corner.
struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
}

impl Canvas for PainterCanvas<'_> {
    fn fill(&mut self, color: Color32) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, color);
    }

    fn fill_rect(&mut self, rect: CellRect, color: Color32) {
        let min = self.origin + egui::vec2(rect.x as f32, rect.y as f32);
        self.painter
            .rect_filled(Rect::from_min_size(min, Vec2::splat(rect.size as f32)), 0.0, color);
    }
}

pub struct LifeApp {
    sim: Simulation,
    limit: Option<u64>,
    last_step: Option<Instant>,
    closing: bool,
    closed: bool,
}

impl LifeApp {
    pub fn new(sim: Simulation, limit: Option<u64>) -> Self {
        Self {
            sim,
            limit,
            last_step: None,
            closing: false,
            closed: false,
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.sim.generation() >= limit)
    }

    /// Steps once the delay since the previous step has passed.
    fn step_if_due(&mut self, now: Instant) -> bool {
        let due = self
            .last_step
            .map_or(true, |last| now.saturating_duration_since(last) >= self.sim.delay());
        if due {
            self.sim.step();
            self.last_step = Some(now);
        }
        due
    }

    /// Logs the exit once when the user closes the window.
    fn observe_close(&mut self, close_requested: bool) -> bool {
        let first = close_requested && !std::mem::replace(&mut self.closed, true);
        if first {
            info!("window closed after {} generations (CloseRequested)", self.sim.generation());
        }
        first
    }
}

impl eframe::App for LifeApp {
    // eframe draws and presents a frame per call, so the delay is paced by
    // elapsed time rather than a blocking sleep.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.observe_close(ctx.input(|i| i.viewport().close_requested())) {
            return;
        }

        if self.limit_reached() {
            if !std::mem::replace(&mut self.closing, true) {
                info!("stopped after {} generations (GenerationLimit)", self.sim.generation());
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        } else {
            self.step_if_due(Instant::now());
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let mut canvas = PainterCanvas {
                    painter: ui.painter(),
                    origin: ui.max_rect().min,
                };
                canvas.fill(self.sim.palette().background);
                self.sim.paint(&mut canvas);
            });

        let delay = self.sim.delay();
        let elapsed = self.last_step.map_or(delay, |last| last.elapsed());
        ctx.request_repaint_after(delay.saturating_sub(elapsed));
    }
}

/// Opens a `columns * 9` by `rows * 9` window and runs until it is closed.
pub fn run_window(config: &Config, sim: Simulation) -> Result<()> {
    let (width, height) = window_size(config.rows, config.columns);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([width as f32, height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    let app = LifeApp::new(sim, config.generations);
    eframe::run_native(&config.title, options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("window backend failed: {e}"))
}
