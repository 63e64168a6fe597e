// main.rs - egui driver for the Game of Life core

use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;
use env_logger::Env;
use life_core::config;
use life_core::{GameOfLife, PATTERNS, TickScheduler};

mod ui;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("starting Game of Life");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life",
        options,
        Box::new(|_cc| Box::new(LifeApp::default())),
    )
}

/// Grid interaction tools: pointer toggles single cells, draw and erase
/// paint while the button is held.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pointer,
    Draw,
    Erase,
}

pub struct LifeApp {
    pub game: GameOfLife,
    scheduler: TickScheduler,
    tick_tx: mpsc::Sender<()>,
    tick_rx: mpsc::Receiver<()>,

    pub speed_ms: u64,
    pub cell_size: u32,
    pub tool: Tool,
    pub selected_pattern: usize,
    pub active_label: Option<String>,
    pub live_color: egui::Color32,
    pub dead_color: egui::Color32,
}

impl Default for LifeApp {
    fn default() -> Self {
        let (tick_tx, tick_rx) = mpsc::channel();
        Self {
            game: GameOfLife::default(),
            scheduler: TickScheduler::new().expect("failed to start the tick runtime"),
            tick_tx,
            tick_rx,
            speed_ms: config::SPEED_DEFAULT_MS,
            cell_size: config::CELL_SIZE_DEFAULT,
            tool: Tool::Pointer,
            selected_pattern: 0,
            active_label: None,
            live_color: egui::Color32::from_rgb(0x22, 0xc5, 0x5e),
            dead_color: egui::Color32::from_rgb(0x11, 0x18, 0x27),
        }
    }
}

impl LifeApp {
    /// Drain ticks posted by the scheduler and advance the simulation. A tick
    /// that raced a stop finds `running` false and is discarded, so a step
    /// and a grid replacement can never share a tick.
    pub fn pump_ticks(&mut self) {
        while self.tick_rx.try_recv().is_ok() {
            if !self.game.is_running() {
                continue;
            }
            self.game.step();
        }
        // the game can stop itself on a stable or empty outcome
        if !self.game.is_running() && self.scheduler.is_active() {
            self.scheduler.cancel();
        }
    }

    fn start_ticking(&mut self, ctx: &egui::Context) {
        let tx = self.tick_tx.clone();
        let ctx = ctx.clone();
        self.scheduler.start(Duration::from_millis(self.speed_ms), move || {
            if tx.send(()).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    pub fn toggle_running(&mut self, ctx: &egui::Context) {
        if self.game.is_running() {
            self.game.stop();
            self.scheduler.cancel();
        } else {
            self.game.start();
            self.start_ticking(ctx);
        }
    }

    pub fn set_speed(&mut self, ctx: &egui::Context, speed_ms: u64) {
        let speed_ms = config::clamp_speed(speed_ms);
        if speed_ms == self.speed_ms {
            return;
        }
        self.speed_ms = speed_ms;
        if self.game.is_running() {
            // restart the schedule at the new pace
            self.start_ticking(ctx);
        }
    }

    pub fn step_once(&mut self) {
        if !self.game.is_running() {
            self.game.step();
        }
    }

    pub fn clear(&mut self) {
        self.game.clear();
        self.active_label = None;
    }

    pub fn randomize(&mut self) {
        self.game.randomize();
        self.active_label = Some("Random".to_owned());
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            if self.game.load_pattern(pattern.name) {
                self.active_label = Some(pattern.name.to_owned());
            }
        }
    }

    pub fn zoom(&mut self, zoom_in: bool) {
        self.cell_size = config::zoomed(self.cell_size, zoom_in);
    }

    /// Keep the grid matched to the canvas area at the current cell size.
    /// The identity no-op in `resize` makes the steady state free.
    pub fn fit_grid_to(&mut self, width_px: f32, height_px: f32) {
        let (rows, cols) = config::grid_dims_for(width_px, height_px, self.cell_size);
        self.game.resize(rows, cols);
    }

    pub fn paint_at(&mut self, row: usize, col: usize, clicked: bool) {
        match self.tool {
            Tool::Pointer => {
                if clicked {
                    self.game.toggle_cell(row, col);
                }
            }
            Tool::Draw => {
                self.game.set_cell(row, col, true);
            }
            Tool::Erase => {
                self.game.set_cell(row, col, false);
            }
        }
    }
}
