// ui.rs - Control rows and the painted grid canvas

use eframe::egui;
use egui::{Color32, Rect, Sense, Stroke, Vec2};
use life_core::{PATTERNS, config};

use crate::{LifeApp, Tool};

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_ticks();
        self.handle_shortcuts(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.game.is_running() { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.toggle_running(ctx);
                }

                if ui
                    .add_enabled(!self.game.is_running(), egui::Button::new("⏭ Step"))
                    .clicked()
                {
                    self.step_once();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.game.generation()));
            });

            // Speed, zoom, tools and colors
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = self.speed_ms;
                if ui
                    .add(
                        egui::Slider::new(&mut speed, config::SPEED_MIN_MS..=config::SPEED_MAX_MS)
                            .step_by(config::SPEED_STEP_MS as f64)
                            .suffix(" ms/gen"),
                    )
                    .changed()
                {
                    self.set_speed(ctx, speed);
                }

                ui.separator();

                if ui.button("➖").on_hover_text("Zoom out").clicked() {
                    self.zoom(false);
                }
                if ui.button("➕").on_hover_text("Zoom in").clicked() {
                    self.zoom(true);
                }

                ui.separator();

                ui.selectable_value(&mut self.tool, Tool::Pointer, "Pointer");
                ui.selectable_value(&mut self.tool, Tool::Draw, "Draw");
                ui.selectable_value(&mut self.tool, Tool::Erase, "Erase");

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.label("Space start/stop · C clear · R random · S step · click or drag the grid to edit");

            ui.separator();

            self.grid_canvas(ui);
        });

        if self.game.is_running() {
            ctx.request_repaint_after(std::time::Duration::from_millis(self.speed_ms));
        }
    }
}

impl LifeApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // a focused text widget owns the keyboard
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_running(ctx);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::C)) {
            self.clear();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.randomize();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::S)) {
            self.step_once();
        }
    }

    fn grid_canvas(&mut self, ui: &mut egui::Ui) {
        // reserve a line for the stats row below the canvas
        let avail = ui.available_size();
        let canvas_size = Vec2::new(avail.x, (avail.y - 24.0).max(0.0));
        self.fit_grid_to(canvas_size.x, canvas_size.y);

        let cell = self.cell_size as f32;
        let rows = self.game.grid().rows();
        let cols = self.game.grid().cols();

        let (response, painter) = ui.allocate_painter(canvas_size, Sense::click_and_drag());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::BLACK);
        for row in 0..rows {
            for col in 0..cols {
                let rect = Rect::from_min_size(
                    egui::pos2(origin.x + col as f32 * cell, origin.y + row as f32 * cell),
                    Vec2::splat(cell),
                );
                let color = if self.game.grid().cell(row, col) {
                    self.live_color
                } else {
                    self.dead_color
                };
                painter.rect_filled(rect, 1.0, color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }
        }

        // map the pointer back to a cell; out-of-range coordinates fall
        // through to the core's bounds-checked no-ops
        if let Some(pos) = response.interact_pointer_pos() {
            if pos.x >= origin.x && pos.y >= origin.y {
                let row = ((pos.y - origin.y) / cell) as usize;
                let col = ((pos.x - origin.x) / cell) as usize;
                let painting =
                    response.clicked() || response.dragged() || response.is_pointer_button_down_on();
                if painting {
                    self.paint_at(row, col, response.clicked());
                }
            }
        }

        ui.separator();

        // Statistics
        let live = self.game.grid().live_cells();
        let total = rows * cols;
        ui.horizontal(|ui| {
            ui.label(format!("Grid: {rows}×{cols}"));
            ui.label(format!("Live cells: {live}"));
            ui.label(format!(
                "Population: {:.1}%",
                live as f32 / total as f32 * 100.0
            ));
            if let Some(label) = &self.active_label {
                ui.separator();
                ui.label(format!("Showing: {label}"));
            }
        });
    }
}
