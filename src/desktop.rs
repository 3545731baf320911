use crate::render::color_to_rgb;
use crate::scene::{SceneDescriptor, presets};
use crate::Simulation;
use eframe::egui;
use glam::Vec2;

const DRAG_FORCE: f32 = 10.0;

pub struct DesktopApp {
    simulation: Simulation,
    scenes: Vec<SceneDescriptor>,
    current_scene: usize,
    paused: bool,
    step_once: bool,
    show_flow: bool,
    show_particles: bool,
    random_force: bool,
    cell_size: f32,
    last_drag_cell: Option<(i32, i32)>,
}

impl DesktopApp {
    pub fn new(simulation: Simulation) -> Self {
        let scenes = presets();
        let current_scene = scenes
            .iter()
            .position(|s| s.name == simulation.scene.name)
            .unwrap_or(0);
        Self {
            simulation,
            scenes,
            current_scene,
            paused: false,
            step_once: false,
            show_flow: false,
            show_particles: true,
            random_force: false,
            cell_size: 10.0,
            last_drag_cell: None,
        }
    }

    fn switch_scene(&mut self, index: usize) {
        self.current_scene = index % self.scenes.len();
        let scene = self.scenes[self.current_scene].clone();
        self.simulation.reset_scene(scene);
        self.last_drag_cell = None;
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                let previous = (self.current_scene + self.scenes.len() - 1) % self.scenes.len();
                self.switch_scene(previous);
            }
            ui.label(self.scenes[self.current_scene].name.as_str());
            if ui.button("▶").clicked() {
                self.switch_scene(self.current_scene + 1);
            }

            ui.separator();

            if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Step").clicked() {
                self.step_once = true;
            }
            if ui.button("Restart").clicked() {
                self.switch_scene(self.current_scene);
            }
        });

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_flow, "Show Flow");
            ui.checkbox(&mut self.show_particles, "Particles");
            ui.checkbox(&mut self.random_force, "Random Force");
            ui.add(egui::Slider::new(&mut self.cell_size, 4.0..=16.0).text("Cell Size"));
        });
    }

    fn handle_pointer(&mut self, response: &egui::Response, rect: egui::Rect) {
        let to_cell = |pos: egui::Pos2| {
            (
                (pos.x - rect.left()) / self.cell_size,
                (pos.y - rect.top()) / self.cell_size,
            )
        };

        if let Some(pos) = response.hover_pos() {
            let (x, y) = to_cell(pos);
            self.simulation.set_pointer(x, y);
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = to_cell(pos);
                let cell = (x as i32, y as i32);
                if let Some(last) = self.last_drag_cell {
                    if last != cell {
                        self.simulation.add_directional_force(
                            last,
                            cell,
                            Vec2::splat(DRAG_FORCE),
                            self.random_force,
                        );
                    }
                }
                self.last_drag_cell = Some(cell);
            }
        } else {
            self.last_drag_cell = None;
        }
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        let cols = self.simulation.cols();
        let rows = self.simulation.rows();
        let colors = self.simulation.colors();
        let flow_x = self.simulation.flow_x();
        let flow_y = self.simulation.flow_y();

        for y in 0..rows {
            for x in 0..cols {
                let idx = y * cols + x;
                let color = if self.show_flow {
                    let r = (flow_x[idx].abs() / 2.0).min(1.0);
                    let g = (flow_y[idx].abs() / 2.0).min(1.0);
                    egui::Color32::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, 128)
                } else {
                    let [r, g, b] = color_to_rgb(colors[idx]);
                    egui::Color32::from_rgb(r, g, b)
                };

                let cell = egui::Rect::from_min_size(
                    egui::Pos2::new(
                        rect.left() + x as f32 * self.cell_size,
                        rect.top() + y as f32 * self.cell_size,
                    ),
                    egui::Vec2::splat(self.cell_size),
                );
                painter.rect_filled(cell, 0.0, color);
            }
        }

        if self.show_particles {
            let lifetime = self.simulation.config.particle_lifetime;
            for particle in self.simulation.particles() {
                let radius = particle.size(self.cell_size as u32 / 2, lifetime) as f32 / 2.0;
                if radius <= 0.0 {
                    continue;
                }
                let center = egui::Pos2::new(
                    rect.left() + (particle.position.x + 0.5) * self.cell_size,
                    rect.top() + (particle.position.y + 0.5) * self.cell_size,
                );
                painter.circle_filled(center, radius, egui::Color32::from_white_alpha(120));
            }
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("gridflow");
            self.controls(ui);
            ui.separator();

            let canvas = egui::Vec2::new(
                self.simulation.cols() as f32 * self.cell_size,
                self.simulation.rows() as f32 * self.cell_size,
            );
            let (rect, response) = ui.allocate_exact_size(canvas, egui::Sense::click_and_drag());

            self.handle_pointer(&response, rect);
            self.paint(ui.painter(), rect);

            if !self.paused || self.step_once {
                self.simulation.step();
                self.step_once = false;
            }

            ui.label(format!(
                "Frame: {} | FPS: {:.1} | Pointer: ({:.1}, {:.1}) | Drag to push fluid",
                self.simulation.frame,
                self.simulation.fps(),
                self.simulation.pointer.x,
                self.simulation.pointer.y,
            ));
        });

        ctx.request_repaint();
    }
}
