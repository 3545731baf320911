use crate::export::FluidData;
use glam::Vec3;
use image::{ImageBuffer, Rgb, RgbImage};

pub struct Renderer {
    width: u32,
    height: u32,
    pub show_particles: bool,
    pub particle_size: u32,
}

pub fn color_to_rgb(color: Vec3) -> [u8; 3] {
    let c = color.clamp(Vec3::ZERO, Vec3::splat(255.0));
    [c.x as u8, c.y as u8, c.z as u8]
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            show_particles: false,
            particle_size: 3,
        }
    }

    pub fn render_to_image(&self, simulation: &impl FluidData) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        let scale_x = self.width as f32 / simulation.cols() as f32;
        let scale_y = self.height as f32 / simulation.rows() as f32;

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / scale_x) as usize;
            let sim_y = (y as f32 / scale_y) as usize;

            if sim_x < simulation.cols() && sim_y < simulation.rows() {
                let idx = sim_y * simulation.cols() + sim_x;
                *pixel = Rgb(color_to_rgb(simulation.colors()[idx]));
            } else {
                *pixel = Rgb([0, 0, 0]);
            }
        }

        if self.show_particles {
            let lifetime = simulation.particle_lifetime();
            for particle in simulation.particles() {
                let size = particle.size(self.particle_size, lifetime).max(1);
                let px = ((particle.position.x + 0.5) * scale_x) as i64;
                let py = ((particle.position.y + 0.5) * scale_y) as i64;
                let half = (size / 2) as i64;
                for dy in -half..=half {
                    for dx in -half..=half {
                        let (qx, qy) = (px + dx, py + dy);
                        if qx >= 0 && qy >= 0 && (qx as u32) < self.width && (qy as u32) < self.height {
                            img.put_pixel(qx as u32, qy as u32, Rgb([255, 255, 255]));
                        }
                    }
                }
            }
        }

        img
    }

    /// Red for horizontal and green for vertical flow magnitude, saturating at the flow limit.
    pub fn render_flow_field(&self, simulation: &impl FluidData) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / self.width as f32 * simulation.cols() as f32) as usize;
            let sim_y = (y as f32 / self.height as f32 * simulation.rows() as f32) as usize;

            if sim_x < simulation.cols() && sim_y < simulation.rows() {
                let idx = sim_y * simulation.cols() + sim_x;
                let flow_x = simulation.flow_x()[idx];
                let flow_y = simulation.flow_y()[idx];

                let r = ((flow_x.abs() / 2.0 * 255.0).min(255.0)) as u8;
                let g = ((flow_y.abs() / 2.0 * 255.0).min(255.0)) as u8;
                let b = 128;

                *pixel = Rgb([r, g, b]);
            } else {
                *pixel = Rgb([0, 0, 0]);
            }
        }

        img
    }
}
