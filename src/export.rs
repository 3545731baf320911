use crate::error::SimError;
use crate::particles::Particle;
use crate::render::Renderer;
use crate::simulation::{FieldSnapshot, Simulation};
use glam::Vec3;
use std::path::Path;

/// Read-only view of the fields a presentation layer draws from.
pub trait FluidData {
    fn cols(&self) -> usize;
    fn rows(&self) -> usize;
    fn flow_x(&self) -> &[f32];
    fn flow_y(&self) -> &[f32];
    fn colors(&self) -> &[Vec3];
    fn divergence(&self) -> &[f32];
    fn particles(&self) -> &[Particle];
    /// Lifetime a freshly spawned particle starts with.
    fn particle_lifetime(&self) -> i32;
    fn fps(&self) -> f64;
}

impl FluidData for Simulation {
    fn cols(&self) -> usize { self.fields.cols }
    fn rows(&self) -> usize { self.fields.rows }
    fn flow_x(&self) -> &[f32] { &self.fields.flow_x }
    fn flow_y(&self) -> &[f32] { &self.fields.flow_y }
    fn colors(&self) -> &[Vec3] { &self.fields.color }
    fn divergence(&self) -> &[f32] { &self.fields.divergence }
    fn particles(&self) -> &[Particle] { &self.particles.particles }
    fn particle_lifetime(&self) -> i32 { self.config.particle_lifetime }
    fn fps(&self) -> f64 { Simulation::fps(self) }
}

impl FluidData for FieldSnapshot {
    fn cols(&self) -> usize { self.cols }
    fn rows(&self) -> usize { self.rows }
    fn flow_x(&self) -> &[f32] { &self.flow_x }
    fn flow_y(&self) -> &[f32] { &self.flow_y }
    fn colors(&self) -> &[Vec3] { &self.color }
    fn divergence(&self) -> &[f32] { &self.divergence }
    fn particles(&self) -> &[Particle] { &self.particles }
    fn particle_lifetime(&self) -> i32 { self.particle_lifetime }
    fn fps(&self) -> f64 { self.fps }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn with_particles(mut self, show: bool) -> Self {
        self.renderer.show_particles = show;
        self
    }

    pub fn export_color_png(&self, simulation: &impl FluidData, path: &Path) -> Result<(), SimError> {
        let img = self.renderer.render_to_image(simulation);
        img.save(path)?;
        Ok(())
    }

    pub fn export_flow_png(&self, simulation: &impl FluidData, path: &Path) -> Result<(), SimError> {
        let img = self.renderer.render_flow_field(simulation);
        img.save(path)?;
        Ok(())
    }

    /// Steps `simulation` `steps` times, writing `<prefix>_frame_NNNN.png` after each step.
    pub fn export_frame_sequence(
        &self,
        simulation: &mut Simulation,
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<(), SimError> {
        for i in 0..steps {
            simulation.step();

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            let path = output_dir.join(filename);

            self.export_color_png(simulation, &path)?;
        }
        Ok(())
    }
}
