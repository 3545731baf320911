use crate::advection;
use crate::config::SimConfig;
use crate::diffusion;
use crate::divergence;
use crate::error::SimError;
use crate::fields::{CellType, FieldStore};
use crate::fps::FpsCounter;
use crate::inflow;
use crate::particles::{Particle, ParticlePool};
use crate::projection;
use crate::scene::SceneDescriptor;
use crate::workers::WorkerPool;
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Owned copy of the state presentation code reads between steps.
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    pub cols: usize,
    pub rows: usize,
    pub flow_x: Vec<f32>,
    pub flow_y: Vec<f32>,
    pub color: Vec<Vec3>,
    pub divergence: Vec<f32>,
    pub particles: Vec<Particle>,
    pub particle_lifetime: i32,
    pub fps: f64,
    pub frame: u64,
}

/// The whole simulation state: fields, particles, the running scene and the worker pool.
pub struct Simulation {
    pub config: SimConfig,
    pub(crate) scene: SceneDescriptor,
    pub(crate) fields: FieldStore,
    pub(crate) particles: ParticlePool,
    pub pointer: Vec2,
    pub frame: u64,
    fps: FpsCounter,
    workers: WorkerPool,
    rng: StdRng,
}

fn build_fields(scene: &SceneDescriptor) -> FieldStore {
    let mut fields = FieldStore::new(scene.cols, scene.rows, scene.pre_warm_color);
    for &[x, y] in &scene.obstacles {
        fields.set_cell_type(x, y, CellType::Obstacle);
    }
    fields.refresh_neighbour_counts();
    fields
}

impl Simulation {
    pub fn new(scene: SceneDescriptor) -> Result<Self, SimError> {
        Self::with_config(scene, SimConfig::default())
    }

    pub fn with_config(scene: SceneDescriptor, config: SimConfig) -> Result<Self, SimError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let workers = WorkerPool::new(config.worker_threads)?;
        let fields = build_fields(&scene);
        let particles = ParticlePool::new(scene.cols, scene.rows, config.particle_lifetime, &mut rng);

        Ok(Self {
            fps: FpsCounter::new(config.fps_window),
            config,
            scene,
            fields,
            particles,
            pointer: Vec2::ZERO,
            frame: 0,
            workers,
            rng,
        })
    }

    /// Restarts from `scene`, reallocating every field for its dimensions.
    pub fn reset_scene(&mut self, scene: SceneDescriptor) {
        log::debug!("resetting to scene `{}` ({}x{})", scene.name, scene.cols, scene.rows);
        self.fields = build_fields(&scene);
        self.particles = ParticlePool::new(
            scene.cols,
            scene.rows,
            self.config.particle_lifetime,
            &mut self.rng,
        );
        self.scene = scene;
        self.fps = FpsCounter::new(self.config.fps_window);
        self.frame = 0;
    }

    /// Stops the worker pool. Steps requested afterwards are ignored.
    pub fn shutdown(&mut self) {
        self.workers.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.workers.is_running()
    }

    pub fn cols(&self) -> usize {
        self.fields.cols
    }

    pub fn rows(&self) -> usize {
        self.fields.rows
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Advances one tick. Worker failures are logged and the step still completes.
    pub fn step(&mut self) {
        if !self.workers.is_running() {
            log::warn!("step requested after the worker pool was shut down");
            return;
        }

        self.compute_divergence();
        self.diffuse();
        if self.config.compute_pressure {
            projection::calculate_pressure(&mut self.fields);
        }
        self.compute_divergence();

        for _ in 0..self.config.projection_iterations {
            self.compute_divergence();
            self.project();
        }
        self.compute_divergence();

        self.advect_velocities();
        self.advect_color();
        self.compute_divergence();

        self.advance_particles();
        self.apply_inflows();

        self.fps.tick();
        self.frame += 1;
    }

    pub fn compute_divergence(&mut self) {
        if let Err(err) = divergence::compute_divergence(&mut self.fields, &self.workers) {
            log::error!("divergence pass failed: {err}");
        }
    }

    pub fn project(&mut self) {
        if let Err(err) = projection::project(&mut self.fields, &self.workers, &self.config) {
            log::error!("projection pass failed: {err}");
        }
    }

    pub fn diffuse(&mut self) {
        diffusion::diffuse(
            &mut self.fields,
            self.config.velocity_diffusion,
            self.config.color_diffusion,
        );
    }

    pub fn advect_velocities(&mut self) {
        advection::advect_velocities(&mut self.fields);
    }

    pub fn advect_color(&mut self) {
        advection::advect_color(&mut self.fields);
    }

    pub fn advance_particles(&mut self) {
        let fields = &self.fields;
        self.particles.advance(
            |p| advection::velocity_at(fields, p.x, p.y),
            self.config.particle_lifetime,
            self.config.particle_decay,
            &mut self.rng,
        );
    }

    /// Ticks every scene inflow in order, then injects it.
    pub fn apply_inflows(&mut self) {
        let threshold = self.config.inflow_color_threshold;
        for source in &mut self.scene.inflows {
            source.tick(self.pointer, &mut self.rng);
            inflow::add_inflow(
                &mut self.fields,
                source.x,
                source.y,
                source.color,
                source.direction,
                source.noise,
                threshold,
                &mut self.rng,
            );
        }
    }

    pub fn add_inflow(&mut self, x: i32, y: i32, color: Vec3, direction: Vec2, noise: bool) {
        inflow::add_inflow(
            &mut self.fields,
            x,
            y,
            color,
            direction,
            noise,
            self.config.inflow_color_threshold,
            &mut self.rng,
        );
    }

    pub fn add_directional_force(
        &mut self,
        a: (i32, i32),
        b: (i32, i32),
        magnitude: Vec2,
        randomized: bool,
    ) {
        inflow::add_directional_force(&mut self.fields, a, b, magnitude, randomized, &mut self.rng);
    }

    pub fn velocity_at(&self, x: f32, y: f32) -> Vec2 {
        advection::velocity_at(&self.fields, x, y)
    }

    pub fn pressure_gradient_at(&self, x: f32, y: f32) -> Vec2 {
        projection::pressure_gradient_at(&self.fields, x, y)
    }

    pub fn scene(&self) -> &SceneDescriptor {
        &self.scene
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Direct access for seeding a state or reclassifying cells between steps.
    /// Call [`FieldStore::refresh_neighbour_counts`] after changing cell types.
    pub fn fields_mut(&mut self) -> &mut FieldStore {
        &mut self.fields
    }

    pub fn flow_x(&self) -> &[f32] {
        &self.fields.flow_x
    }

    pub fn flow_y(&self) -> &[f32] {
        &self.fields.flow_y
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.fields.color
    }

    pub fn divergence(&self) -> &[f32] {
        &self.fields.divergence
    }

    pub fn summed_flow(&self) -> &[Vec2] {
        &self.fields.summed_flow
    }

    pub fn summed_outflow(&self) -> &[Vec2] {
        &self.fields.summed_outflow
    }

    pub fn neighbours(&self) -> &[u8] {
        &self.fields.neighbours
    }

    pub fn pressure(&self) -> &[f32] {
        &self.fields.pressure
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles.particles
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            cols: self.fields.cols,
            rows: self.fields.rows,
            flow_x: self.fields.flow_x.clone(),
            flow_y: self.fields.flow_y.clone(),
            color: self.fields.color.clone(),
            divergence: self.fields.divergence.clone(),
            particles: self.particles.particles.clone(),
            particle_lifetime: self.config.particle_lifetime,
            fps: self.fps.fps(),
            frame: self.frame,
        }
    }
}
