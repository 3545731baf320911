use glam::Vec2;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement applied on the last move.
    pub velocity: Vec2,
    pub lifetime: i32,
}

impl Particle {
    pub fn new(position: Vec2, lifetime: i32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            lifetime,
        }
    }

    pub fn displace(&mut self, delta: Vec2) {
        self.position += delta;
        self.velocity = delta;
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0
    }

    /// Draw size: grows to `max` at mid-life and back to half of it at either
    /// end of a `full_lifetime` long life.
    pub fn size(&self, max: u32, full_lifetime: i32) -> u32 {
        let full = full_lifetime.max(1) as f32;
        let age = (full - (full / 2.0 - self.lifetime as f32).abs()) / full;
        (age * max as f32).floor().max(0.0) as u32
    }
}

/// Fixed arena of tracer particles, one slot per grid cell.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    pub particles: Vec<Particle>,
    cols: usize,
    rows: usize,
}

fn random_cell(cols: usize, rows: usize, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(0..cols.max(1)) as f32,
        rng.gen_range(0..rows.max(1)) as f32,
    )
}

impl ParticlePool {
    /// Seeds `cols * rows` particles at random cells with random remaining lifetimes.
    pub fn new(cols: usize, rows: usize, lifetime: i32, rng: &mut impl Rng) -> Self {
        let particles = (0..cols * rows)
            .map(|_| {
                let position = random_cell(cols, rows, rng);
                Particle::new(position, rng.gen_range(0..lifetime.max(1)))
            })
            .collect();
        Self {
            particles,
            cols,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn respawn(&self, lifetime: i32, rng: &mut impl Rng) -> Particle {
        Particle::new(random_cell(self.cols, self.rows, rng), lifetime)
    }

    /// Moves every live particle by `velocity(position)` and ages it by
    /// `decay`; expired slots are refilled in place instead.
    pub fn advance(
        &mut self,
        velocity: impl Fn(Vec2) -> Vec2,
        lifetime: i32,
        decay: i32,
        rng: &mut impl Rng,
    ) {
        let max = Vec2::new(
            self.cols.saturating_sub(1) as f32,
            self.rows.saturating_sub(1) as f32,
        );
        for i in 0..self.particles.len() {
            if self.particles[i].is_expired() {
                self.particles[i] = self.respawn(lifetime, rng);
                continue;
            }
            let particle = &mut self.particles[i];
            let delta = velocity(particle.position);
            particle.displace(delta);
            particle.position = particle.position.clamp(Vec2::ZERO, max);
            particle.lifetime -= decay;
        }
    }
}
