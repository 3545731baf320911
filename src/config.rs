use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Share of a cell's own velocity kept by one diffuse pass.
    pub velocity_diffusion: f32,
    /// Share of a cell's own color kept by one diffuse pass.
    pub color_diffusion: f32,
    /// Relaxation passes per step.
    pub projection_iterations: usize,
    /// Largest magnitude a projected flow edge may hold.
    pub flow_limit: f32,
    pub particle_lifetime: i32,
    pub particle_decay: i32,
    pub fps_window: usize,
    pub worker_threads: usize,
    /// Inflow colors whose channel sum is at or below this leave the cell color alone.
    pub inflow_color_threshold: f32,
    /// Treat OBSTACLE cells as closed in the projection neighbour count.
    pub closed_obstacles: bool,
    pub compute_pressure: bool,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            velocity_diffusion: 0.8,
            color_diffusion: 0.8,
            projection_iterations: 100,
            flow_limit: 2.0,
            particle_lifetime: 1000,
            particle_decay: 20,
            fps_window: 10,
            worker_threads: 2,
            inflow_color_threshold: 0.1,
            closed_obstacles: false,
            compute_pressure: false,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
