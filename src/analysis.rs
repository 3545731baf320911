use crate::export::FluidData;
use glam::Vec3;

#[derive(Debug, Clone)]
pub struct FlowMetrics {
    pub total_color: Vec3,
    pub max_flow: f32,
    pub avg_flow: f32,
    pub kinetic_energy: f32,
    pub mean_divergence: f32,
    pub max_divergence: f32,
    pub live_particles: usize,
    pub fps: f64,
    pub frame: usize,
}

impl FlowMetrics {
    pub fn analyze(simulation: &impl FluidData, frame: usize) -> Self {
        let size = (simulation.cols() * simulation.rows()).max(1);

        let total_color = simulation.colors().iter().copied().sum::<Vec3>();

        let mut max_flow: f32 = 0.0;
        let mut flow_sum: f32 = 0.0;
        let mut kinetic_energy: f32 = 0.0;
        for (&fx, &fy) in simulation.flow_x().iter().zip(simulation.flow_y()) {
            let speed_sq = fx * fx + fy * fy;
            let speed = speed_sq.sqrt();
            max_flow = max_flow.max(speed);
            flow_sum += speed;
            kinetic_energy += 0.5 * speed_sq;
        }

        let mut divergence_sum: f32 = 0.0;
        let mut max_divergence: f32 = 0.0;
        for d in simulation.divergence() {
            divergence_sum += d.abs();
            max_divergence = max_divergence.max(d.abs());
        }

        let live_particles = simulation
            .particles()
            .iter()
            .filter(|p| !p.is_expired())
            .count();

        Self {
            total_color,
            max_flow,
            avg_flow: flow_sum / size as f32,
            kinetic_energy,
            mean_divergence: divergence_sum / size as f32,
            max_divergence,
            live_particles,
            fps: simulation.fps(),
            frame,
        }
    }

    pub fn print_summary(&self) {
        println!("Frame {} Metrics:", self.frame);
        println!(
            "  Total Color: ({:.1}, {:.1}, {:.1})",
            self.total_color.x, self.total_color.y, self.total_color.z
        );
        println!("  Max Flow: {:.6}", self.max_flow);
        println!("  Avg Flow: {:.6}", self.avg_flow);
        println!("  Kinetic Energy: {:.6}", self.kinetic_energy);
        println!("  Mean |Divergence|: {:.6}", self.mean_divergence);
        println!("  Max |Divergence|: {:.6}", self.max_divergence);
        println!("  Live Particles: {}", self.live_particles);
        println!("  FPS: {:.1}", self.fps);
        println!();
    }
}

#[derive(Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FlowMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, simulation: &impl FluidData, frame: usize) {
        let metrics = FlowMetrics::analyze(simulation, frame);
        self.metrics_history.push(metrics);
    }

    pub fn print_trends(&self) {
        if self.metrics_history.len() < 2 {
            return;
        }

        let first = &self.metrics_history[0];
        let last = &self.metrics_history[self.metrics_history.len() - 1];

        println!("=== TREND ANALYSIS ===");
        let first_color = first.total_color.element_sum();
        let last_color = last.total_color.element_sum();
        println!(
            "Color change: {:.1} -> {:.1} ({:+.3}%)",
            first_color,
            last_color,
            (last_color - first_color) / first_color.max(0.001) * 100.0
        );
        println!(
            "Kinetic Energy change: {:.6} -> {:.6} ({:+.3}%)",
            first.kinetic_energy,
            last.kinetic_energy,
            (last.kinetic_energy - first.kinetic_energy) / first.kinetic_energy.max(0.001) * 100.0
        );
        println!(
            "Mean divergence change: {:.6} -> {:.6}",
            first.mean_divergence, last.mean_divergence
        );
    }
}
