//! Grid fluid approximation: staggered flows, dye advection, scripted inflows and tracer particles.

pub mod advection;
pub mod analysis;
pub mod config;
pub mod desktop;
pub mod diffusion;
pub mod divergence;
pub mod error;
pub mod export;
pub mod fields;
pub mod fps;
pub mod inflow;
pub mod particles;
pub mod projection;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod workers;

pub use advection::{AdvectionStencil, lerp, two_dimension_lerp};
pub use analysis::{AnalysisRecorder, FlowMetrics};
pub use config::SimConfig;
pub use desktop::DesktopApp;
pub use error::SimError;
pub use export::{FluidData, ImageExporter};
pub use fields::{CellType, FieldStore};
pub use fps::FpsCounter;
pub use inflow::{InflowBehavior, InflowSource};
pub use particles::{Particle, ParticlePool};
pub use render::Renderer;
pub use scene::{SceneDescriptor, presets};
pub use simulation::{FieldSnapshot, Simulation};
pub use workers::WorkerPool;
