use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("worker task for parity {parity} panicked: {message}")]
    WorkerPanicked { parity: usize, message: String },
    #[error("worker pool has been shut down")]
    PoolShutdown,
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    #[error("unknown scene preset `{0}`")]
    UnknownScene(String),
    #[error("scene has zero-sized dimensions {cols}x{rows}")]
    EmptyScene { cols: usize, rows: usize },
    #[error("inflow source {index} has a zero or non-finite period")]
    InvalidPeriod { index: usize },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
