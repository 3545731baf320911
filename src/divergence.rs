use crate::error::SimError;
use crate::fields::{CellType, FieldStore};
use crate::workers::WorkerPool;

/// Net outflow of one cell: its right and down edges minus the edges coming
/// in from the left and top neighbours. INFLOW cells always report zero.
pub fn divergence_at(fields: &FieldStore, x: usize, y: usize) -> f32 {
    let idx = fields.idx(x, y);
    if fields.cell_types[idx] == CellType::Inflow {
        return 0.0;
    }

    let mut divergence_x = fields.flow_x[idx];
    let mut divergence_y = fields.flow_y[idx];
    if x > 0 {
        divergence_x -= fields.flow_x[idx - 1];
    }
    if y > 0 {
        divergence_y -= fields.flow_y[idx - fields.cols];
    }
    divergence_x + divergence_y
}

/// Recomputes the whole divergence field from the current flows.
pub fn compute_divergence(fields: &mut FieldStore, workers: &WorkerPool) -> Result<(), SimError> {
    let cols = fields.cols;
    let rows = fields.rows;
    let mut divergence = std::mem::take(&mut fields.divergence);

    let result = {
        let view: &FieldStore = fields;
        workers.checkerboard(
            cols,
            rows,
            |x, y| divergence_at(view, x, y),
            |x, y, value| divergence[y * cols + x] = value,
        )
    };

    fields.divergence = divergence;
    result
}
