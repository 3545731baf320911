use crate::advection::two_dimension_lerp;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::fields::{CellType, FieldStore};
use crate::workers::WorkerPool;
use glam::Vec2;

fn is_cell_full(fields: &FieldStore, x: isize, y: isize, closed_obstacles: bool) -> bool {
    closed_obstacles
        && fields
            .checked_idx(x, y)
            .is_some_and(|i| fields.cell_types[i] == CellType::Obstacle)
}

/// Share of a cell's divergence that each of its open direct edges has to absorb.
pub fn delta_velocity(fields: &FieldStore, x: usize, y: usize, closed_obstacles: bool) -> f32 {
    let (sx, sy) = (x as isize, y as isize);
    let mut open = 4;
    if x == 0 || is_cell_full(fields, sx - 1, sy, closed_obstacles) {
        open -= 1;
    }
    if x + 1 >= fields.cols || is_cell_full(fields, sx + 1, sy, closed_obstacles) {
        open -= 1;
    }
    if y == 0 || is_cell_full(fields, sx, sy - 1, closed_obstacles) {
        open -= 1;
    }
    if y + 1 >= fields.rows || is_cell_full(fields, sx, sy + 1, closed_obstacles) {
        open -= 1;
    }

    if open == 0 {
        0.0
    } else {
        fields.divergence[fields.idx(x, y)] / open as f32
    }
}

/// New (right, down) edge values of one cell, read from the previous flows.
fn project_cell(fields: &FieldStore, x: usize, y: usize, config: &SimConfig) -> (f32, f32) {
    let idx = fields.idx(x, y);
    if fields.cell_types[idx] != CellType::Default {
        return (0.0, 0.0);
    }

    let closed = config.closed_obstacles;
    let limit = config.flow_limit;
    let delta = delta_velocity(fields, x, y, closed);
    let (sx, sy) = (x as isize, y as isize);

    let mut flow_x = 0.0;
    if x + 1 < fields.cols && !is_cell_full(fields, sx + 1, sy, closed) {
        let correction = delta_velocity(fields, x + 1, y, closed) - delta;
        flow_x = (fields.flow_x_prev[idx] + correction).clamp(-limit, limit);
    }

    let mut flow_y = 0.0;
    if y + 1 < fields.rows && !is_cell_full(fields, sx, sy + 1, closed) {
        let correction = delta_velocity(fields, x, y + 1, closed) - delta;
        flow_y = (fields.flow_y_prev[idx] + correction).clamp(-limit, limit);
    }

    (flow_x, flow_y)
}

/// One relaxation pass. Divergence must already match the flows being corrected.
pub fn project(
    fields: &mut FieldStore,
    workers: &WorkerPool,
    config: &SimConfig,
) -> Result<(), SimError> {
    fields.swap_flows();

    let cols = fields.cols;
    let rows = fields.rows;
    let mut flow_x = std::mem::take(&mut fields.flow_x);
    let mut flow_y = std::mem::take(&mut fields.flow_y);
    flow_x.fill(0.0);
    flow_y.fill(0.0);

    let result = {
        let view: &FieldStore = fields;
        workers.checkerboard(
            cols,
            rows,
            |x, y| project_cell(view, x, y, config),
            |x, y, (fx, fy)| {
                let idx = y * cols + x;
                flow_x[idx] = fx;
                flow_y[idx] = fy;
            },
        )
    };

    fields.flow_x = flow_x;
    fields.flow_y = flow_y;
    result
}

/// One Jacobi sweep of a pressure estimate. The pipeline never reads it back.
pub fn calculate_pressure(fields: &mut FieldStore) {
    let size = fields.size();
    let old = std::mem::replace(&mut fields.pressure, vec![0.0; size]);
    for y in 0..fields.rows {
        for x in 0..fields.cols {
            let (sx, sy) = (x as isize, y as isize);
            let mut sum = 0.0;
            let mut count = 0;
            for (nx, ny) in [(sx + 1, sy), (sx - 1, sy), (sx, sy + 1), (sx, sy - 1)] {
                if let Some(n) = fields.checked_idx(nx, ny) {
                    sum += old[n];
                    count += 1;
                }
            }
            let idx = fields.idx(x, y);
            if count > 0 {
                fields.pressure[idx] = (sum - fields.divergence[idx]) / count as f32;
            }
        }
    }
}

pub fn pressure_gradient_at_cell(fields: &FieldStore, x: isize, y: isize) -> Vec2 {
    let Some(idx) = fields.checked_idx(x, y) else {
        return Vec2::ZERO;
    };
    let p = fields.pressure[idx];
    let mut gradient = Vec2::ZERO;
    if let Some(n) = fields.checked_idx(x + 1, y) {
        gradient.x += p - fields.pressure[n];
    }
    if let Some(n) = fields.checked_idx(x - 1, y) {
        gradient.x -= p - fields.pressure[n];
    }
    if let Some(n) = fields.checked_idx(x, y + 1) {
        gradient.y += p - fields.pressure[n];
    }
    if let Some(n) = fields.checked_idx(x, y - 1) {
        gradient.y -= p - fields.pressure[n];
    }
    gradient
}

/// Pressure gradient at a continuous position, bilinear over the four nearest cells.
pub fn pressure_gradient_at(fields: &FieldStore, x: f32, y: f32) -> Vec2 {
    let (x0, x1) = (x.floor() as isize, x.ceil() as isize);
    let (y0, y1) = (y.floor() as isize, y.ceil() as isize);
    let tl = pressure_gradient_at_cell(fields, x0, y1);
    let tr = pressure_gradient_at_cell(fields, x1, y1);
    let bl = pressure_gradient_at_cell(fields, x0, y0);
    let br = pressure_gradient_at_cell(fields, x1, y0);
    let tx = x - x.floor();
    let ty = y - y.floor();
    Vec2::new(
        two_dimension_lerp(tl.x, tr.x, bl.x, br.x, tx, ty),
        two_dimension_lerp(tl.y, tr.y, bl.y, br.y, tx, ty),
    )
}
