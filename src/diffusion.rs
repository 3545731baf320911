use crate::fields::{CellType, FieldStore};
use glam::Vec3;

/// Blends every cell's flow and color with its in-grid DEFAULT neighbours.
///
/// Reads only the previous buffers, so the result does not depend on visiting order.
pub fn diffuse(fields: &mut FieldStore, velocity_coefficient: f32, color_coefficient: f32) {
    fields.swap_flows();
    fields.swap_colors();

    let velocity_spread = 1.0 - velocity_coefficient;
    let color_spread = 1.0 - color_coefficient;

    for y in 0..fields.rows {
        for x in 0..fields.cols {
            let idx = fields.idx(x, y);
            let mut flow_x = fields.flow_x_prev[idx] * velocity_coefficient;
            let mut flow_y = fields.flow_y_prev[idx] * velocity_coefficient;
            let mut color = fields.color_prev[idx] * color_coefficient;

            let count = fields.neighbours[idx];
            if count > 0 {
                let count = count as f32;
                let mut neighbour_flow_x = 0.0;
                let mut neighbour_flow_y = 0.0;
                let mut neighbour_color = Vec3::ZERO;

                for dy in -1..=1isize {
                    for dx in -1..=1isize {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let Some(n) = fields.checked_idx(x as isize + dx, y as isize + dy) else {
                            continue;
                        };
                        if fields.cell_types[n] != CellType::Default {
                            continue;
                        }
                        neighbour_flow_x += fields.flow_x_prev[n];
                        neighbour_flow_y += fields.flow_y_prev[n];
                        neighbour_color += fields.color_prev[n];
                    }
                }

                flow_x += neighbour_flow_x * velocity_spread / count;
                flow_y += neighbour_flow_y * velocity_spread / count;
                color += neighbour_color * color_spread / count;
            }

            fields.flow_x[idx] = flow_x;
            fields.flow_y[idx] = flow_y;
            fields.color[idx] = color;
        }
    }

    fields.clear_border_edges();
}
