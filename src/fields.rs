use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Default,
    Inflow,
    Obstacle,
}

/// Every per-cell array of one simulation, stored row-major (`y * cols + x`).
///
/// `flow_x[i]` is the flow from cell `i` into its right neighbour and
/// `flow_y[i]` the flow into the cell below. The last column never carries a
/// horizontal edge and the last row never carries a vertical one.
#[derive(Debug, Clone)]
pub struct FieldStore {
    pub cols: usize,
    pub rows: usize,
    pub flow_x: Vec<f32>,
    pub flow_y: Vec<f32>,
    pub flow_x_prev: Vec<f32>,
    pub flow_y_prev: Vec<f32>,
    pub color: Vec<Vec3>,
    pub color_prev: Vec<Vec3>,
    pub divergence: Vec<f32>,
    pub pressure: Vec<f32>,
    pub summed_flow: Vec<Vec2>,
    pub summed_outflow: Vec<Vec2>,
    pub cell_types: Vec<CellType>,
    pub neighbours: Vec<u8>,
}

impl FieldStore {
    pub fn new(cols: usize, rows: usize, pre_warm: Vec3) -> Self {
        let size = cols * rows;
        let mut fields = Self {
            cols,
            rows,
            flow_x: vec![0.0; size],
            flow_y: vec![0.0; size],
            flow_x_prev: vec![0.0; size],
            flow_y_prev: vec![0.0; size],
            color: vec![pre_warm; size],
            color_prev: vec![pre_warm; size],
            divergence: vec![0.0; size],
            pressure: vec![0.0; size],
            summed_flow: vec![Vec2::ZERO; size],
            summed_outflow: vec![Vec2::ZERO; size],
            cell_types: vec![CellType::Default; size],
            neighbours: vec![0; size],
        };
        fields.refresh_neighbour_counts();
        fields
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.cols && y < self.rows);
        y * self.cols + x
    }

    #[inline]
    pub fn in_grid(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Index of a signed coordinate, or `None` outside the grid.
    #[inline]
    pub fn checked_idx(&self, x: isize, y: isize) -> Option<usize> {
        self.in_grid(x, y).then(|| y as usize * self.cols + x as usize)
    }

    pub fn cell_type(&self, x: usize, y: usize) -> CellType {
        self.cell_types[self.idx(x, y)]
    }

    /// Reclassifies a cell. Neighbour counts are left as they were; call
    /// [`refresh_neighbour_counts`](Self::refresh_neighbour_counts) to rebuild them.
    pub fn set_cell_type(&mut self, x: usize, y: usize, cell_type: CellType) {
        if x < self.cols && y < self.rows {
            let idx = self.idx(x, y);
            self.cell_types[idx] = cell_type;
        }
    }

    /// Count of in-grid DEFAULT cells among the eight surrounding ones.
    pub fn neighbour_count(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(n) = self.checked_idx(x as isize + dx, y as isize + dy) {
                    if self.cell_types[n] == CellType::Default {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    pub fn refresh_neighbour_counts(&mut self) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let idx = self.idx(x, y);
                self.neighbours[idx] = self.neighbour_count(x, y);
            }
        }
    }

    /// Zeroes the edges that would point out of the grid.
    pub fn clear_border_edges(&mut self) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        for y in 0..self.rows {
            let idx = self.idx(self.cols - 1, y);
            self.flow_x[idx] = 0.0;
        }
        for x in 0..self.cols {
            let idx = self.idx(x, self.rows - 1);
            self.flow_y[idx] = 0.0;
        }
    }

    pub fn swap_flows(&mut self) {
        std::mem::swap(&mut self.flow_x, &mut self.flow_x_prev);
        std::mem::swap(&mut self.flow_y, &mut self.flow_y_prev);
    }

    pub fn swap_colors(&mut self) {
        std::mem::swap(&mut self.color, &mut self.color_prev);
    }

    pub fn max_flow(&self) -> f32 {
        self.flow_x
            .iter()
            .chain(&self.flow_y)
            .fold(0.0f32, |acc, v| acc.max(v.abs()))
    }
}
