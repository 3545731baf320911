use crate::fields::FieldStore;
use glam::{Vec2, Vec3};

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    t * b + (1.0 - t) * a
}

/// Bilinear blend of four corners: horizontal first, then vertical with `ty`
/// running from the bottom pair (0) to the top pair (1).
#[inline]
pub fn two_dimension_lerp(tl: f32, tr: f32, bl: f32, br: f32, tx: f32, ty: f32) -> f32 {
    let top = lerp(tl, tr, tx);
    let bottom = lerp(bl, br, tx);
    lerp(bottom, top, ty)
}

/// The 2x2 footprint a cell samples from, plus the blend factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvectionStencil {
    pub tl: (isize, isize),
    pub tr: (isize, isize),
    pub bl: (isize, isize),
    pub br: (isize, isize),
    pub tx: f32,
    pub ty: f32,
}

impl AdvectionStencil {
    /// Footprint reached from cell `(x, y)` by moving along `dir`.
    pub fn from_direction(x: usize, y: usize, dir: Vec2) -> Self {
        let (x, y) = (x as isize, y as isize);
        let left = x + dir.x.floor() as isize;
        let right = x + dir.x.ceil() as isize;
        let top = y + dir.y.floor() as isize;
        let bottom = y + dir.y.ceil() as isize;

        let tx = (x as f32 + dir.x) - left as f32;
        let ty = ((y as f32 + dir.y) - bottom as f32).abs();

        Self {
            tl: (left, top),
            tr: (right, top),
            bl: (left, bottom),
            br: (right, bottom),
            tx,
            ty,
        }
    }

    /// Footprint around a continuous position, used for point queries.
    pub fn around_point(x: f32, y: f32) -> Self {
        let left = x.floor() as isize;
        let right = x.ceil() as isize;
        let top = y.floor() as isize;
        let bottom = y.ceil() as isize;
        Self {
            tl: (left, top),
            tr: (right, top),
            bl: (left, bottom),
            br: (right, bottom),
            tx: x - x.floor(),
            ty: y - y.floor(),
        }
    }

    pub fn corners(&self) -> [(isize, isize); 4] {
        [self.tl, self.tr, self.bl, self.br]
    }

    fn blend2(&self, [tl, tr, bl, br]: [Vec2; 4]) -> Vec2 {
        Vec2::new(
            two_dimension_lerp(tl.x, tr.x, bl.x, br.x, self.tx, self.ty),
            two_dimension_lerp(tl.y, tr.y, bl.y, br.y, self.tx, self.ty),
        )
    }

    fn blend3(&self, [tl, tr, bl, br]: [Vec3; 4]) -> Vec3 {
        Vec3::new(
            two_dimension_lerp(tl.x, tr.x, bl.x, br.x, self.tx, self.ty),
            two_dimension_lerp(tl.y, tr.y, bl.y, br.y, self.tx, self.ty),
            two_dimension_lerp(tl.z, tr.z, bl.z, br.z, self.tx, self.ty),
        )
    }
}

/// Refreshes `summed_flow` (the negated mean of a cell's four edges) and
/// `summed_outflow` (the negated sum of only the edges leaving it).
pub fn compute_summed_flows(fields: &mut FieldStore) {
    let cols = fields.cols;
    for y in 0..fields.rows {
        for x in 0..cols {
            let idx = fields.idx(x, y);
            let right = fields.flow_x[idx];
            let down = fields.flow_y[idx];
            let left = if x > 0 { fields.flow_x[idx - 1] } else { 0.0 };
            let up = if y > 0 { fields.flow_y[idx - cols] } else { 0.0 };

            fields.summed_flow[idx] = Vec2::new(right + left, down + up) / -2.0;

            let out_x = right.max(0.0) + left.min(0.0);
            let out_y = down.max(0.0) + up.min(0.0);
            fields.summed_outflow[idx] = -Vec2::new(out_x, out_y);
        }
    }
}

fn outflow_or_zero(fields: &FieldStore, (x, y): (isize, isize)) -> Vec2 {
    fields
        .checked_idx(x, y)
        .map_or(Vec2::ZERO, |i| fields.summed_outflow[i])
}

fn color_or_zero(fields: &FieldStore, (x, y): (isize, isize)) -> Vec3 {
    fields
        .checked_idx(x, y)
        .map_or(Vec3::ZERO, |i| fields.color_prev[i])
}

/// Velocity at a continuous grid position, interpolated from the last summed outflows.
pub fn velocity_at(fields: &FieldStore, x: f32, y: f32) -> Vec2 {
    let stencil = AdvectionStencil::around_point(x, y);
    -stencil.blend2(stencil.corners().map(|c| outflow_or_zero(fields, c)))
}

/// Backward advection of the flow field.
///
/// Every cell pulls a velocity from its footprint and splits it over the
/// edges it owns: half to its own edge and half to its predecessor's, or all
/// of it to whichever one exists at the border.
pub fn advect_velocities(fields: &mut FieldStore) {
    compute_summed_flows(fields);

    let cols = fields.cols;
    let rows = fields.rows;
    let mut flow_x = vec![0.0; fields.size()];
    let mut flow_y = vec![0.0; fields.size()];

    for y in 0..rows {
        for x in 0..cols {
            let idx = fields.idx(x, y);
            let stencil = AdvectionStencil::from_direction(x, y, fields.summed_flow[idx]);
            let velocity = -stencil.blend2(stencil.corners().map(|c| outflow_or_zero(fields, c)));

            let has_left = x > 0;
            let has_right = x + 1 < cols;
            match (has_left, has_right) {
                (true, true) => {
                    flow_x[idx - 1] += velocity.x / 2.0;
                    flow_x[idx] += velocity.x / 2.0;
                }
                (true, false) => flow_x[idx - 1] += velocity.x,
                (false, true) => flow_x[idx] += velocity.x,
                (false, false) => {}
            }

            let has_up = y > 0;
            let has_down = y + 1 < rows;
            match (has_up, has_down) {
                (true, true) => {
                    flow_y[idx - cols] += velocity.y / 2.0;
                    flow_y[idx] += velocity.y / 2.0;
                }
                (true, false) => flow_y[idx - cols] += velocity.y,
                (false, true) => flow_y[idx] += velocity.y,
                (false, false) => {}
            }
        }
    }

    fields.flow_x = flow_x;
    fields.flow_y = flow_y;
}

/// Backward advection of the color field. Corners outside the grid count as black.
pub fn advect_color(fields: &mut FieldStore) {
    compute_summed_flows(fields);
    fields.swap_colors();

    for y in 0..fields.rows {
        for x in 0..fields.cols {
            let idx = fields.idx(x, y);
            let stencil = AdvectionStencil::from_direction(x, y, fields.summed_flow[idx]);
            let color = stencil.blend3(stencil.corners().map(|c| color_or_zero(fields, c)));
            fields.color[idx] = color;
        }
    }
}
