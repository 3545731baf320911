use crate::fields::FieldStore;
use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-tick rule a source runs on itself before it injects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InflowBehavior {
    #[default]
    Static,
    /// Points the source at the pointer: `direction = (pointer - position) * gain`.
    AimAtPointer { gain: f32 },
    /// Slides the source horizontally: `x = sin(tick / period) * amplitude + center`.
    Sweep {
        center: f32,
        amplitude: f32,
        period: f32,
    },
    /// `first` while `tick % period > split`, `second` otherwise.
    AlternateColor {
        period: u64,
        split: u64,
        first: Vec3,
        second: Vec3,
    },
    /// Jumps to a random spot with a random bright color and direction on
    /// tick 1 and whenever `tick % period == offset`.
    RandomSplash {
        period: u64,
        offset: u64,
        margin: f32,
        extent: f32,
    },
    /// Circles `center` and always shoots back towards it.
    Orbit {
        center: Vec2,
        radius: f32,
        period: f32,
    },
}

impl InflowBehavior {
    /// Zero periods would make the tick arithmetic meaningless.
    pub fn has_valid_period(&self) -> bool {
        match *self {
            InflowBehavior::AlternateColor { period, .. }
            | InflowBehavior::RandomSplash { period, .. } => period > 0,
            InflowBehavior::Sweep { period, .. } | InflowBehavior::Orbit { period, .. } => {
                period != 0.0 && period.is_finite()
            }
            InflowBehavior::Static | InflowBehavior::AimAtPointer { .. } => true,
        }
    }

    pub fn apply(&self, source: &mut InflowSource, pointer: Vec2, rng: &mut impl Rng) {
        let tick = source.tick;
        match *self {
            InflowBehavior::Static => {}
            InflowBehavior::AimAtPointer { gain } => {
                source.direction = (pointer - source.position()) * gain;
            }
            InflowBehavior::Sweep {
                center,
                amplitude,
                period,
            } => {
                source.x = ((tick as f32 / period).sin() * amplitude + center) as i32;
            }
            InflowBehavior::AlternateColor {
                period,
                split,
                first,
                second,
            } => {
                let Some(phase) = tick.checked_rem(period) else {
                    return;
                };
                source.color = if phase > split { first } else { second };
            }
            InflowBehavior::RandomSplash {
                period,
                offset,
                margin,
                extent,
            } => {
                if tick == 1 || tick.checked_rem(period) == Some(offset) {
                    source.x = (rng.gen_range(0.0..1.0f32) * extent + margin) as i32;
                    source.y = (rng.gen_range(0.0..1.0f32) * extent + margin) as i32;
                    source.color = Vec3::new(
                        rng.gen_range(0.0..1.0f32) * 100.0 + 155.0,
                        rng.gen_range(0.0..1.0f32) * 100.0 + 155.0,
                        rng.gen_range(0.0..1.0f32) * 100.0 + 155.0,
                    );
                    source.direction = Vec2::new(
                        rng.gen_range(0.0..1.0f32) * 20.0 - 10.0,
                        rng.gen_range(0.0..1.0f32) * 20.0 - 10.0,
                    );
                }
            }
            InflowBehavior::Orbit {
                center,
                radius,
                period,
            } => {
                let angle = tick as f32 / period;
                let offset = Vec2::new(angle.sin(), angle.cos()) * radius;
                let position = center + offset;
                source.x = position.x as i32;
                source.y = position.y as i32;
                source.direction = -offset;
            }
        }
    }
}

/// A scripted source of dye and momentum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflowSource {
    pub x: i32,
    pub y: i32,
    pub direction: Vec2,
    pub color: Vec3,
    #[serde(default)]
    pub noise: bool,
    #[serde(default)]
    pub behavior: InflowBehavior,
    #[serde(skip)]
    pub tick: u64,
}

impl InflowSource {
    pub fn new(x: i32, y: i32, direction: Vec2, color: Vec3, noise: bool) -> Self {
        Self {
            x,
            y,
            direction,
            color,
            noise,
            behavior: InflowBehavior::Static,
            tick: 0,
        }
    }

    pub fn with_behavior(mut self, behavior: InflowBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Advances the tick counter and runs the mutation rule.
    pub fn tick(&mut self, pointer: Vec2, rng: &mut impl Rng) {
        self.tick += 1;
        let behavior = self.behavior;
        behavior.apply(self, pointer, rng);
    }
}

/// Scales all three channels by one shared factor in `[0.5, 1.0)`.
pub fn randomize_color(color: Vec3, rng: &mut impl Rng) -> Vec3 {
    let noise = rng.gen_range(0.0..1.0f32) / 2.0 + 0.5;
    color * noise
}

/// Overwrites the color of cell `(x, y)` and the outgoing edge picked by each
/// direction component with half of that component.
///
/// A positive component writes the cell's own right/down edge, a negative one
/// the edge coming in from the left/top neighbour. Edges that would leave the
/// grid, and positions outside it, are skipped.
pub fn add_inflow(
    fields: &mut FieldStore,
    x: i32,
    y: i32,
    color: Vec3,
    direction: Vec2,
    noise: bool,
    color_threshold: f32,
    rng: &mut impl Rng,
) {
    let Some(idx) = fields.checked_idx(x as isize, y as isize) else {
        return;
    };
    let (x, y) = (x as usize, y as usize);

    if color.x + color.y + color.z > color_threshold {
        fields.color[idx] = if noise {
            randomize_color(color, rng)
        } else {
            color
        };
    }

    if direction.x > 0.0 && x + 1 < fields.cols {
        fields.flow_x[idx] = direction.x / 2.0;
    } else if direction.x < 0.0 && x > 0 {
        fields.flow_x[idx - 1] = direction.x / 2.0;
    }

    if direction.y > 0.0 && y + 1 < fields.rows {
        fields.flow_y[idx] = direction.y / 2.0;
    } else if direction.y < 0.0 && y > 0 {
        fields.flow_y[idx - fields.cols] = direction.y / 2.0;
    }
}

/// Sets the edge between two adjacent cells, pointing from `a` to `b`.
///
/// `magnitude` supplies the strength per axis; with `randomized` each edge
/// gets a uniform fraction of it. Out-of-grid cells make this a no-op.
pub fn add_directional_force(
    fields: &mut FieldStore,
    a: (i32, i32),
    b: (i32, i32),
    magnitude: Vec2,
    randomized: bool,
    rng: &mut impl Rng,
) {
    let (Some(idx_a), Some(idx_b)) = (
        fields.checked_idx(a.0 as isize, a.1 as isize),
        fields.checked_idx(b.0 as isize, b.1 as isize),
    ) else {
        return;
    };

    let mut strength = |m: f32| {
        let m = m.abs();
        if randomized { rng.gen_range(0.0..1.0f32) * m } else { m }
    };

    if a.0 < b.0 {
        fields.flow_x[idx_a] = strength(magnitude.x);
    }
    if b.0 < a.0 {
        fields.flow_x[idx_b] = -strength(magnitude.x);
    }
    if a.1 < b.1 {
        fields.flow_y[idx_a] = strength(magnitude.y);
    }
    if b.1 < a.1 {
        fields.flow_y[idx_b] = -strength(magnitude.y);
    }
}
