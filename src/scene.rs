use crate::error::SimError;
use crate::inflow::{InflowBehavior, InflowSource};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to (re)start a simulation: size, background color and
/// the inflow sources ticked each step in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub name: String,
    pub cols: usize,
    pub rows: usize,
    #[serde(default)]
    pub pre_warm_color: Vec3,
    #[serde(default)]
    pub inflows: Vec<InflowSource>,
    /// Cells classified OBSTACLE before neighbour counts are built.
    #[serde(default)]
    pub obstacles: Vec<[usize; 2]>,
}

impl SceneDescriptor {
    pub fn new(name: &str, cols: usize, rows: usize, inflows: Vec<InflowSource>) -> Self {
        Self {
            name: name.to_string(),
            cols,
            rows,
            pre_warm_color: Vec3::ZERO,
            inflows,
            obstacles: Vec::new(),
        }
    }

    pub fn with_pre_warm(mut self, color: Vec3) -> Self {
        self.pre_warm_color = color;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let scene: Self = serde_json::from_str(json)?;
        if scene.cols == 0 || scene.rows == 0 {
            return Err(SimError::EmptyScene {
                cols: scene.cols,
                rows: scene.rows,
            });
        }
        if let Some(index) = scene
            .inflows
            .iter()
            .position(|source| !source.behavior.has_valid_period())
        {
            return Err(SimError::InvalidPeriod { index });
        }
        Ok(scene)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn by_name(name: &str) -> Result<Self, SimError> {
        presets()
            .into_iter()
            .find(|scene| scene.name == name)
            .ok_or_else(|| SimError::UnknownScene(name.to_string()))
    }

    // ---- presets ----

    pub fn waterfall() -> Self {
        let blue = Vec3::new(28.0, 163.0, 235.0);
        let inflows = (30..=40)
            .map(|x| InflowSource::new(x, 30, Vec2::new(0.0, 10.0), blue, true))
            .collect();
        Self::new("waterfall", 70, 70, inflows)
    }

    pub fn vortex() -> Self {
        let white = Vec3::splat(255.0);
        Self::new(
            "vortex",
            60,
            60,
            vec![
                InflowSource::new(30, 10, Vec2::new(10.0, 0.0), white, true),
                InflowSource::new(10, 30, Vec2::new(0.0, -10.0), Vec3::ZERO, false),
                InflowSource::new(30, 50, Vec2::new(-10.0, 0.0), white, true),
                InflowSource::new(50, 30, Vec2::new(0.0, 10.0), Vec3::ZERO, false),
            ],
        )
    }

    pub fn color_mixing() -> Self {
        let red = Vec3::new(255.0, 0.0, 0.0);
        let green = Vec3::new(0.0, 255.0, 0.0);
        Self::new(
            "color_mixing",
            20,
            30,
            vec![
                InflowSource::new(10, 3, Vec2::new(0.0, 10.0), red, false).with_behavior(
                    InflowBehavior::AlternateColor {
                        period: 70,
                        split: 35,
                        first: red,
                        second: green,
                    },
                ),
            ],
        )
    }

    pub fn clash() -> Self {
        Self::new(
            "clash",
            40,
            20,
            vec![
                InflowSource::new(10, 10, Vec2::new(10.0, 0.0), Vec3::new(255.0, 127.0, 0.0), true),
                InflowSource::new(30, 10, Vec2::new(-10.0, 0.0), Vec3::new(0.0, 127.0, 255.0), true),
            ],
        )
    }

    pub fn moving_inflow() -> Self {
        Self::new(
            "moving_inflow",
            60,
            30,
            vec![
                InflowSource::new(10, 10, Vec2::new(0.0, 10.0), Vec3::new(3.0, 252.0, 248.0), true)
                    .with_behavior(InflowBehavior::Sweep {
                        center: 30.0,
                        amplitude: 20.0,
                        period: 40.0,
                    }),
                InflowSource::new(10, 20, Vec2::new(0.0, -10.0), Vec3::new(252.0, 3.0, 115.0), true)
                    .with_behavior(InflowBehavior::Sweep {
                        center: 30.0,
                        amplitude: -20.0,
                        period: 40.0,
                    }),
            ],
        )
    }

    pub fn color_splashes() -> Self {
        let inflows = [0, 35, 20, 15, 40]
            .into_iter()
            .map(|offset| {
                InflowSource::new(1, 1, Vec2::ZERO, Vec3::splat(255.0), true).with_behavior(
                    InflowBehavior::RandomSplash {
                        period: 50,
                        offset,
                        margin: 2.0,
                        extent: 55.0,
                    },
                )
            })
            .collect();
        Self::new("color_splashes", 60, 60, inflows)
    }

    pub fn shoot_mouse() -> Self {
        Self::new(
            "shoot_mouse",
            50,
            50,
            vec![
                InflowSource::new(25, 25, Vec2::ZERO, Vec3::new(180.0, 235.0, 28.0), true)
                    .with_behavior(InflowBehavior::AimAtPointer { gain: 1.0 }),
            ],
        )
        .with_pre_warm(Vec3::new(12.0, 24.0, 2.0))
    }

    pub fn multi_shoot_mouse() -> Self {
        let aim = InflowBehavior::AimAtPointer { gain: 0.5 };
        Self::new(
            "multi_shoot_mouse",
            40,
            40,
            vec![
                InflowSource::new(8, 20, Vec2::new(0.0, 1.0), Vec3::new(0.0, 0.0, 255.0), true)
                    .with_behavior(aim),
                InflowSource::new(20, 20, Vec2::new(0.0, 1.0), Vec3::new(0.0, 255.0, 0.0), true)
                    .with_behavior(aim),
                InflowSource::new(32, 20, Vec2::new(0.0, 1.0), Vec3::new(255.0, 0.0, 0.0), true)
                    .with_behavior(aim),
            ],
        )
    }

    pub fn shoot_circle() -> Self {
        Self::new(
            "shoot_circle",
            60,
            60,
            vec![
                InflowSource::new(10, 3, Vec2::new(0.0, 10.0), Vec3::new(252.0, 88.0, 0.0), false)
                    .with_behavior(InflowBehavior::Orbit {
                        center: Vec2::splat(30.0),
                        radius: 25.0,
                        period: 40.0,
                    }),
                InflowSource::new(10, 3, Vec2::new(0.0, 10.0), Vec3::new(0.0, 109.0, 252.0), false)
                    .with_behavior(InflowBehavior::Orbit {
                        center: Vec2::splat(30.0),
                        radius: -25.0,
                        period: 40.0,
                    }),
            ],
        )
    }
}

/// Built-in scenes in viewer order.
pub fn presets() -> Vec<SceneDescriptor> {
    vec![
        SceneDescriptor::waterfall(),
        SceneDescriptor::vortex(),
        SceneDescriptor::color_mixing(),
        SceneDescriptor::clash(),
        SceneDescriptor::moving_inflow(),
        SceneDescriptor::color_splashes(),
        SceneDescriptor::shoot_mouse(),
        SceneDescriptor::multi_shoot_mouse(),
        SceneDescriptor::shoot_circle(),
    ]
}
