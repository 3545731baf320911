use glam::Vec3;
use gridflow::{SceneDescriptor, SimConfig, Simulation};

fn simulation(cols: usize, rows: usize) -> Simulation {
    let scene = SceneDescriptor::new("conservation", cols, rows, Vec::new());
    Simulation::with_config(scene, SimConfig::seeded(7)).expect("simulation")
}

#[test]
fn test_diffuse_conserves_color_away_from_walls() {
    let mut sim = simulation(11, 11);
    let center = 5 * 11 + 5;
    sim.fields_mut().color[center] = Vec3::new(100.0, 40.0, 0.0);

    let before: f32 = sim.colors().iter().map(|c| c.x).sum();
    sim.diffuse();
    let after: f32 = sim.colors().iter().map(|c| c.x).sum();

    println!("Red before {:.6}, after {:.6}", before, after);
    assert!((before - after).abs() < 1e-3, "diffusion changed red mass: {} -> {}", before, after);

    // The spike keeps most of its value and hands the rest to its eight neighbours.
    assert!((sim.colors()[center].x - 80.0).abs() < 1e-3);
    assert!((sim.colors()[center + 1].x - 2.5).abs() < 1e-3);
    assert!((sim.colors()[center - 12].x - 2.5).abs() < 1e-3);
}

#[test]
fn test_diffuse_conserves_each_channel_for_interior_pattern() {
    let mut sim = simulation(12, 12);
    for y in 4..8 {
        for x in 4..8 {
            let idx = y * 12 + x;
            sim.fields_mut().color[idx] = Vec3::new((x * 10) as f32, (y * 5) as f32, 1.0);
        }
    }

    let before = sim.colors().iter().copied().sum::<Vec3>();
    for _ in 0..3 {
        sim.diffuse();
    }
    let after = sim.colors().iter().copied().sum::<Vec3>();

    assert!((before - after).abs().max_element() < 1e-2, "{:?} -> {:?}", before, after);
}

#[test]
fn test_diffuse_spreads_flow() {
    let mut sim = simulation(9, 9);
    let idx = 4 * 9 + 4;
    sim.fields_mut().flow_x[idx] = 1.0;
    sim.diffuse();

    assert!((sim.flow_x()[idx] - 0.8).abs() < 1e-6);
    assert!((sim.flow_x()[idx + 1] - 0.025).abs() < 1e-6);
    assert_eq!(sim.flow_x()[0], 0.0);
}

#[test]
fn test_diffuse_leaves_border_edges_empty() {
    let mut sim = simulation(5, 5);
    let fields = sim.fields_mut();
    fields.flow_x.fill(1.0);
    fields.flow_y.fill(1.0);
    sim.diffuse();
    for y in 0..5 {
        assert_eq!(sim.flow_x()[y * 5 + 4], 0.0);
    }
    for x in 0..5 {
        assert_eq!(sim.flow_y()[4 * 5 + x], 0.0);
    }
}
