use glam::{Vec2, Vec3};
use gridflow::advection::{compute_summed_flows, velocity_at};
use gridflow::{AdvectionStencil, FieldStore, SceneDescriptor, SimConfig, Simulation, two_dimension_lerp};

#[test]
fn test_lerp_of_equal_corners_is_constant() {
    for &v in &[-3.5f32, 0.0, 1.0, 255.0] {
        for i in 0..=10 {
            for j in 0..=10 {
                let (tx, ty) = (i as f32 / 10.0, j as f32 / 10.0);
                let result = two_dimension_lerp(v, v, v, v, tx, ty);
                assert!((result - v).abs() < 1e-4, "lerp({v}) at ({tx}, {ty}) = {result}");
            }
        }
    }
}

#[test]
fn test_lerp_corners_are_exact() {
    let (tl, tr, bl, br) = (1.0, 2.0, 3.0, 4.0);
    assert_eq!(two_dimension_lerp(tl, tr, bl, br, 0.0, 0.0), bl);
    assert_eq!(two_dimension_lerp(tl, tr, bl, br, 1.0, 0.0), br);
    assert_eq!(two_dimension_lerp(tl, tr, bl, br, 0.0, 1.0), tl);
    assert_eq!(two_dimension_lerp(tl, tr, bl, br, 1.0, 1.0), tr);
    assert_eq!(two_dimension_lerp(tl, tr, bl, br, 0.5, 0.5), 2.5);
}

#[test]
fn test_stencil_from_fractional_direction() {
    let stencil = AdvectionStencil::from_direction(1, 1, Vec2::new(0.5, -0.5));
    assert_eq!(stencil.tl, (1, 0));
    assert_eq!(stencil.tr, (2, 0));
    assert_eq!(stencil.bl, (1, 1));
    assert_eq!(stencil.br, (2, 1));
    assert!((stencil.tx - 0.5).abs() < 1e-6);
    assert!((stencil.ty - 0.5).abs() < 1e-6);
}

#[test]
fn test_stencil_for_zero_direction_collapses_onto_cell() {
    let stencil = AdvectionStencil::from_direction(4, 2, Vec2::ZERO);
    assert!(stencil.corners().iter().all(|&c| c == (4, 2)));
    assert_eq!((stencil.tx, stencil.ty), (0.0, 0.0));
}

#[test]
fn test_color_advection_without_flow_is_identity() {
    let scene = SceneDescriptor::new("identity", 3, 3, Vec::new());
    let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");
    sim.fields_mut().color[1 * 3 + 1] = Vec3::new(255.0, 0.0, 0.0);
    let before = sim.colors().to_vec();

    sim.advect_color();

    assert_eq!(sim.colors(), before.as_slice());
}

#[test]
fn test_color_advection_follows_flow() {
    let scene = SceneDescriptor::new("moving", 5, 1, Vec::new());
    let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");
    sim.fields_mut().color[1] = Vec3::new(90.0, 0.0, 0.0);
    sim.fields_mut().flow_x[1] = 1.0;
    sim.fields_mut().flow_x[2] = 1.0;

    sim.advect_color();

    // Cell 2 averages to a unit flow to the right and pulls from cell 1.
    assert!((sim.colors()[2].x - 90.0).abs() < 1e-4, "{:?}", sim.colors());
}

#[test]
fn test_velocity_at_reads_outflows() {
    let mut fields = FieldStore::new(3, 3, Vec3::ZERO);
    fields.flow_x[1 * 3 + 1] = 1.0;
    compute_summed_flows(&mut fields);

    assert_eq!(fields.summed_outflow[1 * 3 + 1], Vec2::new(-1.0, 0.0));
    assert_eq!(fields.summed_outflow[1 * 3 + 2], Vec2::ZERO);
    assert_eq!(fields.summed_flow[1 * 3 + 1], Vec2::new(-0.5, 0.0));
    assert_eq!(velocity_at(&fields, 1.0, 1.0), Vec2::new(1.0, 0.0));
}

#[test]
fn test_velocity_at_outside_grid_is_zero() {
    let mut fields = FieldStore::new(4, 4, Vec3::ZERO);
    fields.flow_x.fill(1.0);
    compute_summed_flows(&mut fields);
    assert_eq!(velocity_at(&fields, -5.0, -5.0), Vec2::ZERO);
    assert_eq!(velocity_at(&fields, 40.0, 2.0), Vec2::ZERO);
}

#[test]
fn test_velocity_advection_without_flow_stays_still() {
    let scene = SceneDescriptor::new("still", 6, 6, Vec::new());
    let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");
    sim.advect_velocities();
    assert!(sim.flow_x().iter().chain(sim.flow_y()).all(|&v| v == 0.0));
}

#[test]
fn test_velocity_advection_never_writes_border_edges() {
    let scene = SceneDescriptor::new("border", 6, 5, Vec::new());
    let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");
    for idx in 0..30 {
        let (x, y) = (idx % 6, idx / 6);
        if x < 5 {
            sim.fields_mut().flow_x[idx] = ((idx % 5) as f32 - 2.0) * 0.7;
        }
        if y < 4 {
            sim.fields_mut().flow_y[idx] = ((idx % 3) as f32 - 1.0) * 0.9;
        }
    }

    sim.advect_velocities();

    for y in 0..5 {
        assert_eq!(sim.flow_x()[y * 6 + 5], 0.0);
    }
    for x in 0..6 {
        assert_eq!(sim.flow_y()[4 * 6 + x], 0.0);
    }
}

#[test]
fn test_velocity_advection_splits_over_owned_edges() {
    let scene = SceneDescriptor::new("split", 5, 1, Vec::new());
    let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");
    sim.fields_mut().flow_x[1] = 1.0;

    sim.advect_velocities();

    // Cells 1 and 2 each pull half a unit and share it between their two edges.
    let expected = [0.25, 0.5, 0.25, 0.0, 0.0];
    for (i, (&got, want)) in sim.flow_x().iter().zip(expected).enumerate() {
        assert!((got - want).abs() < 1e-6, "flow_x[{i}] = {got}, expected {want}");
    }
    assert!(sim.flow_y().iter().all(|&v| v == 0.0));
}
