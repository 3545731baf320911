use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glam::{Vec2, Vec3};
use gridflow::{SceneDescriptor, SimConfig, Simulation};

fn warmed_up(scene: SceneDescriptor, steps: usize) -> Simulation {
    let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");
    for _ in 0..steps {
        sim.step();
    }
    sim
}

fn benchmark_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    // Test different grid sizes
    for size in [30, 60, 120].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let scene = SceneDescriptor::new("bench", size, size, Vec::new());
            let mut sim = Simulation::with_config(scene, SimConfig::seeded(1)).expect("simulation");

            sim.add_inflow(size as i32 / 2, size as i32 / 2, Vec3::new(255.0, 0.0, 0.0), Vec2::new(10.0, 0.0), false);

            b.iter(|| {
                sim.step();
                black_box(sim.frame);
            });
        });
    }
    group.finish();
}

fn benchmark_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("presets");
    for name in ["waterfall", "vortex", "color_splashes"] {
        group.bench_function(name, |b| {
            let mut sim = warmed_up(SceneDescriptor::by_name(name).expect("preset"), 5);
            b.iter(|| {
                sim.step();
                black_box(sim.fps());
            });
        });
    }
    group.finish();
}

fn benchmark_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("operations");

    group.bench_function("project", |b| {
        let mut sim = warmed_up(SceneDescriptor::vortex(), 5);
        b.iter(|| {
            // One relaxation pass; a step runs this projection_iterations times
            sim.compute_divergence();
            sim.project();
            black_box(sim.flow_x()[0]);
        });
    });

    group.bench_function("diffuse", |b| {
        let mut sim = warmed_up(SceneDescriptor::vortex(), 5);
        b.iter(|| {
            sim.diffuse();
            black_box(sim.colors()[0]);
        });
    });

    group.bench_function("advect_velocities", |b| {
        let mut sim = warmed_up(SceneDescriptor::vortex(), 5);
        b.iter(|| {
            sim.advect_velocities();
            black_box(sim.flow_y()[0]);
        });
    });

    group.bench_function("advect_color", |b| {
        let mut sim = warmed_up(SceneDescriptor::vortex(), 5);
        b.iter(|| {
            sim.advect_color();
            black_box(sim.colors()[0]);
        });
    });

    group.bench_function("advance_particles", |b| {
        let mut sim = warmed_up(SceneDescriptor::vortex(), 5);
        b.iter(|| {
            sim.advance_particles();
            black_box(sim.particles().len());
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_step, benchmark_presets, benchmark_operations);
criterion_main!(benches);
