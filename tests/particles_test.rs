use glam::Vec2;
use gridflow::{Particle, ParticlePool};
use rand::SeedableRng;
use rand::rngs::StdRng;

const LIFETIME: i32 = 1000;
const DECAY: i32 = 20;

fn pool(cols: usize, rows: usize) -> (ParticlePool, StdRng) {
    let mut rng = StdRng::seed_from_u64(17);
    let pool = ParticlePool::new(cols, rows, LIFETIME, &mut rng);
    (pool, rng)
}

#[test]
fn test_pool_has_one_particle_per_cell() {
    let (pool, _) = pool(12, 7);
    assert_eq!(pool.len(), 84);
    for p in pool.iter() {
        assert!(p.position.x >= 0.0 && p.position.x <= 11.0);
        assert!(p.position.y >= 0.0 && p.position.y <= 6.0);
        assert!((0..LIFETIME).contains(&p.lifetime));
    }
}

#[test]
fn test_expired_particle_respawns_in_place() {
    let (mut pool, mut rng) = pool(10, 10);
    pool.particles[0] = Particle::new(Vec2::new(3.0, 3.0), 0);

    pool.advance(|_| Vec2::new(100.0, 100.0), LIFETIME, DECAY, &mut rng);

    let respawned = pool.particles[0];
    assert_eq!(respawned.lifetime, LIFETIME);
    assert_eq!(respawned.velocity, Vec2::ZERO, "not moved on the respawn step");
    assert!(respawned.position.x >= 0.0 && respawned.position.x < 10.0);
    assert!(respawned.position.y >= 0.0 && respawned.position.y < 10.0);
    assert_eq!(respawned.position, respawned.position.floor());
}

#[test]
fn test_still_fluid_only_ages_particles() {
    let (mut pool, mut rng) = pool(6, 6);
    for p in pool.particles.iter_mut() {
        p.lifetime = 100;
    }
    let before: Vec<Vec2> = pool.iter().map(|p| p.position).collect();

    pool.advance(|_| Vec2::ZERO, LIFETIME, DECAY, &mut rng);

    for (p, old) in pool.iter().zip(before) {
        assert_eq!(p.position, old);
        assert_eq!(p.lifetime, 80);
    }
}

#[test]
fn test_particles_follow_velocity_and_stay_in_grid() {
    let (mut pool, mut rng) = pool(8, 5);
    pool.particles[0] = Particle::new(Vec2::new(2.0, 2.0), 500);
    pool.particles[1] = Particle::new(Vec2::new(6.0, 1.0), 500);

    pool.advance(
        |p| if p.x < 5.0 { Vec2::new(0.5, -0.25) } else { Vec2::new(40.0, -40.0) },
        LIFETIME,
        DECAY,
        &mut rng,
    );

    assert_eq!(pool.particles[0].position, Vec2::new(2.5, 1.75));
    assert_eq!(pool.particles[0].velocity, Vec2::new(0.5, -0.25));
    assert_eq!(pool.particles[1].position, Vec2::new(7.0, 0.0));
    assert_eq!(pool.len(), 40);
}

#[test]
fn test_pool_size_never_changes() {
    let (mut pool, mut rng) = pool(9, 4);
    for _ in 0..200 {
        pool.advance(|p| Vec2::new(p.y.sin(), p.x.cos()), LIFETIME, DECAY, &mut rng);
        assert_eq!(pool.len(), 36);
    }
    assert!(pool.iter().all(|p| p.lifetime <= LIFETIME));
}

#[test]
fn test_particle_size_peaks_mid_life() {
    assert_eq!(Particle::new(Vec2::ZERO, 500).size(10, LIFETIME), 10);
    assert_eq!(Particle::new(Vec2::ZERO, 0).size(10, LIFETIME), 5);
    assert_eq!(Particle::new(Vec2::ZERO, 1000).size(10, LIFETIME), 5);
    assert_eq!(Particle::new(Vec2::ZERO, 250).size(10, LIFETIME), 7);
}

#[test]
fn test_particle_size_follows_configured_lifetime() {
    assert_eq!(Particle::new(Vec2::ZERO, 100).size(10, 200), 10);
    assert_eq!(Particle::new(Vec2::ZERO, 200).size(10, 200), 5);
    assert_eq!(Particle::new(Vec2::ZERO, 0).size(10, 200), 5);
    assert_eq!(Particle::new(Vec2::ZERO, 2500).size(8, 5000), 8);
}
