//! Particle burst generators
//!
//! Short-lived decorative entities emitted on hits, deaths and muzzle
//! flashes. Particles never feed back into the simulation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::unit_from_angle;

use super::state::Particle;

/// Small radial burst: evenly spread directions with random jitter.
/// Used for projectile impacts, enemy deaths and muzzle flashes.
pub fn impact_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
) {
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32 + rng.random_range(0.0..0.5f32);
        let speed = rng.random_range(100.0..300.0f32);
        particles.push(Particle {
            pos,
            vel: unit_from_angle(angle) * speed,
            life: 1.0,
            max_life: 1.0,
            color,
            size: rng.random_range(3.0..8.0f32),
        });
    }
}

/// Number of particles in the outer ring of the death burst
const SHATTER_RING_COUNT: usize = 30;
/// Number of slower inner particles
const SHATTER_INNER_COUNT: usize = 20;

/// Large two-ring burst marking the player's death: a fast evenly-spaced
/// outer ring plus a slower scattered inner cloud.
pub fn shatter_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, pos: Vec2) {
    for i in 0..SHATTER_RING_COUNT {
        let angle = TAU * i as f32 / SHATTER_RING_COUNT as f32;
        let speed = rng.random_range(200.0..500.0f32);
        particles.push(Particle {
            pos,
            vel: unit_from_angle(angle) * speed,
            life: 1.0,
            max_life: 1.0,
            color: 0x000000,
            size: rng.random_range(5.0..15.0f32),
        });
    }

    for _ in 0..SHATTER_INNER_COUNT {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(50.0..200.0f32);
        particles.push(Particle {
            pos,
            vel: unit_from_angle(angle) * speed,
            life: 1.0,
            max_life: 1.0,
            color: 0x666666,
            size: rng.random_range(3.0..10.0f32),
        });
    }
}

/// Total particle count of a single shatter burst
pub const SHATTER_PARTICLES: usize = SHATTER_RING_COUNT + SHATTER_INNER_COUNT;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_impact_burst_count_and_life() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        impact_burst(&mut particles, &mut rng, Vec2::ZERO, 0xFF0000, 8);
        assert_eq!(particles.len(), 8);
        assert!(particles.iter().all(|p| p.life == 1.0 && p.color == 0xFF0000));
    }

    #[test]
    fn test_shatter_burst_is_two_rings() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        shatter_burst(&mut particles, &mut rng, Vec2::new(10.0, -5.0));
        assert_eq!(particles.len(), SHATTER_PARTICLES);
        let ring = particles
            .iter()
            .filter(|p| p.color == 0x000000)
            .count();
        assert_eq!(ring, SHATTER_RING_COUNT);
        assert!(particles.iter().all(|p| p.pos == Vec2::new(10.0, -5.0)));
    }
}
