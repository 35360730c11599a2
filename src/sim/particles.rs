//! Star bursts fired from a net when a shot scores
//!
//! Purely decorative: stars never interact with anything.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::Star;
use crate::consts::*;

/// Spawn a burst of stars at `at` (pixels)
pub fn burst(stars: &mut Vec<Star>, at: Vec2, now: f64, rng: &mut impl Rng) {
    stars.reserve(STAR_BURST_COUNT);
    for _ in 0..STAR_BURST_COUNT {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(2.0..6.0);
        // Kick upward so the burst fountains out of the net
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed - Vec2::new(0.0, 2.0);

        stars.push(Star {
            pos: at,
            vel,
            size: rng.random_range(8.0..20.0),
            rotation: rng.random_range(0.0..TAU),
            rotation_speed: rng.random_range(-0.2..0.2),
            opacity: 1.0,
            created_at: now,
            lifespan: rng.random_range(STAR_MIN_LIFESPAN_MS..=STAR_MAX_LIFESPAN_MS),
        });
    }
}

/// Advance stars one frame and drop the expired ones
pub fn update_stars(stars: &mut Vec<Star>, now: f64) {
    for star in stars.iter_mut() {
        star.pos += star.vel;
        star.vel.y += STAR_GRAVITY;
        star.rotation += star.rotation_speed;
        star.opacity = (1.0 - star.age(now) / star.lifespan).clamp(0.0, 1.0) as f32;
    }
    stars.retain(|s| s.age(now) < s.lifespan);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn star(lifespan: f64) -> Star {
        Star {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -3.0),
            size: 10.0,
            rotation: 0.0,
            rotation_speed: 0.1,
            opacity: 1.0,
            created_at: 0.0,
            lifespan,
        }
    }

    #[test]
    fn test_burst_count_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stars = Vec::new();
        let at = Vec2::new(1152.0, 252.0);
        burst(&mut stars, at, 100.0, &mut rng);
        assert_eq!(stars.len(), STAR_BURST_COUNT);
        for s in &stars {
            assert_eq!(s.pos, at);
            assert_eq!(s.created_at, 100.0);
            assert!(s.lifespan >= STAR_MIN_LIFESPAN_MS && s.lifespan <= STAR_MAX_LIFESPAN_MS);
            assert!(s.size >= 8.0 && s.size < 20.0);
            assert_eq!(s.opacity, 1.0);
        }
    }

    #[test]
    fn test_star_motion() {
        let mut stars = vec![star(1000.0)];
        update_stars(&mut stars, 16.0);
        let s = &stars[0];
        assert_eq!(s.pos, Vec2::new(1.0, -3.0));
        assert!((s.vel.y - (-3.0 + STAR_GRAVITY)).abs() < 1e-6);
        assert!((s.rotation - 0.1).abs() < 1e-6);
        assert!((s.opacity - 0.984).abs() < 1e-4);
    }

    #[test]
    fn test_star_decay_and_removal() {
        let mut stars = vec![star(800.0)];
        update_stars(&mut stars, 799.0);
        assert_eq!(stars.len(), 1);
        assert!(stars[0].opacity < 0.01);

        update_stars(&mut stars, 800.0);
        assert!(stars.is_empty());
    }

    #[test]
    fn test_independent_lifespans() {
        let mut stars = vec![star(500.0), star(1000.0)];
        update_stars(&mut stars, 600.0);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].lifespan, 1000.0);
    }
}
