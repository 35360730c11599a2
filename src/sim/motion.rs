//! Slime motion: walking, jumping, charging and the hit animation
//!
//! Two independent state machines run per slime every frame:
//! - Vertical: grounded <-> jumping
//! - Attack: idle -> charging (+ hitting) -> hitting cooldown -> idle
//!
//! Charging and hitting are separate flags because the charge windup reuses
//! the hit animation, held on its last frame until the charge is released.

use super::control::ControlState;
use super::state::Slime;
use crate::Tunables;
use crate::consts::*;

/// Attack edge produced by a frame, consumed by the shot system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackTransition {
    None,
    Started,
    /// Attack let go while charging. The level stays on the slime until the
    /// shot system has read it.
    Released { level: f32 },
}

/// Advance one slime by one frame
pub fn update_slime(
    slime: &mut Slime,
    control: &ControlState,
    tunables: &Tunables,
    now: f64,
) -> AttackTransition {
    move_horizontal(slime, control.direction(), tunables.effective_move_speed());
    update_jump(slime, control.jump, tunables);
    update_attack(slime, control.attack, tunables.max_charge_ms(), now)
}

fn move_horizontal(slime: &mut Slime, direction: f32, speed: f32) {
    slime.moving = direction != 0.0;
    let x = slime.pos.x + direction * speed;
    if x.is_finite() {
        slime.pos.x = x;
    }
    slime.pos.x = slime.pos.x.clamp(MIN_X, MAX_X);
}

fn update_jump(slime: &mut Slime, jump_held: bool, tunables: &Tunables) {
    if jump_held && !slime.jump.is_jumping {
        slime.jump.is_jumping = true;
        slime.jump.velocity = tunables.effective_jump_velocity();
        slime.base_ground_y = slime.pos.y;
    }

    if !slime.jump.is_jumping {
        return;
    }

    slime.jump.velocity -= tunables.effective_gravity();
    slime.pos.y -= slime.jump.velocity;

    if slime.pos.y >= slime.base_ground_y {
        slime.pos.y = slime.base_ground_y;
        slime.jump.velocity = 0.0;
        slime.jump.is_jumping = false;
    }
}

fn update_attack(
    slime: &mut Slime,
    attack_held: bool,
    max_charge_ms: f64,
    now: f64,
) -> AttackTransition {
    let mut transition = AttackTransition::None;

    if attack_held {
        if !slime.charge.is_charging && !slime.hit.is_hitting {
            slime.charge.is_charging = true;
            slime.charge.level = 0.0;
            slime.charge.started_at = now;
            slime.hit.is_hitting = true;
            slime.hit.started_at = now;
            transition = AttackTransition::Started;
        } else if slime.charge.is_charging {
            slime.charge.level = charge_level(now - slime.charge.started_at, max_charge_ms);
        }
    } else if slime.charge.is_charging {
        slime.charge.is_charging = false;
        transition = AttackTransition::Released {
            level: slime.charge.level,
        };
    }

    // Hit animation plays out once the windup is let go
    if slime.hit.is_hitting
        && !slime.charge.is_charging
        && now - slime.hit.started_at >= HIT_ANIMATION_MS
    {
        slime.hit.is_hitting = false;
    }

    transition
}

/// Charge level after holding for `elapsed_ms`
pub fn charge_level(elapsed_ms: f64, max_charge_ms: f64) -> f32 {
    let level = elapsed_ms / max_charge_ms;
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slime() -> Slime {
        Slime::new(0.5, GROUND_Y)
    }

    fn attack() -> ControlState {
        ControlState {
            attack: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_right_and_clamp() {
        let tunables = Tunables::default();
        let mut s = slime();
        let right = ControlState::from_buttons(false, true, false, false);
        update_slime(&mut s, &right, &tunables, 0.0);
        assert!((s.pos.x - 0.51).abs() < 1e-6);
        assert!(s.moving);

        for _ in 0..200 {
            update_slime(&mut s, &right, &tunables, 0.0);
        }
        assert_eq!(s.pos.x, MAX_X);

        let left = ControlState::from_buttons(true, false, false, false);
        for _ in 0..200 {
            update_slime(&mut s, &left, &tunables, 0.0);
        }
        assert_eq!(s.pos.x, MIN_X);
    }

    #[test]
    fn test_non_finite_speed_keeps_position() {
        let tunables = Tunables {
            move_speed: f32::NAN,
            ..Default::default()
        };
        let mut s = slime();
        let right = ControlState::from_buttons(false, true, false, false);
        update_slime(&mut s, &right, &tunables, 0.0);
        assert_eq!(s.pos.x, 0.5);
    }

    #[test]
    fn test_jump_arc_lands() {
        let tunables = Tunables::default();
        let mut s = slime();
        let jump = ControlState {
            jump: true,
            ..Default::default()
        };
        update_slime(&mut s, &jump, &tunables, 0.0);
        assert!(s.jump.is_jumping);
        assert!(s.pos.y < GROUND_Y);

        let idle = ControlState::default();
        let mut peak = s.pos.y;
        let mut frames = 0;
        while s.jump.is_jumping {
            update_slime(&mut s, &idle, &tunables, 0.0);
            peak = peak.min(s.pos.y);
            frames += 1;
            assert!(frames < 1000, "jump never landed");
        }
        assert!(peak < GROUND_Y - 0.1);
        assert_eq!(s.pos.y, s.base_ground_y);
        assert_eq!(s.jump.velocity, 0.0);
    }

    #[test]
    fn test_jump_not_retriggered_midair() {
        let tunables = Tunables::default();
        let mut s = slime();
        let jump = ControlState {
            jump: true,
            ..Default::default()
        };
        update_slime(&mut s, &jump, &tunables, 0.0);
        let v = s.jump.velocity;
        update_slime(&mut s, &jump, &tunables, 0.0);
        assert!(s.jump.velocity < v);
        assert_eq!(s.base_ground_y, GROUND_Y);
    }

    #[test]
    fn test_charge_start_sets_both_flags() {
        let tunables = Tunables::default();
        let mut s = slime();
        let t = update_slime(&mut s, &attack(), &tunables, 1000.0);
        assert_eq!(t, AttackTransition::Started);
        assert!(s.charge.is_charging);
        assert!(s.hit.is_hitting);
        assert_eq!(s.charge.level, 0.0);
        assert_eq!(s.charge.started_at, 1000.0);
        assert_eq!(s.hit.started_at, 1000.0);
    }

    #[test]
    fn test_charge_accumulates_and_caps() {
        let tunables = Tunables::default();
        let mut s = slime();
        update_slime(&mut s, &attack(), &tunables, 0.0);
        update_slime(&mut s, &attack(), &tunables, 1000.0);
        assert!((s.charge.level - 0.5).abs() < 1e-6);
        update_slime(&mut s, &attack(), &tunables, 2000.0);
        assert_eq!(s.charge.level, 1.0);
        update_slime(&mut s, &attack(), &tunables, 5000.0);
        assert_eq!(s.charge.level, 1.0);
    }

    #[test]
    fn test_double_charge_speed_fills_in_half_the_time() {
        let tunables = Tunables {
            charge_speed: 2.0,
            ..Default::default()
        };
        let mut s = slime();
        update_slime(&mut s, &attack(), &tunables, 0.0);
        update_slime(&mut s, &attack(), &tunables, 999.0);
        assert!(s.charge.level < 1.0);
        assert!(s.charge.level > 0.99);
        update_slime(&mut s, &attack(), &tunables, 1000.0);
        assert_eq!(s.charge.level, 1.0);
    }

    #[test]
    fn test_release_keeps_level_for_shot_system() {
        let tunables = Tunables::default();
        let mut s = slime();
        update_slime(&mut s, &attack(), &tunables, 0.0);
        update_slime(&mut s, &attack(), &tunables, 1500.0);
        let t = update_slime(&mut s, &ControlState::default(), &tunables, 1516.0);
        assert_eq!(t, AttackTransition::Released { level: 0.75 });
        assert!(!s.charge.is_charging);
        assert_eq!(s.charge.level, 0.75);
    }

    #[test]
    fn test_hit_frozen_while_charging_then_finishes() {
        let tunables = Tunables::default();
        let mut s = slime();
        update_slime(&mut s, &attack(), &tunables, 0.0);
        // Well past the animation length, still charging
        update_slime(&mut s, &attack(), &tunables, 900.0);
        assert!(s.hit.is_hitting);

        // Released after the animation length: hitting ends the same frame
        update_slime(&mut s, &ControlState::default(), &tunables, 916.0);
        assert!(!s.hit.is_hitting);
    }

    #[test]
    fn test_quick_tap_waits_for_hit_cooldown() {
        let tunables = Tunables::default();
        let mut s = slime();
        update_slime(&mut s, &attack(), &tunables, 0.0);
        update_slime(&mut s, &ControlState::default(), &tunables, 100.0);
        assert!(s.hit.is_hitting);

        // Pressing again during the cooldown does nothing
        let t = update_slime(&mut s, &attack(), &tunables, 200.0);
        assert_eq!(t, AttackTransition::None);
        assert!(!s.charge.is_charging);

        // The cooldown ends at the end of this frame...
        let t = update_slime(&mut s, &attack(), &tunables, 600.0);
        assert_eq!(t, AttackTransition::None);
        assert!(!s.hit.is_hitting);

        // ...so the still-held attack starts a new charge on the next one
        let t = update_slime(&mut s, &attack(), &tunables, 616.0);
        assert_eq!(t, AttackTransition::Started);
        assert!(s.charge.is_charging);
    }

    #[test]
    fn test_jump_and_attack_together() {
        let tunables = Tunables::default();
        let mut s = slime();
        let both = ControlState {
            jump: true,
            attack: true,
            movement: 1,
        };
        let t = update_slime(&mut s, &both, &tunables, 0.0);
        assert_eq!(t, AttackTransition::Started);
        assert!(s.jump.is_jumping);
        assert!(s.charge.is_charging);
        assert!(s.pos.x > 0.5);
    }

    #[test]
    fn test_charge_level_degenerate_speeds() {
        // charge_speed = 0 -> never charges
        assert_eq!(charge_level(1000.0, f64::INFINITY), 0.0);
        // infinite charge_speed -> instant full charge
        assert_eq!(charge_level(10.0, 0.0), 1.0);
        assert_eq!(charge_level(0.0, 0.0), 0.0);
        // negative charge_speed stays in range
        assert_eq!(charge_level(500.0, -2000.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_x_always_clamped(
            start in 0.0f32..1.0,
            speed in -50.0f32..50.0,
            moves in prop::collection::vec(-1i8..=1, 1..200),
        ) {
            let tunables = Tunables { move_speed: speed, ..Default::default() };
            let mut s = Slime::new(start, GROUND_Y);
            for m in moves {
                let c = ControlState { movement: m, ..Default::default() };
                update_slime(&mut s, &c, &tunables, 0.0);
                prop_assert!(s.pos.x >= MIN_X && s.pos.x <= MAX_X);
            }
        }

        #[test]
        fn prop_jump_always_lands(gravity in 0.01f32..5.0, jump in 0.0f32..5.0) {
            let tunables = Tunables {
                gravity,
                initial_jump_velocity: jump,
                ..Default::default()
            };
            let mut s = slime();
            let j = ControlState { jump: true, ..Default::default() };
            update_slime(&mut s, &j, &tunables, 0.0);
            let idle = ControlState::default();
            let mut frames = 0;
            while s.jump.is_jumping {
                update_slime(&mut s, &idle, &tunables, 0.0);
                frames += 1;
                prop_assert!(frames < 100_000);
            }
            prop_assert_eq!(s.pos.y, s.base_ground_y);
            prop_assert_eq!(s.jump.velocity, 0.0);
        }

        #[test]
        fn prop_charge_in_unit_range(
            charge_speed in -10.0f32..10.0,
            times in prop::collection::vec(0.0f64..10_000.0, 1..50),
        ) {
            let tunables = Tunables { charge_speed, ..Default::default() };
            let mut s = slime();
            let mut now = 0.0;
            for dt in times {
                now += dt;
                update_slime(&mut s, &attack(), &tunables, now);
                prop_assert!(s.charge.level >= 0.0 && s.charge.level <= 1.0);
            }
        }
    }
}
