//! Survival-stat model - sanity and stamina as decaying/recovering resources.
//!
//! Sanity only recovers while the player is fully idle; movement itself does
//! not raise the drain above the base rate, but enemy proximity past the
//! panic line adds an order-of-magnitude step. That step is deliberate - it
//! is the difficulty curve, not a magic number to smooth out.

use crate::constants::survival::*;

/// Normalized inverse-distance danger signal in [0, 1].
/// 0 at `PROXIMITY_RANGE` meters or farther, 1 at contact.
pub fn proximity(nearest_dist: f32) -> f32 {
    if !nearest_dist.is_finite() {
        return 0.0;
    }
    (1.0 - nearest_dist / PROXIMITY_RANGE).max(0.0)
}

/// Player movement snapshot for one tick, as read from the input flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionState {
    /// Any directional key held.
    pub moving: bool,
    /// Run key held (regardless of stamina).
    pub run_held: bool,
}

impl MotionState {
    pub fn idle(&self) -> bool {
        !self.moving && !self.run_held
    }
}

/// Advance sanity by one tick. Returns the new clamped value.
pub fn sanity_step(sanity: f32, motion: MotionState, proximity: f32, dt: f32) -> f32 {
    if motion.idle() {
        (sanity + SANITY_RECOVERY * dt).min(STAT_MAX)
    } else {
        let mut drain = SANITY_BASE_DRAIN;
        if proximity > PANIC_PROXIMITY {
            drain += SANITY_PANIC_DRAIN;
        }
        (sanity - drain * dt).max(0.0)
    }
}

/// Advance stamina by one tick. Drains only while running is both requested
/// and available; recovers (faster) otherwise.
pub fn stamina_step(stamina: f32, run_held: bool, dt: f32) -> f32 {
    if run_held && stamina > 0.0 {
        (stamina - STAMINA_DRAIN * dt).max(0.0)
    } else {
        (stamina + STAMINA_RECOVERY * dt).min(STAT_MAX)
    }
}

/// Running is permitted only while stamina remains.
pub fn run_allowed(run_held: bool, stamina: f32) -> bool {
    run_held && stamina > 0.0
}

/// Clamp an externally supplied stat value into the legal range.
pub fn clamp_stat(value: f32) -> f32 {
    value.clamp(0.0, STAT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn moving() -> MotionState {
        MotionState { moving: true, run_held: false }
    }

    #[test]
    fn test_proximity_curve() {
        assert_eq!(proximity(f32::INFINITY), 0.0);
        assert_eq!(proximity(20.0), 0.0);
        assert_eq!(proximity(40.0), 0.0);
        assert!((proximity(10.0) - 0.5).abs() < 1e-6);
        assert!((proximity(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sanity_recovers_only_when_idle() {
        let idle = MotionState::default();
        assert!(sanity_step(50.0, idle, 0.0, 1.0) > 50.0);
        assert!(sanity_step(50.0, moving(), 0.0, 1.0) < 50.0);
        // Holding run while standing still also blocks recovery
        let braced = MotionState { moving: false, run_held: true };
        assert!(sanity_step(50.0, braced, 0.0, 1.0) < 50.0);
    }

    #[test]
    fn test_sanity_caps_at_max() {
        let idle = MotionState::default();
        let mut sanity = 100.0;
        // 10 simulated seconds idle at zero proximity: stays pinned at 100
        for _ in 0..600 {
            sanity = sanity_step(sanity, idle, 0.0, DT);
        }
        assert_eq!(sanity, 100.0);
    }

    #[test]
    fn test_panic_drain_step() {
        let calm = sanity_step(100.0, moving(), 0.5, 1.0);
        let panicked = sanity_step(100.0, moving(), 0.51, 1.0);
        assert!((100.0 - calm - SANITY_BASE_DRAIN).abs() < 1e-4);
        assert!(100.0 - panicked > 50.0, "panic drain should dwarf base drain");
    }

    #[test]
    fn test_sanity_floor() {
        let s = sanity_step(0.2, moving(), 1.0, 1.0);
        assert_eq!(s, 0.0);
        assert_eq!(sanity_step(0.0, moving(), 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_stamina_depletes_then_recovers() {
        let mut stamina = 100.0;
        let mut ticks = 0;
        while stamina > 0.0 && ticks < 10_000 {
            stamina = stamina_step(stamina, true, DT);
            ticks += 1;
        }
        // 100 / 22 ≈ 4.5s of sustained running
        assert!(ticks > 4 * 60 && ticks < 6 * 60, "depleted in {} ticks", ticks);
        assert!(!run_allowed(true, stamina));

        // Recovery happens even with the key still held once empty
        stamina = stamina_step(stamina, true, DT);
        assert!(stamina > 0.0);
    }

    #[test]
    fn test_clamp_stat() {
        assert_eq!(clamp_stat(150.0), 100.0);
        assert_eq!(clamp_stat(-3.0), 0.0);
        assert_eq!(clamp_stat(55.5), 55.5);
    }
}
