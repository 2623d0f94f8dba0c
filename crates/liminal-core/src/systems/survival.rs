//! Survival stat integration and reporting.
//!
//! The math lives in `liminal_logic::stats`; this system owns the mutation
//! order and the outward-facing side effects: HUD pushes (coalesced so a
//! 60 Hz tick does not spam the sink), low-stat warnings, and the one-shot
//! death notification.

use liminal_logic::constants::survival::LOW_STAT_WARNING;
use liminal_logic::stats::{self, MotionState};
use log::warn;

use crate::ports::{AudioPort, HudPort};
use crate::systems::player::PlayerState;

/// Minimum stat delta that triggers a HUD push.
const STAT_EPSILON: f32 = 0.5;
const PROXIMITY_EPSILON: f32 = 0.02;

/// Advance sanity and stamina for one tick. Returns the proximity signal
/// that was applied, for reuse by the caller.
pub fn update_survival(
    player: &mut PlayerState,
    motion: MotionState,
    nearest_dist: f32,
    dt: f32,
) -> f32 {
    let proximity = stats::proximity(nearest_dist);
    player.sanity = stats::sanity_step(player.sanity, motion, proximity, dt);
    player.stamina = stats::stamina_step(player.stamina, motion.run_held, dt);
    if player.sanity <= 0.0 {
        player.dead = true;
    }
    proximity
}

/// Coalescing bridge between the stat state and the HUD/audio sinks.
/// Remembers the last pushed values and edge-triggers the warnings.
#[derive(Debug)]
pub struct StatReporter {
    last_sanity: f32,
    last_stamina: f32,
    last_proximity: f32,
    sanity_warned: bool,
    stamina_warned: bool,
    death_reported: bool,
}

impl Default for StatReporter {
    fn default() -> Self {
        Self {
            last_sanity: f32::NAN,
            last_stamina: f32::NAN,
            last_proximity: f32::NAN,
            sanity_warned: false,
            stamina_warned: false,
            death_reported: false,
        }
    }
}

impl StatReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push changed values to the sinks. Safe to call every tick.
    pub fn report(
        &mut self,
        player: &PlayerState,
        proximity: f32,
        hud: &mut dyn HudPort,
        audio: &mut dyn AudioPort,
    ) {
        // NaN sentinel compares false, so the first report always pushes
        if !((self.last_sanity - player.sanity).abs() < STAT_EPSILON) {
            hud.sanity(player.sanity);
            self.last_sanity = player.sanity;
        }
        if !((self.last_stamina - player.stamina).abs() < STAT_EPSILON) {
            hud.stamina(player.stamina);
            self.last_stamina = player.stamina;
        }
        if !((self.last_proximity - proximity).abs() < PROXIMITY_EPSILON) {
            hud.proximity(proximity);
            self.last_proximity = proximity;
        }

        if player.sanity < LOW_STAT_WARNING {
            if !self.sanity_warned {
                warn!("sanity critical: {:.1}", player.sanity);
                self.sanity_warned = true;
            }
        } else {
            self.sanity_warned = false;
        }
        if player.stamina < LOW_STAT_WARNING {
            if !self.stamina_warned {
                warn!("stamina exhausted: {:.1}", player.stamina);
                self.stamina_warned = true;
            }
        } else {
            self.stamina_warned = false;
        }

        if player.dead && !self.death_reported {
            hud.death();
            audio.death();
            self.death_reported = true;
        }
    }

    /// Forget the pushed state, forcing a full re-push on the next report.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
