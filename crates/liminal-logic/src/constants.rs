//! Gameplay tuning constants.
//!
//! Plain `f32` values with no engine dependency - shared by the game engine
//! and the headless simtest harness. Values here are behaviorally load-bearing
//! (the sanity drain step at high proximity is the difficulty curve); change
//! with care.

/// Per-tick delta time cap in seconds. Long stalls (tab backgrounding, GC
/// pauses in the host) must not explode the integration step.
pub const MAX_DELTA_TIME: f32 = 0.1;

pub mod movement {
    pub const WALK_SPEED: f32 = 4.0;
    pub const RUN_SPEED: f32 = 7.0;
    pub const PLAYER_HEIGHT: f32 = 1.75;
    pub const PLAYER_RADIUS: f32 = 0.6;
}

pub mod survival {
    /// Sanity lost per second at rest.
    pub const SANITY_BASE_DRAIN: f32 = 0.1;
    /// Extra sanity drain per second once proximity crosses the panic line.
    pub const SANITY_PANIC_DRAIN: f32 = 50.0;
    /// Proximity above which the panic drain kicks in.
    pub const PANIC_PROXIMITY: f32 = 0.5;
    /// Sanity regained per second while fully idle.
    pub const SANITY_RECOVERY: f32 = 5.0;
    /// Distance at which proximity reaches 0.
    pub const PROXIMITY_RANGE: f32 = 20.0;

    /// Stamina lost per second while running.
    pub const STAMINA_DRAIN: f32 = 22.0;
    /// Stamina regained per second otherwise.
    pub const STAMINA_RECOVERY: f32 = 14.0;

    pub const STAT_MAX: f32 = 100.0;
    /// Below this, the HUD warning path fires.
    pub const LOW_STAT_WARNING: f32 = 30.0;
    /// Sanity and stamina restored by a medkit.
    pub const MEDKIT_RESTORE: f32 = 20.0;
}

pub mod cues {
    pub const STEP_INTERVAL_WALK: f32 = 0.48;
    pub const STEP_INTERVAL_RUN: f32 = 0.32;
    pub const BREATH_INTERVAL_BASE: f32 = 2.5;
    pub const BREATH_INTERVAL_JITTER: f32 = 1.2;
    /// Breathing starts below this stamina...
    pub const BREATH_STAMINA_THRESHOLD: f32 = 30.0;
    /// ...or within this distance of the nearest enemy.
    pub const BREATH_ENEMY_DISTANCE: f32 = 10.0;
}

pub mod enemy {
    /// Pursuit switches from walk to chase speed inside this distance.
    pub const CHASE_DISTANCE: f32 = 10.0;
    /// Velocity smoothing factor while pursuing.
    pub const PURSUE_LERP: f32 = 0.1;
    /// Velocity smoothing factor while wandering (lazier).
    pub const WANDER_LERP: f32 = 0.05;
    pub const WANDER_TIMER_MIN: f32 = 2.0;
    pub const WANDER_TIMER_JITTER: f32 = 3.0;
    /// Agents are pinned to eye height - they neither fall nor fly.
    pub const EYE_HEIGHT: f32 = 1.75;

    pub const SPRINT_BURST_FACTOR: f32 = 1.3;
    pub const SPRINT_BURST_DURATION: f32 = 2.0;
    /// Burst triggers within this fraction of the detect radius.
    pub const SPRINT_TRIGGER_FRACTION: f32 = 0.4;

    /// Lurker teleport probability per second while pursuing.
    pub const LURK_TELEPORT_RATE: f32 = 0.35;
    pub const LURK_TELEPORT_COOLDOWN: f32 = 6.0;
    /// How far past the player the lurker re-appears.
    pub const LURK_BEHIND_DISTANCE: f32 = 3.0;
}

pub mod world {
    pub const WALL_THICKNESS: f32 = 0.4;
    /// Wall height as a multiple of player height.
    pub const WALL_HEIGHT_FACTOR: f32 = 3.0;
    /// First RNG draw above this makes the cell an open hall.
    pub const HALL_THRESHOLD: f32 = 0.8;
    /// Chance an inner wall carries a cosmetic door tag.
    pub const DOOR_TAG_CHANCE: f32 = 0.3;
    pub const PIT_SIZE: f32 = 1.5;
    pub const PIT_DEPTH: f32 = 2.5;
    /// Maximum raycast distance for interaction.
    pub const INTERACT_RANGE: f32 = 10.0;
}

pub mod flashlight {
    pub const BASE_DISTANCE: f32 = 30.0;
    pub const BASE_INTENSITY: f32 = 2.0;
    pub const MAX_DISTANCE: f32 = 50.0;
    pub const MAX_INTENSITY: f32 = 3.0;
    pub const BATTERY_DISTANCE_BONUS: f32 = 5.0;
    pub const BATTERY_INTENSITY_BONUS: f32 = 0.5;
}
