//! First-person player controller - camera-relative planar movement with
//! collision resolution, plus the footstep and breathing cue timers.

use liminal_logic::collision;
use liminal_logic::config::MoveConfig;
use liminal_logic::constants::{cues, flashlight, survival};
use liminal_logic::geometry::{Aabb, Vec3};
use liminal_logic::stats;
use rand::Rng;

use crate::ports::AudioPort;

/// Held-key flags, set by the host each frame and read by the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

impl InputState {
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn motion(&self) -> stats::MotionState {
        stats::MotionState {
            moving: self.any_direction(),
            run_held: self.run,
        }
    }
}

/// Flashlight state. Batteries permanently raise reach and intensity up to
/// hard caps; toggling only flips `on`.
#[derive(Debug, Clone, Copy)]
pub struct Flashlight {
    pub on: bool,
    pub distance: f32,
    pub intensity: f32,
}

impl Default for Flashlight {
    fn default() -> Self {
        Self {
            on: true,
            distance: flashlight::BASE_DISTANCE,
            intensity: flashlight::BASE_INTENSITY,
        }
    }
}

impl Flashlight {
    pub fn toggle(&mut self) {
        self.on = !self.on;
    }

    /// Apply one battery's worth of upgrade.
    pub fn boost(&mut self) {
        self.distance = (self.distance + flashlight::BATTERY_DISTANCE_BONUS)
            .min(flashlight::MAX_DISTANCE);
        self.intensity = (self.intensity + flashlight::BATTERY_INTENSITY_BONUS)
            .min(flashlight::MAX_INTENSITY);
    }
}

/// The player's full simulation state. Kept outside the ECS world - there is
/// exactly one player and every system reads it.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub position: Vec3,
    /// Heading in radians; 0 faces -Z, positive turns left.
    pub yaw: f32,
    /// Look elevation in radians, positive up.
    pub pitch: f32,
    pub sanity: f32,
    pub stamina: f32,
    pub dead: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, liminal_logic::constants::movement::PLAYER_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            sanity: survival::STAT_MAX,
            stamina: survival::STAT_MAX,
            dead: false,
        }
    }
}

impl PlayerState {
    /// Camera look direction, pitch included.
    pub fn forward(&self) -> Vec3 {
        let cp = self.pitch.cos();
        Vec3::new(-self.yaw.sin() * cp, self.pitch.sin(), -self.yaw.cos() * cp)
    }

    /// Return to the spawn point facing -Z. Stats are untouched.
    pub fn respawn(&mut self) {
        self.position = Vec3::new(
            0.0,
            liminal_logic::constants::movement::PLAYER_HEIGHT,
            0.0,
        );
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

/// Timers for the repeating audio cues. Both accumulate wall-clock tick time
/// and fire only when their condition holds at the deadline.
#[derive(Debug, Clone, Copy)]
pub struct CueTimers {
    step_elapsed: f32,
    step_interval: f32,
    breath_elapsed: f32,
    breath_interval: f32,
}

impl Default for CueTimers {
    fn default() -> Self {
        Self {
            step_elapsed: 0.0,
            step_interval: cues::STEP_INTERVAL_WALK,
            breath_elapsed: 0.0,
            breath_interval: cues::BREATH_INTERVAL_BASE,
        }
    }
}

impl CueTimers {
    /// Advance the cue timers and emit any due footstep/breath events.
    pub fn update(
        &mut self,
        moving: bool,
        running: bool,
        stamina: f32,
        nearest_dist: f32,
        dt: f32,
        rng: &mut impl Rng,
        audio: &mut dyn AudioPort,
    ) {
        if moving {
            self.step_elapsed += dt;
            if self.step_elapsed >= self.step_interval {
                audio.footstep();
                // Carry the remainder so the cadence averages the interval
                self.step_elapsed -= self.step_interval;
                self.step_interval = if running {
                    cues::STEP_INTERVAL_RUN
                } else {
                    cues::STEP_INTERVAL_WALK
                };
            }
        } else {
            self.step_elapsed = 0.0;
        }

        self.breath_elapsed += dt;
        let strained = stamina < cues::BREATH_STAMINA_THRESHOLD
            || nearest_dist < cues::BREATH_ENEMY_DISTANCE;
        if strained && self.breath_elapsed >= self.breath_interval {
            audio.breath();
            self.breath_elapsed = 0.0;
            self.breath_interval =
                cues::BREATH_INTERVAL_BASE + rng.gen::<f32>() * cues::BREATH_INTERVAL_JITTER;
        }
    }
}

/// Move the player for one tick: build the camera-relative direction from the
/// held keys, pick walk or run speed, and resolve against the collider set.
/// Height stays fixed at the configured eye height.
pub fn update_player(
    player: &mut PlayerState,
    input: &InputState,
    cfg: &MoveConfig,
    boxes: &[Aabb],
    dt: f32,
) -> bool {
    if !input.any_direction() {
        return false;
    }

    let fwd = player.forward().flattened().normalize();
    let right = Vec3::new(-fwd.z, 0.0, fwd.x);

    let mut dir = Vec3::ZERO;
    if input.forward {
        dir = dir + fwd;
    }
    if input.backward {
        dir = dir - fwd;
    }
    if input.right {
        dir = dir + right;
    }
    if input.left {
        dir = dir - right;
    }
    if dir.length() < 1e-6 {
        return false;
    }
    let dir = dir.normalize();

    let running = stats::run_allowed(input.run, player.stamina);
    let speed = if running { cfg.run_speed } else { cfg.walk_speed };
    let desired = player.position + dir * (speed * dt);
    player.position =
        collision::resolve_movement(&player.position, &desired, cfg.player_radius, boxes);
    running
}
