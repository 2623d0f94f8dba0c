//! Game engine - owns the ECS world, the player, and the per-tick order:
//! player movement, cell streaming, enemy agents, survival stats, reporting.
//!
//! All outward effects go through the injected ports; a headless engine with
//! the null ports is a complete, testable simulation.

use hecs::World;
use liminal_logic::config::{MoveConfig, Quality};
use liminal_logic::constants::MAX_DELTA_TIME;
use liminal_logic::stats;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{Read, Write};

use crate::colliders::ColliderSet;
use crate::generation::{build_level, CellConfig, LevelId};
use crate::persistence::{self, SaveError, SaveState};
use crate::ports::{AudioPort, HudPort, NullAudio, NullHud, NullWorld, WorldPort};
use crate::streaming::CellStream;
use crate::systems::player::update_player;
use crate::systems::{
    resolve_interact, update_enemies, update_survival, CueTimers, Flashlight, InputState,
    InteractOutcome, PlayerState, StatReporter,
};

/// Tick samples averaged per FPS push.
const FPS_WINDOW: usize = 20;

/// Main game engine
pub struct GameEngine {
    /// ECS world containing enemies and interactables
    pub world: World,
    /// The player's simulation state
    pub player: PlayerState,
    /// Held-key flags, written by the host
    pub input: InputState,

    colliders: ColliderSet,
    stream: CellStream,
    flashlight: Flashlight,
    level: LevelId,
    quality: Quality,
    move_cfg: MoveConfig,
    cues: CueTimers,
    reporter: StatReporter,
    rng: StdRng,
    nearest_dist: f32,
    fps_samples: Vec<f32>,
    started: bool,
    disposed: bool,

    audio: Box<dyn AudioPort>,
    hud: Box<dyn HudPort>,
    world_port: Box<dyn WorldPort>,
}

impl GameEngine {
    /// Create an engine wired to the null ports (headless).
    pub fn new() -> Self {
        Self::with_ports(
            Box::new(NullAudio),
            Box::new(NullHud),
            Box::<NullWorld>::default(),
        )
    }

    /// Create an engine wired to real sinks.
    pub fn with_ports(
        audio: Box<dyn AudioPort>,
        hud: Box<dyn HudPort>,
        world_port: Box<dyn WorldPort>,
    ) -> Self {
        Self {
            world: World::new(),
            player: PlayerState::default(),
            input: InputState::default(),
            colliders: ColliderSet::new(),
            stream: CellStream::new(),
            flashlight: Flashlight::default(),
            level: LevelId::Backrooms,
            quality: Quality::High,
            move_cfg: MoveConfig::default(),
            cues: CueTimers::default(),
            reporter: StatReporter::new(),
            rng: StdRng::from_entropy(),
            nearest_dist: f32::INFINITY,
            fps_samples: Vec::with_capacity(FPS_WINDOW),
            started: false,
            disposed: false,
            audio,
            hud,
            world_port,
        }
    }

    /// Build the named level and begin ticking.
    pub fn start(&mut self, level: LevelId) {
        info!("starting on {:?} at {:?} quality", level, self.quality);
        self.apply_level(level);
        self.started = true;
        self.hud.quality(self.quality);
    }

    /// Advance the whole simulation by one frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.started || self.disposed || self.player.dead {
            return;
        }
        let dt_raw = dt.max(0.0);
        let dt = dt_raw.min(MAX_DELTA_TIME);

        let running = update_player(
            &mut self.player,
            &self.input,
            &self.move_cfg,
            self.colliders.boxes(),
            dt,
        );

        if self.level.is_streamed() {
            let cfg = CellConfig::new(self.quality.cell_size(), self.move_cfg.player_height);
            let pos = self.player.position;
            self.stream.update(
                &pos,
                self.quality.streaming_radius(),
                &cfg,
                &mut self.colliders,
                self.world_port.as_mut(),
            );
        }

        let result = update_enemies(&mut self.world, &self.player.position, dt, &mut self.rng);
        self.nearest_dist = result.nearest_dist;
        if result.player_caught {
            self.player.dead = true;
        }

        let motion = self.input.motion();
        let proximity = update_survival(&mut self.player, motion, result.nearest_dist, dt);
        self.audio.enemy_proximity(result.nearest_dist);
        self.cues.update(
            motion.moving,
            running,
            self.player.stamina,
            result.nearest_dist,
            dt,
            &mut self.rng,
            self.audio.as_mut(),
        );
        self.reporter
            .report(&self.player, proximity, self.hud.as_mut(), self.audio.as_mut());

        self.push_fps(dt_raw);
    }

    /// Switch levels. A request for the already-active level is a no-op
    /// unless forced. Player stats survive the switch; position does not.
    pub fn set_level(&mut self, level: LevelId, force: bool) {
        if self.level == level && self.started && !force {
            return;
        }
        info!("switching level to {:?}", level);
        self.apply_level(level);
    }

    /// Change the quality tier, restreaming the maze at the new density.
    pub fn set_quality(&mut self, quality: Quality) {
        if self.quality == quality {
            return;
        }
        self.quality = quality;
        self.hud.quality(quality);
        if self.started && self.level.is_streamed() {
            self.stream.clear(&mut self.colliders, self.world_port.as_mut());
            let cfg = CellConfig::new(quality.cell_size(), self.move_cfg.player_height);
            let pos = self.player.position;
            self.stream.update(
                &pos,
                quality.streaming_radius(),
                &cfg,
                &mut self.colliders,
                self.world_port.as_mut(),
            );
        }
    }

    pub fn toggle_quality(&mut self) {
        self.set_quality(self.quality.toggled());
    }

    /// Returns the new on/off state.
    pub fn toggle_flashlight(&mut self) -> bool {
        self.flashlight.toggle();
        self.flashlight.on
    }

    /// Resolve an interact keypress against the view ray.
    pub fn interact(&mut self) -> InteractOutcome {
        if !self.started || self.disposed || self.player.dead {
            return InteractOutcome::Nothing;
        }
        let outcome = resolve_interact(
            &mut self.world,
            &mut self.player,
            &mut self.flashlight,
            self.colliders.boxes(),
        );
        match &outcome {
            InteractOutcome::Nothing => {}
            InteractOutcome::Pickup { prompt, .. } => self.hud.hint(prompt),
            InteractOutcome::LevelSwitch { target, prompt } => {
                self.hud.hint(prompt);
                let target = *target;
                self.set_level(target, false);
            }
        }
        outcome
    }

    /// Fresh run on the current level: full stats, default flashlight.
    pub fn reset(&mut self) {
        info!("resetting run");
        self.player = PlayerState::default();
        self.flashlight = Flashlight::default();
        self.cues = CueTimers::default();
        self.reporter.reset();
        self.nearest_dist = f32::INFINITY;
        self.apply_level(self.level);
    }

    /// Tear everything down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.stream.clear(&mut self.colliders, self.world_port.as_mut());
        self.colliders.clear();
        self.world.clear();
        self.disposed = true;
        info!("engine disposed");
    }

    /// Snapshot the restorable game state.
    pub fn snapshot(&self) -> SaveState {
        SaveState::new(
            self.player.position,
            self.player.yaw,
            self.player.pitch,
            self.player.sanity,
            self.player.stamina,
            self.level,
        )
    }

    /// Write the current state to a writer.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_state(writer, &self.snapshot())
    }

    /// Read a state back and apply it.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let state = persistence::load_state(reader)?;
        self.restore(&state);
        Ok(())
    }

    /// Apply a snapshot: level first, then position and stats, then a
    /// restream around the restored position.
    pub fn restore(&mut self, state: &SaveState) {
        self.apply_level(state.level);
        self.started = true;

        self.player.position = state.position;
        self.player.yaw = state.yaw;
        self.player.pitch = state.pitch;
        self.player.sanity = stats::clamp_stat(state.sanity);
        self.player.stamina = stats::clamp_stat(state.stamina);
        self.player.dead = false;
        self.reporter.reset();

        if state.level.is_streamed() {
            let cfg = CellConfig::new(self.quality.cell_size(), self.move_cfg.player_height);
            let pos = self.player.position;
            self.stream.update(
                &pos,
                self.quality.streaming_radius(),
                &cfg,
                &mut self.colliders,
                self.world_port.as_mut(),
            );
        }
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn flashlight(&self) -> Flashlight {
        self.flashlight
    }

    /// Distance to the closest enemy as of the last tick.
    pub fn nearest_enemy_distance(&self) -> f32 {
        self.nearest_dist
    }

    pub fn active_cell_count(&self) -> usize {
        self.stream.active_count()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn apply_level(&mut self, level: LevelId) {
        self.world.clear();
        self.stream.clear(&mut self.colliders, self.world_port.as_mut());
        self.colliders.clear();

        let content = build_level(&mut self.world, level);
        self.colliders.set_statics(content.static_colliders);
        self.level = level;
        self.player.respawn();
        self.player.dead = false;

        if level.is_streamed() {
            let cfg = CellConfig::new(self.quality.cell_size(), self.move_cfg.player_height);
            let pos = self.player.position;
            self.stream.update(
                &pos,
                self.quality.streaming_radius(),
                &cfg,
                &mut self.colliders,
                self.world_port.as_mut(),
            );
        }

        self.hud.level(level);
        self.audio.level_audio(level);
    }

    fn push_fps(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.fps_samples.push(dt);
        if self.fps_samples.len() >= FPS_WINDOW {
            let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
            self.hud.fps((1.0 / avg).round() as u32);
            self.fps_samples.clear();
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
