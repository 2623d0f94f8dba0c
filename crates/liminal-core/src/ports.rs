//! Observer ports - one method per event kind, injected at construction.
//!
//! The engine never depends on a real renderer, audio backend, or HUD; every
//! method has a no-op default so a missing collaborator can never be fatal.
//! Null implementations are provided for headless runs and tests.

use crate::generation::{GeneratedCell, LevelId};
use liminal_logic::config::Quality;

/// Opaque handle to spawned cell geometry, arena-style - the engine never
/// holds renderer object references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Audio sink - fire-and-forget cues.
pub trait AudioPort {
    fn footstep(&mut self) {}
    fn breath(&mut self) {}
    fn death(&mut self) {}
    /// Nearest-enemy distance, for proximity drones.
    fn enemy_proximity(&mut self, _dist: f32) {}
    /// Level switched - swap the ambient bed.
    fn level_audio(&mut self, _level: LevelId) {}
}

/// HUD sink - one-way pushes of display state.
pub trait HudPort {
    fn sanity(&mut self, _value: f32) {}
    fn stamina(&mut self, _value: f32) {}
    /// Normalized nearest-enemy proximity in [0, 1].
    fn proximity(&mut self, _value: f32) {}
    fn fps(&mut self, _fps: u32) {}
    fn level(&mut self, _level: LevelId) {}
    fn quality(&mut self, _quality: Quality) {}
    /// Interaction hint text.
    fn hint(&mut self, _message: &str) {}
    fn death(&mut self) {}
}

/// Render/world sink - owns the visual representation of streamed cells.
pub trait WorldPort {
    /// Materialize a generated cell. The returned handle is the only thing
    /// the engine keeps.
    fn spawn_cell(&mut self, _cell: &GeneratedCell) -> GeometryHandle {
        GeometryHandle(0)
    }
    /// Tear down a previously spawned cell.
    fn destroy_cell(&mut self, _handle: GeometryHandle) {}
}

/// Silent audio backend.
#[derive(Debug, Default)]
pub struct NullAudio;
impl AudioPort for NullAudio {}

/// HUD that drops every update.
#[derive(Debug, Default)]
pub struct NullHud;
impl HudPort for NullHud {}

/// World sink that only mints handles.
#[derive(Debug, Default)]
pub struct NullWorld {
    next: u64,
}

impl WorldPort for NullWorld {
    fn spawn_cell(&mut self, _cell: &GeneratedCell) -> GeometryHandle {
        self.next += 1;
        GeometryHandle(self.next)
    }
}
