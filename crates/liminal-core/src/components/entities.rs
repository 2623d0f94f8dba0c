//! Interactable entity components - pickups and doors.

use crate::generation::LevelId;
use liminal_logic::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// What a pickup does when collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Extends and strengthens the flashlight.
    Battery,
    /// Restores a fixed amount of sanity and stamina.
    Medkit,
    /// Cosmetic - no stat effect.
    Note,
}

/// Tagged interactable variant. Pickups are removed on use; doors persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Pickup(PickupKind),
    /// Level-transition door to the named level.
    Door(LevelId),
}

/// Position-bound interactable resolved via line-of-sight queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interactable {
    pub kind: EntityKind,
    /// Maximum ray-hit distance that still triggers the interaction.
    pub radius: f32,
    /// Hint text surfaced on interaction.
    pub prompt: String,
    /// Half extents of the visual, for the ray test.
    pub half_extents: Vec3,
}

impl Interactable {
    pub fn pickup(kind: PickupKind, prompt: impl Into<String>, half_extents: Vec3) -> Self {
        Self {
            kind: EntityKind::Pickup(kind),
            radius: 2.5,
            prompt: prompt.into(),
            half_extents,
        }
    }

    pub fn door(target: LevelId, prompt: impl Into<String>, half_extents: Vec3) -> Self {
        Self {
            kind: EntityKind::Door(target),
            radius: 2.5,
            prompt: prompt.into(),
            half_extents,
        }
    }
}
