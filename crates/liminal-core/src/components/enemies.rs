//! Enemy agent components.

use liminal_logic::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// Behavioral variant of an enemy agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline pursuer.
    Stalker,
    /// Gets a temporary speed burst at close range.
    Sprinter,
    /// Occasionally teleports behind the player.
    Lurker,
}

/// Per-agent stats and transient variant state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Distance at which the agent switches from wandering to pursuit.
    pub detect: f32,
    /// Speed while pursuing at close range.
    pub chase: f32,
    /// Speed while wandering or pursuing at long range.
    pub walk: f32,
    /// Contact kills the player inside this distance.
    pub damage_radius: f32,
    /// Yaw the agent is facing (pursuit keeps it on the player).
    pub yaw: f32,
    /// Remaining sprint-burst time; > 0 means the burst is active.
    pub burst_timer: f32,
    /// Remaining lurker teleport cooldown.
    pub teleport_cooldown: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, detect: f32, chase: f32, walk: f32, damage_radius: f32) -> Self {
        Self {
            kind,
            detect,
            chase,
            walk,
            damage_radius,
            yaw: 0.0,
            burst_timer: 0.0,
            teleport_cooldown: 0.0,
        }
    }

    pub fn stalker() -> Self {
        Self::new(EnemyKind::Stalker, 18.0, 5.0, 3.0, 3.0)
    }

    pub fn sprinter() -> Self {
        Self::new(EnemyKind::Sprinter, 14.0, 7.2, 2.4, 3.2)
    }

    pub fn lurker() -> Self {
        Self::new(EnemyKind::Lurker, 16.0, 4.5, 2.0, 3.4)
    }
}

/// Wandering state - present on every agent, consulted outside pursuit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Wander {
    /// Seconds until the next direction change.
    pub timer: f32,
    /// Current wander velocity target.
    pub dir: Vec3,
}
