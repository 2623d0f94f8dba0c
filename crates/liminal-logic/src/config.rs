//! Quality tiers and movement tuning.

use crate::constants::movement;
use serde::{Deserialize, Serialize};

/// Rendering/simulation density tier. Exactly two - each maps to a fixed
/// (cell size, streaming radius, render scale) tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    Low,
}

impl Quality {
    /// Side length of one streamed maze cell in meters.
    pub fn cell_size(&self) -> f32 {
        match self {
            Quality::High => 14.0,
            Quality::Low => 16.8,
        }
    }

    /// Number of cell rings kept active around the player.
    pub fn streaming_radius(&self) -> i32 {
        match self {
            Quality::High => 2,
            Quality::Low => 1,
        }
    }

    /// Pixel-ratio hint for the render sink.
    pub fn render_scale(&self) -> f32 {
        match self {
            Quality::High => 1.5,
            Quality::Low => 1.0,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Quality::High => Quality::Low,
            Quality::Low => Quality::High,
        }
    }
}

/// Player movement tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub player_height: f32,
    pub player_radius: f32,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            walk_speed: movement::WALK_SPEED,
            run_speed: movement::RUN_SPEED,
            player_height: movement::PLAYER_HEIGHT,
            player_radius: movement::PLAYER_RADIUS,
        }
    }
}
