//! Liminal Core - Survival-Horror Maze Simulation Engine
//!
//! The game-simulation layer of a first-person exploration/horror game:
//! procedurally streamed maze cells, AABB collision movement, autonomous
//! enemy agents, and a sanity/stamina survival model, driven by a
//! single-threaded frame tick.
//!
//! # Architecture
//!
//! Enemy agents and interactable entities live in a `hecs` ECS world;
//! everything presentation-side (rendering, audio, HUD) sits behind observer
//! ports so the engine runs headless. Pure math lives in `liminal-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use liminal_core::prelude::*;
//!
//! let mut engine = GameEngine::new();
//! engine.start(LevelId::Backrooms);
//!
//! loop {
//!     engine.tick(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod colliders;
pub mod components;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod ports;
pub mod streaming;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::GameEngine;
    pub use crate::generation::LevelId;
    pub use liminal_logic::config::Quality;
}
