//! Simulation systems - run once per tick in a fixed order:
//! player movement, cell streaming, enemy AI, survival stats.
//! Interaction runs only on explicit request.

pub mod enemies;
pub mod interact;
pub mod player;
pub mod survival;

pub use enemies::{update_enemies, EnemyTickResult};
pub use interact::{resolve_interact, InteractOutcome};
pub use player::{CueTimers, Flashlight, InputState, PlayerState};
pub use survival::{update_survival, StatReporter};
