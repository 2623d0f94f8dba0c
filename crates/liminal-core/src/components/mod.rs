//! ECS components for enemy agents and interactable entities.

mod common;
mod enemies;
mod entities;

pub use common::*;
pub use enemies::*;
pub use entities::*;
