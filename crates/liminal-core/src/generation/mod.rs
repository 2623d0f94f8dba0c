//! Procedural level content - streamed maze cells and static level layouts.

mod cell;
mod levels;

pub use cell::{generate_cell, CellConfig, CellCoord, GeneratedCell, MeshKind, MeshSpec};
pub use levels::{build_level, LevelContent, LevelId};
