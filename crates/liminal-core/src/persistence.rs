//! Save/Load of the player-facing game state.
//!
//! Uses bincode for compact binary serialization. The snapshot is
//! deliberately small: position, look angles, stats, and the active level.
//! Streamed cells are regenerated from the level seed math on load and never
//! saved.

use liminal_logic::geometry::Vec3;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::generation::LevelId;

/// Version number for the save format (increment when the format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    /// Save format version
    pub version: u32,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub sanity: f32,
    pub stamina: f32,
    pub level: LevelId,
}

impl SaveState {
    pub fn new(
        position: Vec3,
        yaw: f32,
        pitch: f32,
        sanity: f32,
        stamina: f32,
        level: LevelId,
    ) -> Self {
        Self {
            version: SAVE_VERSION,
            position,
            yaw,
            pitch,
            sanity,
            stamina,
            level,
        }
    }
}

/// Write a snapshot to a writer
pub fn save_state<W: Write>(writer: W, state: &SaveState) -> Result<(), SaveError> {
    bincode::serialize_into(writer, state)?;
    Ok(())
}

/// Read a snapshot back from a reader
pub fn load_state<R: Read>(reader: R) -> Result<SaveState, SaveError> {
    let state: SaveState = bincode::deserialize_from(reader)?;
    if state.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: state.version,
        });
    }
    Ok(state)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
