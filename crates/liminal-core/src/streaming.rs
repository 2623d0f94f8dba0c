//! Cell streaming - keeps a square ring of cells active around the player.
//!
//! Every tick the needed (2R+1)x(2R+1) neighborhood is diffed against the
//! active set: missing cells are generated and registered, out-of-range
//! cells are destroyed with exactly their colliders removed. Full teardown
//! is reserved for level switch, quality toggle, and disposal.

use crate::colliders::ColliderSet;
use crate::generation::{generate_cell, CellConfig, CellCoord};
use crate::ports::{GeometryHandle, WorldPort};
use liminal_logic::geometry::Vec3;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
struct ActiveCell {
    handle: GeometryHandle,
}

/// Streaming manager for one level's maze cells.
#[derive(Debug, Default)]
pub struct CellStream {
    active: HashMap<CellCoord, ActiveCell>,
}

impl CellStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, coord: &CellCoord) -> bool {
        self.active.contains_key(coord)
    }

    /// Re-evaluate the active set around the player position.
    pub fn update(
        &mut self,
        player_pos: &Vec3,
        radius: i32,
        cfg: &CellConfig,
        colliders: &mut ColliderSet,
        world: &mut dyn WorldPort,
    ) {
        let center = CellCoord::from_world(player_pos, cfg.cell_size);

        let mut needed = HashSet::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let coord = CellCoord::new(center.ix + dx, center.iz + dz);
                needed.insert(coord);
                if !self.active.contains_key(&coord) {
                    let cell = generate_cell(coord, cfg);
                    let handle = world.spawn_cell(&cell);
                    colliders.add_cell(coord, cell.colliders);
                    self.active.insert(coord, ActiveCell { handle });
                }
            }
        }

        let evicted: Vec<CellCoord> = self
            .active
            .keys()
            .filter(|coord| !needed.contains(coord))
            .copied()
            .collect();
        for coord in evicted {
            if let Some(cell) = self.active.remove(&coord) {
                world.destroy_cell(cell.handle);
                colliders.remove_cell(&coord);
            }
        }
    }

    /// Destroy every active cell - level switch, quality toggle, disposal.
    pub fn clear(&mut self, colliders: &mut ColliderSet, world: &mut dyn WorldPort) {
        for (coord, cell) in self.active.drain() {
            world.destroy_cell(cell.handle);
            colliders.remove_cell(&coord);
        }
    }
}
