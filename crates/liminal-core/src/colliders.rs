//! The live collider set - every box currently blocking movement.
//!
//! Invariant: every box belongs either to exactly one active cell or to the
//! static level geometry. Removing a cell removes exactly its boxes and no
//! others. A flat cache is rebuilt on mutation so the per-tick collision
//! sweep iterates a plain slice.

use crate::generation::CellCoord;
use liminal_logic::geometry::Aabb;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ColliderSet {
    statics: Vec<Aabb>,
    cells: HashMap<CellCoord, Vec<Aabb>>,
    flat: Vec<Aabb>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the static (non-streamed) level geometry.
    pub fn set_statics(&mut self, boxes: Vec<Aabb>) {
        self.statics = boxes;
        self.rebuild();
    }

    /// Register a cell's boxes. A cell registered twice keeps only the
    /// latest registration.
    pub fn add_cell(&mut self, coord: CellCoord, boxes: Vec<Aabb>) {
        self.cells.insert(coord, boxes);
        self.rebuild();
    }

    /// Remove exactly the named cell's boxes. Returns how many were removed.
    pub fn remove_cell(&mut self, coord: &CellCoord) -> usize {
        let removed = self.cells.remove(coord).map(|b| b.len()).unwrap_or(0);
        if removed > 0 {
            self.rebuild();
        }
        removed
    }

    pub fn cell_box_count(&self, coord: &CellCoord) -> usize {
        self.cells.get(coord).map(|b| b.len()).unwrap_or(0)
    }

    /// Drop everything - level switch or disposal.
    pub fn clear(&mut self) {
        self.statics.clear();
        self.cells.clear();
        self.flat.clear();
    }

    /// Drop only the streamed cells, keeping static geometry.
    pub fn clear_cells(&mut self) {
        self.cells.clear();
        self.rebuild();
    }

    /// All live boxes as one slice for the collision sweep.
    pub fn boxes(&self) -> &[Aabb] {
        &self.flat
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    fn rebuild(&mut self) {
        self.flat.clear();
        self.flat.extend_from_slice(&self.statics);
        for boxes in self.cells.values() {
            self.flat.extend_from_slice(boxes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liminal_logic::geometry::Vec3;

    fn boxes(n: usize, tag: f32) -> Vec<Aabb> {
        (0..n)
            .map(|i| {
                Aabb::from_center_size(
                    Vec3::new(i as f32, tag, 0.0),
                    Vec3::new(1.0, 1.0, 1.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_removal_is_exact() {
        let mut set = ColliderSet::new();
        set.set_statics(boxes(2, 0.0));
        set.add_cell(CellCoord::new(0, 0), boxes(5, 1.0));
        set.add_cell(CellCoord::new(1, 0), boxes(7, 2.0));
        assert_eq!(set.len(), 14);

        let removed = set.remove_cell(&CellCoord::new(0, 0));
        assert_eq!(removed, 5);
        assert_eq!(set.len(), 9);
        // The other cell's boxes and the statics are untouched
        assert_eq!(set.cell_box_count(&CellCoord::new(1, 0)), 7);
        assert!(set.boxes().iter().all(|b| b.center().y != 1.0));
    }

    #[test]
    fn test_remove_missing_cell_is_noop() {
        let mut set = ColliderSet::new();
        set.add_cell(CellCoord::new(0, 0), boxes(3, 0.0));
        assert_eq!(set.remove_cell(&CellCoord::new(9, 9)), 0);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_clear_cells_keeps_statics() {
        let mut set = ColliderSet::new();
        set.set_statics(boxes(4, 0.0));
        set.add_cell(CellCoord::new(0, 0), boxes(3, 1.0));
        set.clear_cells();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_empty_set() {
        let set = ColliderSet::new();
        assert!(set.is_empty());
        assert!(set.boxes().is_empty());
    }
}
