//! Maze cell generation - synthesizes one grid cell's geometry and colliders.
//!
//! A cell is either a rare open hall with a single long wall, or a normal
//! room with 3-7 inner walls and up to 3 pillars, plus at most one floor pit.
//! Pits are cosmetic voids: the visual box sinks below the floor and four
//! invisible guard walls seal the edge so the player can never fall in.
//!
//! All randomness comes from the coordinate-seeded cell RNG, so regenerating
//! a cell after eviction reproduces it exactly.

use liminal_logic::cellrng::Mulberry32;
use liminal_logic::constants::world::*;
use liminal_logic::geometry::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// Integer grid coordinate of a streamed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub ix: i32,
    pub iz: i32,
}

impl CellCoord {
    pub fn new(ix: i32, iz: i32) -> Self {
        Self { ix, iz }
    }

    /// Cell containing a world-space position.
    pub fn from_world(pos: &Vec3, cell_size: f32) -> Self {
        Self {
            ix: (pos.x / cell_size).floor() as i32,
            iz: (pos.z / cell_size).floor() as i32,
        }
    }
}

/// Role of a generated mesh - the render sink maps these to materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshKind {
    Floor,
    Ceiling,
    OuterWall,
    InnerWall,
    /// Inner wall carrying a cosmetic door tag.
    DoorWall,
    Pillar,
    /// Black void box sunk below the floor. No collider.
    PitVisual,
    /// Invisible wall sealing a pit edge. Collider only.
    PitGuard,
}

impl MeshKind {
    /// Whether this mesh contributes a collider box.
    fn collides(&self) -> bool {
        !matches!(self, MeshKind::Floor | MeshKind::Ceiling | MeshKind::PitVisual)
    }
}

/// One axis-aligned mesh in world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeshSpec {
    pub kind: MeshKind,
    pub center: Vec3,
    pub size: Vec3,
}

/// A generated cell: mesh specs plus their collider boxes, as one atomic
/// unit so the streaming manager can remove exactly what it added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCell {
    pub coord: CellCoord,
    pub meshes: Vec<MeshSpec>,
    pub colliders: Vec<Aabb>,
}

/// Dimensions used for cell synthesis.
#[derive(Debug, Clone, Copy)]
pub struct CellConfig {
    pub cell_size: f32,
    pub wall_height: f32,
}

impl CellConfig {
    pub fn new(cell_size: f32, player_height: f32) -> Self {
        Self {
            cell_size,
            wall_height: player_height * WALL_HEIGHT_FACTOR,
        }
    }
}

/// Generate one cell's geometry and colliders.
pub fn generate_cell(coord: CellCoord, cfg: &CellConfig) -> GeneratedCell {
    let cs = cfg.cell_size;
    let h = cfg.wall_height;
    let origin = Vec3::new(coord.ix as f32 * cs, 0.0, coord.iz as f32 * cs);
    let mut meshes = Vec::new();

    let push = |meshes: &mut Vec<MeshSpec>, kind, local: Vec3, size: Vec3| {
        meshes.push(MeshSpec {
            kind,
            center: origin + local,
            size,
        });
    };

    // Floor and ceiling planes
    push(&mut meshes, MeshKind::Floor, Vec3::ZERO, Vec3::new(cs, 0.0, cs));
    push(&mut meshes, MeshKind::Ceiling, Vec3::new(0.0, h, 0.0), Vec3::new(cs, 0.0, cs));

    // Outer boundary walls - always present, neighbors hide them visually
    let t = WALL_THICKNESS;
    push(&mut meshes, MeshKind::OuterWall, Vec3::new(0.0, h / 2.0, -cs / 2.0), Vec3::new(cs, h, t));
    push(&mut meshes, MeshKind::OuterWall, Vec3::new(0.0, h / 2.0, cs / 2.0), Vec3::new(cs, h, t));
    push(&mut meshes, MeshKind::OuterWall, Vec3::new(-cs / 2.0, h / 2.0, 0.0), Vec3::new(t, h, cs));
    push(&mut meshes, MeshKind::OuterWall, Vec3::new(cs / 2.0, h / 2.0, 0.0), Vec3::new(t, h, cs));

    let mut rng = Mulberry32::for_cell(coord.ix, coord.iz);

    // Inner walls - open halls are rare and get a single long wall
    let is_hall = rng.next_f32() > HALL_THRESHOLD;
    let inner_count = if is_hall {
        1
    } else {
        (3.0 + rng.next_f32() * 5.0) as usize
    };
    let margin = cs * 0.4;
    for _ in 0..inner_count {
        let length = 3.0 + rng.next_f32() * (cs * 0.5);
        let horizontal = rng.next_f32() > 0.5;
        let size = if horizontal {
            Vec3::new(length, h, t)
        } else {
            Vec3::new(t, h, length)
        };
        let x = (rng.next_f32() - 0.5) * (cs - margin);
        let z = (rng.next_f32() - 0.5) * (cs - margin);
        let kind = if rng.next_f32() < DOOR_TAG_CHANCE {
            MeshKind::DoorWall
        } else {
            MeshKind::InnerWall
        };
        push(&mut meshes, kind, Vec3::new(x, h / 2.0, z), size);
    }

    // Pillars
    let pillar_count = (rng.next_f32() * 4.0) as usize;
    for _ in 0..pillar_count {
        let x = (rng.next_f32() - 0.5) * (cs * 0.8);
        let z = (rng.next_f32() - 0.5) * (cs * 0.8);
        push(&mut meshes, MeshKind::Pillar, Vec3::new(x, h / 2.0, z), Vec3::new(1.0, h, 1.0));
    }

    // Floor pits - sealed cosmetic voids
    let pit_count = (rng.next_f32() * 2.0) as usize;
    for _ in 0..pit_count {
        let px = (rng.next_f32() - 0.5) * cs * 0.6;
        let pz = (rng.next_f32() - 0.5) * cs * 0.6;
        push(
            &mut meshes,
            MeshKind::PitVisual,
            Vec3::new(px, -PIT_DEPTH / 2.0, pz),
            Vec3::new(PIT_SIZE, PIT_DEPTH, PIT_SIZE),
        );
        let half = PIT_SIZE / 2.0;
        let guard_t = 0.1;
        push(&mut meshes, MeshKind::PitGuard, Vec3::new(px, h / 2.0, pz - half), Vec3::new(PIT_SIZE, h, guard_t));
        push(&mut meshes, MeshKind::PitGuard, Vec3::new(px, h / 2.0, pz + half), Vec3::new(PIT_SIZE, h, guard_t));
        push(&mut meshes, MeshKind::PitGuard, Vec3::new(px + half, h / 2.0, pz), Vec3::new(guard_t, h, PIT_SIZE));
        push(&mut meshes, MeshKind::PitGuard, Vec3::new(px - half, h / 2.0, pz), Vec3::new(guard_t, h, PIT_SIZE));
    }

    // Every mesh except floor, ceiling, and the pit visual contributes
    // exactly one collider from its world bounds.
    let colliders = meshes
        .iter()
        .filter(|m| m.kind.collides())
        .map(|m| Aabb::from_center_size(m.center, m.size))
        .collect();

    GeneratedCell {
        coord,
        meshes,
        colliders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CellConfig {
        CellConfig::new(14.0, 1.75)
    }

    #[test]
    fn test_cell_coord_from_world() {
        assert_eq!(CellCoord::from_world(&Vec3::new(0.0, 1.75, 0.0), 14.0), CellCoord::new(0, 0));
        assert_eq!(CellCoord::from_world(&Vec3::new(14.0, 0.0, -0.1), 14.0), CellCoord::new(1, -1));
        assert_eq!(CellCoord::from_world(&Vec3::new(-0.1, 0.0, 27.9), 14.0), CellCoord::new(-1, 1));
    }

    #[test]
    fn test_generation_is_deterministic() {
        for &(ix, iz) in &[(0, 0), (5, -3), (-17, 42), (1000, -1000)] {
            let a = generate_cell(CellCoord::new(ix, iz), &cfg());
            let b = generate_cell(CellCoord::new(ix, iz), &cfg());
            assert_eq!(a.colliders, b.colliders, "cell ({}, {}) not deterministic", ix, iz);
            assert_eq!(a.meshes.len(), b.meshes.len());
        }
    }

    #[test]
    fn test_outer_walls_always_present() {
        let cell = generate_cell(CellCoord::new(3, 7), &cfg());
        let outer = cell.meshes.iter().filter(|m| m.kind == MeshKind::OuterWall).count();
        assert_eq!(outer, 4);
    }

    #[test]
    fn test_inner_wall_counts() {
        for ix in -20..20 {
            for iz in -20..20 {
                let cell = generate_cell(CellCoord::new(ix, iz), &cfg());
                let inner = cell
                    .meshes
                    .iter()
                    .filter(|m| matches!(m.kind, MeshKind::InnerWall | MeshKind::DoorWall))
                    .count();
                assert!((1..=7).contains(&inner), "cell ({}, {}) has {} inner walls", ix, iz, inner);
                let pillars = cell.meshes.iter().filter(|m| m.kind == MeshKind::Pillar).count();
                assert!(pillars <= 3);
                let pits = cell.meshes.iter().filter(|m| m.kind == MeshKind::PitVisual).count();
                assert!(pits <= 1);
            }
        }
    }

    #[test]
    fn test_collider_per_solid_mesh() {
        let cell = generate_cell(CellCoord::new(-2, 9), &cfg());
        let solid = cell.meshes.iter().filter(|m| m.kind.collides()).count();
        assert_eq!(cell.colliders.len(), solid);
        // Floor, ceiling, and pit visuals never collide
        assert!(solid < cell.meshes.len());
    }

    #[test]
    fn test_pits_are_sealed() {
        // Find a cell with a pit and confirm its four guard walls exist
        for ix in 0..50 {
            let cell = generate_cell(CellCoord::new(ix, 0), &cfg());
            let pits = cell.meshes.iter().filter(|m| m.kind == MeshKind::PitVisual).count();
            if pits == 1 {
                let guards = cell.meshes.iter().filter(|m| m.kind == MeshKind::PitGuard).count();
                assert_eq!(guards, 4);
                return;
            }
        }
        panic!("no cell with a pit found in 50 cells");
    }

    #[test]
    fn test_geometry_stays_in_cell_bounds() {
        let cell = generate_cell(CellCoord::new(4, 4), &cfg());
        let cs = 14.0;
        let cx = 4.0 * cs;
        for m in &cell.meshes {
            // Inner geometry centers stay inside the cell footprint
            assert!((m.center.x - cx).abs() <= cs / 2.0 + 0.01);
            assert!((m.center.z - cx).abs() <= cs / 2.0 + 0.01);
        }
    }
}
