//! Level layouts - which generator variant, enemies, and entities are active.

use crate::components::{Enemy, Interactable, PickupKind, Position, Velocity, Wander};
use hecs::World;
use liminal_logic::geometry::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// Selects the active level. Switching tears down and rebuilds all
/// level-scoped state but preserves player sanity/stamina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelId {
    /// Endless streamed maze of yellowed rooms.
    Backrooms,
    /// Static hillside with a fenced path leading to a house.
    Hill,
}

impl LevelId {
    /// Whether cells stream around the player on this level.
    pub fn is_streamed(&self) -> bool {
        matches!(self, LevelId::Backrooms)
    }
}

/// Static (non-streamed) content contributed by a level.
#[derive(Debug, Default)]
pub struct LevelContent {
    pub static_colliders: Vec<Aabb>,
}

/// Spawn a level's enemies and entities into the world and collect its
/// static colliders. The caller is responsible for having cleared the
/// previous level first.
pub fn build_level(world: &mut World, level: LevelId) -> LevelContent {
    match level {
        LevelId::Backrooms => build_backrooms(world),
        LevelId::Hill => build_hill(world),
    }
}

fn spawn_enemy(world: &mut World, enemy: Enemy, pos: Vec3) {
    world.spawn((enemy, Position(pos), Velocity::default(), Wander::default()));
}

fn build_backrooms(world: &mut World) -> LevelContent {
    spawn_enemy(world, Enemy::stalker(), Vec3::new(8.0, 1.75, -10.0));
    spawn_enemy(world, Enemy::sprinter(), Vec3::new(-12.0, 1.75, 6.0));
    spawn_enemy(world, Enemy::lurker(), Vec3::new(16.0, 1.75, 16.0));
    // All geometry streams in via the cell manager; nothing static here.
    LevelContent::default()
}

fn build_hill(world: &mut World) -> LevelContent {
    let mut content = LevelContent::default();
    let boxes = &mut content.static_colliders;

    let push = |boxes: &mut Vec<Aabb>, center: Vec3, size: Vec3| {
        boxes.push(Aabb::from_center_size(center, size));
    };

    // Ground planes
    push(boxes, Vec3::new(0.0, 0.0, 0.0), Vec3::new(400.0, 0.0, 400.0));
    push(boxes, Vec3::new(0.0, 0.01, 40.0), Vec3::new(4.0, 0.0, 200.0));

    // Fence rails along the path
    for x in [-3.0f32, 3.0] {
        push(boxes, Vec3::new(x, 0.8, 40.0), Vec3::new(0.15, 0.12, 200.0));
    }

    // Fence posts - path spans z in [-60, 140]
    for i in 0..40 {
        let z = -60.0 + (i as f32) * 5.0 + 2.5;
        let wobble = (i as f32 * 0.5).cos() * 0.1;
        for side in [-3.0f32, 3.0] {
            push(boxes, Vec3::new(side + wobble, 0.7, z), Vec3::new(0.15, 1.4, 0.15));
        }
    }

    // House at the end of the path
    push(boxes, Vec3::new(0.0, 2.5, 145.0), Vec3::new(10.0, 5.0, 8.0));
    push(boxes, Vec3::new(0.0, 6.5, 145.0), Vec3::new(13.0, 4.0, 13.0));
    push(boxes, Vec3::new(0.0, 0.5, 139.5), Vec3::new(4.0, 1.0, 3.0));

    // Front door - solid, and a transition back into the maze
    let door_center = Vec3::new(0.0, 1.6, 140.9);
    let door_size = Vec3::new(2.0, 3.2, 0.1);
    push(boxes, door_center, door_size);
    world.spawn((
        Interactable::door(LevelId::Backrooms, "Enter Level 0", door_size * 0.5),
        Position(door_center),
    ));

    // Pickups scattered along the way
    world.spawn((
        Interactable::pickup(PickupKind::Battery, "Flashlight battery", Vec3::new(0.25, 0.3, 0.25)),
        Position(Vec3::new(1.0, 0.6, -10.0)),
    ));
    world.spawn((
        Interactable::pickup(PickupKind::Medkit, "First aid kit", Vec3::new(0.4, 0.15, 0.3)),
        Position(Vec3::new(-1.0, 0.4, 20.0)),
    ));
    world.spawn((
        Interactable::pickup(PickupKind::Note, "Crumpled note", Vec3::new(0.2, 0.02, 0.15)),
        Position(Vec3::new(2.0, 0.5, 60.0)),
    ));

    spawn_enemy(world, Enemy::stalker(), Vec3::new(20.0, 1.75, 10.0));

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backrooms_population() {
        let mut world = World::new();
        let content = build_level(&mut world, LevelId::Backrooms);
        assert!(content.static_colliders.is_empty());
        assert_eq!(world.query::<&Enemy>().iter().count(), 3);
        assert_eq!(world.query::<&Interactable>().iter().count(), 0);
    }

    #[test]
    fn test_hill_population() {
        let mut world = World::new();
        let content = build_level(&mut world, LevelId::Hill);
        // Ground, path, 2 rails, 80 posts, house base/roof/porch, door
        assert_eq!(content.static_colliders.len(), 2 + 2 + 80 + 3 + 1);
        assert_eq!(world.query::<&Enemy>().iter().count(), 1);
        // Door plus three pickups
        assert_eq!(world.query::<&Interactable>().iter().count(), 4);
    }

    #[test]
    fn test_level_streaming_flags() {
        assert!(LevelId::Backrooms.is_streamed());
        assert!(!LevelId::Hill.is_streamed());
    }
}
