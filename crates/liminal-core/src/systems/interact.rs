//! Interaction resolution - a single eye ray against every interactable's
//! box, nearest hit wins, and the hit must land inside the entity's own
//! trigger radius. A level collider in front of the hit occludes it, so a
//! pickup cannot be grabbed through a wall.
//!
//! Pickups apply their effect and despawn; doors report the transition and
//! persist. The engine owns acting on a `LevelSwitch`.

use hecs::{Entity, World};
use liminal_logic::collision::ray_aabb;
use liminal_logic::constants::survival::MEDKIT_RESTORE;
use liminal_logic::constants::world::INTERACT_RANGE;
use liminal_logic::geometry::{Aabb, Vec3};
use liminal_logic::stats::clamp_stat;
use log::debug;

use crate::components::{EntityKind, Interactable, PickupKind, Position};
use crate::generation::LevelId;
use crate::systems::player::{Flashlight, PlayerState};

/// What an interact request resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractOutcome {
    /// Nothing in reach along the view ray.
    Nothing,
    /// A pickup was consumed.
    Pickup { kind: PickupKind, prompt: String },
    /// A door was used; the caller performs the switch.
    LevelSwitch { target: LevelId, prompt: String },
}

/// Cast the view ray and resolve the nearest interactable it hits.
/// `obstacles` is the live collider set; a box strictly in front of the hit
/// blocks it. An entity's own collider sits at the same distance and does
/// not count.
pub fn resolve_interact(
    world: &mut World,
    player: &mut PlayerState,
    flashlight: &mut Flashlight,
    obstacles: &[Aabb],
) -> InteractOutcome {
    let origin = player.position;
    let dir = player.forward();

    let mut best: Option<(f32, Entity)> = None;
    for (entity, (item, pos)) in world.query::<(&Interactable, &Position)>().iter() {
        let bounds = Aabb::new(pos.0 - item.half_extents, pos.0 + item.half_extents);
        if let Some(t) = ray_aabb(&origin, &dir, &bounds) {
            if t <= INTERACT_RANGE
                && t <= item.radius
                && !occluded(&origin, &dir, t, obstacles)
                && best.map_or(true, |(bt, _)| t < bt)
            {
                best = Some((t, entity));
            }
        }
    }

    let Some((t, entity)) = best else {
        return InteractOutcome::Nothing;
    };

    let item = match world.get::<&Interactable>(entity) {
        Ok(item) => Interactable::clone(&item),
        Err(_) => return InteractOutcome::Nothing,
    };
    debug!("interact hit {:?} at {:.2}m", item.kind, t);

    match item.kind {
        EntityKind::Pickup(kind) => {
            match kind {
                PickupKind::Battery => flashlight.boost(),
                PickupKind::Medkit => {
                    player.sanity = clamp_stat(player.sanity + MEDKIT_RESTORE);
                    player.stamina = clamp_stat(player.stamina + MEDKIT_RESTORE);
                }
                PickupKind::Note => {}
            }
            // hecs despawn only fails for a stale entity id
            let _ = world.despawn(entity);
            InteractOutcome::Pickup {
                kind,
                prompt: item.prompt,
            }
        }
        EntityKind::Door(target) => InteractOutcome::LevelSwitch {
            target,
            prompt: item.prompt,
        },
    }
}

fn occluded(origin: &Vec3, dir: &Vec3, hit_t: f32, obstacles: &[Aabb]) -> bool {
    obstacles
        .iter()
        .any(|b| ray_aabb(origin, dir, b).map_or(false, |t| t < hit_t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use liminal_logic::geometry::Vec3;

    fn spawn_pickup(world: &mut World, kind: PickupKind, pos: Vec3) -> Entity {
        world.spawn((
            Interactable::pickup(kind, "item", Vec3::new(0.3, 0.3, 0.3)),
            Position(pos),
        ))
    }

    fn looking_at_origin_minus_z() -> PlayerState {
        // Default player faces -Z from (0, 1.75, 0)
        PlayerState::default()
    }

    #[test]
    fn test_nothing_in_reach() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        // Behind the player
        spawn_pickup(&mut world, PickupKind::Note, Vec3::new(0.0, 1.75, 2.0));
        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert_eq!(outcome, InteractOutcome::Nothing);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_out_of_radius_hit_is_ignored() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        // Dead ahead but 6m away, past the 2.5m trigger radius
        spawn_pickup(&mut world, PickupKind::Note, Vec3::new(0.0, 1.75, -6.0));
        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert_eq!(outcome, InteractOutcome::Nothing);
    }

    #[test]
    fn test_medkit_restores_and_despawns() {
        let mut world = World::new();
        let mut player = PlayerState {
            sanity: 50.0,
            stamina: 95.0,
            ..Default::default()
        };
        let mut light = Flashlight::default();
        spawn_pickup(&mut world, PickupKind::Medkit, Vec3::new(0.0, 1.75, -1.5));

        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert!(matches!(
            outcome,
            InteractOutcome::Pickup { kind: PickupKind::Medkit, .. }
        ));
        assert_eq!(player.sanity, 70.0);
        // Clamped at the cap
        assert_eq!(player.stamina, 100.0);
        assert_eq!(world.len(), 0);

        // Second press finds nothing
        let again = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert_eq!(again, InteractOutcome::Nothing);
        assert_eq!(player.sanity, 70.0);
    }

    #[test]
    fn test_battery_boosts_flashlight() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        spawn_pickup(&mut world, PickupKind::Battery, Vec3::new(0.0, 1.75, -1.5));

        resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert!(light.distance > Flashlight::default().distance);
        assert!(light.intensity > Flashlight::default().intensity);
    }

    #[test]
    fn test_door_reports_switch_and_persists() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        world.spawn((
            Interactable::door(LevelId::Backrooms, "Enter Level 0", Vec3::new(1.0, 1.6, 0.05)),
            Position(Vec3::new(0.0, 1.6, -2.0)),
        ));

        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert!(matches!(
            outcome,
            InteractOutcome::LevelSwitch { target: LevelId::Backrooms, .. }
        ));
        // Doors are not consumed
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_wall_occludes_pickup() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        // In radius and dead ahead, but a wall stands in between
        spawn_pickup(&mut world, PickupKind::Medkit, Vec3::new(0.0, 1.75, -2.0));
        let wall = Aabb::from_center_size(Vec3::new(0.0, 1.75, -1.0), Vec3::new(4.0, 4.0, 0.4));

        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[wall]);
        assert_eq!(outcome, InteractOutcome::Nothing);
        assert_eq!(world.len(), 1);

        // Same reach with the wall gone succeeds
        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert!(matches!(outcome, InteractOutcome::Pickup { .. }));
    }

    #[test]
    fn test_door_collider_does_not_occlude_itself() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        // Doors are solid: the interactable and a collider share one box
        let center = Vec3::new(0.0, 1.6, -2.0);
        let size = Vec3::new(2.0, 3.2, 0.1);
        world.spawn((
            Interactable::door(LevelId::Backrooms, "Enter Level 0", size * 0.5),
            Position(center),
        ));
        let own_collider = Aabb::from_center_size(center, size);

        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[own_collider]);
        assert!(matches!(outcome, InteractOutcome::LevelSwitch { .. }));
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut world = World::new();
        let mut player = looking_at_origin_minus_z();
        let mut light = Flashlight::default();
        spawn_pickup(&mut world, PickupKind::Note, Vec3::new(0.0, 1.75, -2.0));
        let near = spawn_pickup(&mut world, PickupKind::Medkit, Vec3::new(0.0, 1.75, -1.0));

        let outcome = resolve_interact(&mut world, &mut player, &mut light, &[]);
        assert!(matches!(
            outcome,
            InteractOutcome::Pickup { kind: PickupKind::Medkit, .. }
        ));
        assert!(world.get::<&Interactable>(near).is_err());
    }
}
