//! Enemy agent update - pursuit inside the detect radius, timed wandering
//! outside it, plus the per-variant quirks (sprint burst, teleport).
//!
//! Velocities are exponentially smoothed toward their target rather than set
//! directly, so agents bank into direction changes instead of snapping.

use hecs::World;
use liminal_logic::constants::enemy::*;
use liminal_logic::geometry::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::components::{Enemy, EnemyKind, Position, Velocity, Wander};

/// Aggregate outcome of one enemy tick.
#[derive(Debug, Clone, Copy)]
pub struct EnemyTickResult {
    /// Distance to the closest agent, `f32::INFINITY` with none alive.
    pub nearest_dist: f32,
    /// True if any agent closed within its damage radius.
    pub player_caught: bool,
}

/// Advance every enemy agent by one tick.
pub fn update_enemies(
    world: &mut World,
    player_pos: &Vec3,
    dt: f32,
    rng: &mut impl Rng,
) -> EnemyTickResult {
    let mut result = EnemyTickResult {
        nearest_dist: f32::INFINITY,
        player_caught: false,
    };

    for (_, (enemy, pos, vel, wander)) in
        world.query_mut::<(&mut Enemy, &mut Position, &mut Velocity, &mut Wander)>()
    {
        enemy.burst_timer = (enemy.burst_timer - dt).max(0.0);
        enemy.teleport_cooldown = (enemy.teleport_cooldown - dt).max(0.0);

        let to_player = (*player_pos - pos.0).flattened();
        let dist = to_player.length();

        if dist < enemy.detect {
            pursue(enemy, pos, vel, player_pos, to_player, dist, dt, rng);
        } else {
            wander_step(enemy, wander, vel, dt, rng);
        }

        pos.0 = pos.0 + vel.0 * dt;
        pos.0.y = EYE_HEIGHT;

        result.nearest_dist = result.nearest_dist.min(dist);
        if dist < enemy.damage_radius {
            result.player_caught = true;
        }
    }

    result
}

#[allow(clippy::too_many_arguments)]
fn pursue(
    enemy: &mut Enemy,
    pos: &mut Position,
    vel: &mut Velocity,
    player_pos: &Vec3,
    to_player: Vec3,
    dist: f32,
    dt: f32,
    rng: &mut impl Rng,
) {
    let dir = if dist > 1e-6 {
        to_player * (1.0 / dist)
    } else {
        Vec3::ZERO
    };

    let mut speed = if dist < CHASE_DISTANCE {
        enemy.chase
    } else {
        enemy.walk
    };

    match enemy.kind {
        EnemyKind::Sprinter => {
            // Burst arms at close range; no retrigger while one is active
            if enemy.burst_timer <= 0.0 && dist < enemy.detect * SPRINT_TRIGGER_FRACTION {
                enemy.burst_timer = SPRINT_BURST_DURATION;
            }
            if enemy.burst_timer > 0.0 {
                speed *= SPRINT_BURST_FACTOR;
            }
        }
        EnemyKind::Lurker => {
            if enemy.teleport_cooldown <= 0.0 && rng.gen::<f32>() < LURK_TELEPORT_RATE * dt {
                // Re-appear past the player along the current approach line
                pos.0 = *player_pos + dir * LURK_BEHIND_DISTANCE;
                pos.0.y = EYE_HEIGHT;
                enemy.teleport_cooldown = LURK_TELEPORT_COOLDOWN;
                vel.0 = Vec3::ZERO;
            }
        }
        EnemyKind::Stalker => {}
    }

    vel.0 = vel.0.lerp(&(dir * speed), PURSUE_LERP);
    enemy.yaw = to_player.x.atan2(to_player.z);
}

fn wander_step(enemy: &mut Enemy, wander: &mut Wander, vel: &mut Velocity, dt: f32, rng: &mut impl Rng) {
    wander.timer -= dt;
    if wander.timer <= 0.0 {
        wander.timer = WANDER_TIMER_MIN + rng.gen::<f32>() * WANDER_TIMER_JITTER;
        let angle = rng.gen::<f32>() * TAU;
        wander.dir = Vec3::new(angle.sin(), 0.0, angle.cos()) * enemy.walk;
        enemy.yaw = angle;
    }
    vel.0 = vel.0.lerp(&wander.dir, WANDER_LERP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn spawn(world: &mut World, enemy: Enemy, pos: Vec3) -> hecs::Entity {
        world.spawn((enemy, Position(pos), Velocity::default(), Wander::default()))
    }

    fn position(world: &World, entity: hecs::Entity) -> Vec3 {
        world.get::<&Position>(entity).expect("position").0
    }

    #[test]
    fn test_pursuit_closes_distance() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let player = Vec3::new(0.0, 1.75, 0.0);
        let e = spawn(&mut world, Enemy::stalker(), Vec3::new(0.0, 1.75, -12.0));

        let start = position(&world, e).distance(&player);
        for _ in 0..120 {
            update_enemies(&mut world, &player, DT, &mut rng);
        }
        let end = position(&world, e).distance(&player);
        assert!(end < start, "pursuing agent should approach: {} -> {}", start, end);
    }

    #[test]
    fn test_out_of_range_agent_wanders() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        let player = Vec3::new(0.0, 1.75, 0.0);
        // Well outside the 18m stalker detect radius
        let e = spawn(&mut world, Enemy::stalker(), Vec3::new(100.0, 1.75, 100.0));

        let start = position(&world, e).distance(&player);
        for _ in 0..600 {
            update_enemies(&mut world, &player, DT, &mut rng);
        }
        let pos = position(&world, e);
        // Moved somewhere, stayed pinned to eye height, did not home in
        assert_ne!(pos, Vec3::new(100.0, 1.75, 100.0));
        assert_eq!(pos.y, EYE_HEIGHT);
        assert!(pos.distance(&player) > start - 20.0);
    }

    #[test]
    fn test_nearest_distance_tracks_closest() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);
        let player = Vec3::new(0.0, 1.75, 0.0);
        spawn(&mut world, Enemy::stalker(), Vec3::new(0.0, 1.75, -50.0));
        spawn(&mut world, Enemy::sprinter(), Vec3::new(7.0, 1.75, 0.0));

        let result = update_enemies(&mut world, &player, DT, &mut rng);
        assert!((result.nearest_dist - 7.0).abs() < 0.1);
        assert!(!result.player_caught);
    }

    #[test]
    fn test_empty_world_reports_infinity() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(4);
        let result = update_enemies(&mut world, &Vec3::ZERO, DT, &mut rng);
        assert_eq!(result.nearest_dist, f32::INFINITY);
        assert!(!result.player_caught);
    }

    #[test]
    fn test_contact_kills() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(5);
        let player = Vec3::new(0.0, 1.75, 0.0);
        spawn(&mut world, Enemy::stalker(), Vec3::new(0.0, 1.75, -2.0));

        let result = update_enemies(&mut world, &player, DT, &mut rng);
        assert!(result.player_caught);
    }

    #[test]
    fn test_sprint_burst_arms_once_at_close_range() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(6);
        let player = Vec3::new(0.0, 1.75, 0.0);
        // Inside 0.4 * 14.0 = 5.6m trigger range
        let e = spawn(&mut world, Enemy::sprinter(), Vec3::new(0.0, 1.75, -5.0));

        update_enemies(&mut world, &player, DT, &mut rng);
        let timer = world.get::<&Enemy>(e).unwrap().burst_timer;
        assert!((timer - SPRINT_BURST_DURATION).abs() < 1e-6);

        // A tick later the timer has only counted down, not re-armed
        update_enemies(&mut world, &player, DT, &mut rng);
        let timer2 = world.get::<&Enemy>(e).unwrap().burst_timer;
        assert!(timer2 < timer);
        assert!(timer2 > 0.0);
    }

    #[test]
    fn test_far_sprinter_never_bursts() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let player = Vec3::new(0.0, 1.75, 0.0);
        // Pursuing (< 14m) but outside the 5.6m burst range
        let e = spawn(&mut world, Enemy::sprinter(), Vec3::new(0.0, 1.75, -12.0));

        update_enemies(&mut world, &player, DT, &mut rng);
        assert_eq!(world.get::<&Enemy>(e).unwrap().burst_timer, 0.0);
    }

    #[test]
    fn test_lurker_teleports_behind_player() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(8);
        let player = Vec3::new(0.0, 1.75, 0.0);
        let e = spawn(&mut world, Enemy::lurker(), Vec3::new(0.0, 1.75, -12.0));

        let mut teleported = false;
        for _ in 0..4000 {
            let before = position(&world, e);
            update_enemies(&mut world, &player, 0.05, &mut rng);
            let after = position(&world, e);
            if before.distance(&after) > 1.0 {
                teleported = true;
                // Landed on the far side of the player from the approach
                assert!(after.z > 0.0, "expected overshoot past the player: {:?}", after);
                assert!((after.distance(&player) - LURK_BEHIND_DISTANCE).abs() < 0.1);
                break;
            }
            // Keep it from actually catching up and muddying the geometry
            world.get::<&mut Position>(e).unwrap().0 = Vec3::new(0.0, 1.75, -12.0);
            world.get::<&mut Velocity>(e).unwrap().0 = Vec3::ZERO;
        }
        assert!(teleported, "lurker never teleported in 200 simulated seconds");

        let cooldown = world.get::<&Enemy>(e).unwrap().teleport_cooldown;
        assert!(cooldown > LURK_TELEPORT_COOLDOWN - 1.0);
    }

    #[test]
    fn test_yaw_faces_player_while_pursuing() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(9);
        let player = Vec3::new(5.0, 1.75, 5.0);
        let e = spawn(&mut world, Enemy::stalker(), Vec3::new(0.0, 1.75, 0.0));

        update_enemies(&mut world, &player, DT, &mut rng);
        let yaw = world.get::<&Enemy>(e).unwrap().yaw;
        assert!((yaw - 5.0f32.atan2(5.0)).abs() < 1e-5);
    }
}
