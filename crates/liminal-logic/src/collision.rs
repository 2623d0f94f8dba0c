//! Movement collision - radius-expanded point-in-box tests and the
//! axis-separated sweep.
//!
//! Algorithm: "test per axis, revert per axis"
//! 1. Try the X component of the move alone; revert X if any box blocks it
//! 2. Try the Z component from the already-resolved X; revert Z if blocked
//! 3. Y is never touched - player height is fixed
//!
//! Reverting axes independently is what makes diagonal wall-sliding work:
//! a move into a wall keeps its tangential component.

use crate::geometry::{Aabb, Vec3};

/// True if a point (treated as a sphere of `radius`) penetrates any box.
/// An empty box set trivially reports no collision.
pub fn blocked<'a, I>(point: &Vec3, radius: f32, boxes: I) -> bool
where
    I: IntoIterator<Item = &'a Aabb>,
{
    boxes
        .into_iter()
        .any(|b| b.expanded(radius).contains_point(point))
}

/// Resolve a desired move against a set of colliders.
///
/// Returns the corrected position: desired where free, per-axis reverted to
/// `current` where blocked. Both axis tests walk the full box list, so the
/// caller should pass something cheaply re-iterable.
pub fn resolve_movement(current: &Vec3, desired: &Vec3, radius: f32, boxes: &[Aabb]) -> Vec3 {
    let mut result = *desired;

    let test_x = Vec3::new(result.x, current.y, current.z);
    if blocked(&test_x, radius, boxes) {
        result.x = current.x;
    }

    let test_xz = Vec3::new(result.x, current.y, result.z);
    if blocked(&test_xz, radius, boxes) {
        result.z = current.z;
    }

    Vec3::new(result.x, current.y, result.z)
}

/// Ray/box intersection (slab method). Returns the entry distance along
/// `dir`, or `None` for a miss. `dir` must be normalized; hits behind the
/// origin are misses.
pub fn ray_aabb(origin: &Vec3, dir: &Vec3, aabb: &Aabb) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let (o, d, lo, hi) = match axis {
            0 => (origin.x, dir.x, aabb.min.x, aabb.max.x),
            1 => (origin.y, dir.y, aabb.min.y, aabb.max.y),
            _ => (origin.z, dir.z, aabb.min.z, aabb.max.z),
        };
        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_at_x(x: f32) -> Aabb {
        // Thin wall spanning z, like a cell boundary wall
        Aabb::from_center_size(Vec3::new(x, 2.6, 0.0), Vec3::new(0.4, 5.25, 14.0))
    }

    #[test]
    fn test_empty_world_accepts_any_move() {
        let current = Vec3::new(0.0, 1.75, 0.0);
        let desired = Vec3::new(3.0, 1.75, -2.0);
        let resolved = resolve_movement(&current, &desired, 0.6, &[]);
        assert_eq!(resolved, desired);
    }

    #[test]
    fn test_blocked_x_slides_along_z() {
        let boxes = [wall_at_x(2.0)];
        let current = Vec3::new(0.5, 1.75, 0.0);
        // Diagonal move into the wall: X crosses it, Z is free
        let desired = Vec3::new(1.9, 1.75, 1.5);
        let resolved = resolve_movement(&current, &desired, 0.6, &boxes);
        assert_eq!(resolved.x, current.x, "X should revert against the wall");
        assert_eq!(resolved.z, desired.z, "Z should slide freely");
    }

    #[test]
    fn test_fully_blocked_corner() {
        let boxes = [
            wall_at_x(1.0),
            Aabb::from_center_size(Vec3::new(0.0, 2.6, 1.0), Vec3::new(14.0, 5.25, 0.4)),
        ];
        let current = Vec3::new(0.0, 1.75, 0.0);
        let desired = Vec3::new(0.9, 1.75, 0.9);
        let resolved = resolve_movement(&current, &desired, 0.6, &boxes);
        assert_eq!(resolved, current);
    }

    #[test]
    fn test_radius_expansion() {
        let boxes = [wall_at_x(2.0)];
        let current = Vec3::new(0.0, 1.75, 0.0);
        // Stops short of the wall itself, but within the 0.6 radius band
        let desired = Vec3::new(1.3, 1.75, 0.0);
        let resolved = resolve_movement(&current, &desired, 0.6, &boxes);
        assert_eq!(resolved.x, 0.0);

        // A zero-radius point at the same spot is fine
        let resolved = resolve_movement(&current, &desired, 0.0, &boxes);
        assert_eq!(resolved.x, 1.3);
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 1.0, -5.0), Vec3::new(1.0, 1.0, 1.0));
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        let t = ray_aabb(&origin, &dir, &aabb).expect("should hit");
        assert!((t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 1.0, 5.0), Vec3::new(1.0, 1.0, 1.0));
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert!(ray_aabb(&origin, &dir, &aabb).is_none());
    }

    #[test]
    fn test_ray_origin_inside_box() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0));
        let origin = Vec3::ZERO;
        let dir = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(ray_aabb(&origin, &dir, &aabb), Some(0.0));
    }

    #[test]
    fn test_ray_parallel_slab_miss() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 5.0, -3.0), Vec3::new(1.0, 1.0, 1.0));
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        // Box is above the ray's y plane
        assert!(ray_aabb(&origin, &dir, &aabb).is_none());
    }

    #[test]
    fn test_y_never_changes() {
        let boxes = [wall_at_x(2.0)];
        let current = Vec3::new(0.0, 1.75, 0.0);
        let desired = Vec3::new(0.5, 99.0, 0.5);
        let resolved = resolve_movement(&current, &desired, 0.6, &boxes);
        assert_eq!(resolved.y, 1.75);
    }
}
