//! # Ray Module
//!
//! Ray and axis-aligned bounding box types for the block picking raycast,
//! with a slab-method intersection test that reports which face the ray
//! entered through.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, BLOCK_HALF_EXTENT};

/// A ray in world space. The direction is normalized on construction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
}

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// The bounding box of a block centred at `center`: one half extent out
    /// on every axis.
    pub fn block_at(center: Point3<f32>) -> Self {
        Aabb {
            min: Point3::new(
                center.x - BLOCK_HALF_EXTENT,
                center.y - BLOCK_HALF_EXTENT,
                center.z - BLOCK_HALF_EXTENT,
            ),
            max: Point3::new(
                center.x + BLOCK_HALF_EXTENT,
                center.y + BLOCK_HALF_EXTENT,
                center.z + BLOCK_HALF_EXTENT,
            ),
        }
    }

    /// Whether the point lies inside or on the box.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// The result of a ray entering an AABB from outside.
#[derive(Debug, Clone, Copy)]
pub struct AabbIntersection {
    /// Distance along the ray to the entry point.
    pub t_enter: f32,
    /// The face the ray entered through.
    pub side: BlockSide,
}

/// Slab-method intersection between a ray and an AABB.
///
/// Each axis clips the ray's parameter interval against the box's two
/// bounding planes; the box is hit when the interval stays non-empty. The
/// entry face is the face of the axis that clipped the interval's lower
/// bound last.
///
/// Returns `None` when the ray misses, when the box is entirely behind the
/// origin, or when the origin is already inside the box (entering from
/// inside has no well-defined face, so it is treated as a miss).
pub fn ray_aabb_intersection(ray: &Ray, aabb: &Aabb) -> Option<AabbIntersection> {
    let origin: [f32; 3] = [ray.origin.x, ray.origin.y, ray.origin.z];
    let direction: [f32; 3] = [ray.direction.x, ray.direction.y, ray.direction.z];
    let min: [f32; 3] = [aabb.min.x, aabb.min.y, aabb.min.z];
    let max: [f32; 3] = [aabb.max.x, aabb.max.y, aabb.max.z];

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut entry_axis = 0usize;

    for axis in 0..3 {
        if direction[axis].abs() < f32::EPSILON {
            // Parallel to the slab: miss unless the origin lies within it.
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction[axis];
        let mut t1 = (min[axis] - origin[axis]) * inv;
        let mut t2 = (max[axis] - origin[axis]) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        if t1 > t_enter {
            t_enter = t1;
            entry_axis = axis;
        }
        t_exit = t_exit.min(t2);

        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 {
        // Box behind the ray, or origin inside it.
        return None;
    }

    // Travelling along +axis enters through the negative face, whose
    // outward normal points back along -axis.
    let side = BlockSide::from_axis(entry_axis, direction[entry_axis] < 0.0);

    Some(AabbIntersection { t_enter, side })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_box() -> Aabb {
        Aabb::block_at(Point3::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn head_on_hit_reports_entry_face() {
        let ray = Ray::new(Point3::new(0.0, -10.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let hit = ray_aabb_intersection(&ray, &block_box()).unwrap();

        assert_eq!(hit.side, BlockSide::SOUTH);
        assert!((hit.t_enter - 9.0).abs() < 1e-5);
    }

    #[test]
    fn downward_hit_enters_through_the_top() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = ray_aabb_intersection(&ray, &block_box()).unwrap();

        assert_eq!(hit.side, BlockSide::TOP);
        assert!((hit.t_enter - 9.0).abs() < 1e-5);
    }

    #[test]
    fn ray_aimed_away_misses() {
        let ray = Ray::new(Point3::new(0.0, -10.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(ray_aabb_intersection(&ray, &block_box()).is_none());
    }

    #[test]
    fn parallel_ray_outside_the_slab_misses() {
        let ray = Ray::new(Point3::new(5.0, -10.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(ray_aabb_intersection(&ray, &block_box()).is_none());
    }

    #[test]
    fn origin_inside_the_box_is_a_miss() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(ray_aabb_intersection(&ray, &block_box()).is_none());
    }

    #[test]
    fn diagonal_hit_picks_the_latest_entry_axis() {
        // Approaches the corner but crosses the X slab boundary last, so the
        // struck face is on the X axis.
        let ray = Ray::new(
            Point3::new(-10.0, -9.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        );
        let hit = ray_aabb_intersection(&ray, &block_box()).unwrap();
        assert_eq!(hit.side, BlockSide::WEST);
    }
}
