//! Hittable trait and HitRecord for ray-object intersection.

use crate::{MaterialId, MovingSphere, Ray, Sphere};
use glint_math::{Interval, Point3, Vector3};

/// Record of a ray-object intersection.
///
/// Produced by a single `hit` query and only meaningful alongside the scene
/// that produced it: `material` indexes that scene's material table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Point3,
    /// Outward unit normal (not flipped for rays leaving the surface)
    pub normal: Vector3,
    /// Material of the surface that was hit
    pub material: MaterialId,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// The closed set of geometry a scene can hold.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    MovingSphere(MovingSphere),
    List(HittableList),
}

impl Hittable for Geometry {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Geometry::Sphere(sphere) => sphere.hit(ray, ray_t),
            Geometry::MovingSphere(sphere) => sphere.hit(ray, ray_t),
            Geometry::List(list) => list.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<MovingSphere> for Geometry {
    fn from(sphere: MovingSphere) -> Self {
        Geometry::MovingSphere(sphere)
    }
}

impl From<HittableList> for Geometry {
    fn from(list: HittableList) -> Self {
        Geometry::List(list)
    }
}

/// A list of hittable objects.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Geometry>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create an empty list with room for `capacity` objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Geometry>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.objects.iter()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
