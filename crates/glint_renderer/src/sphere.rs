//! Sphere primitives for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use glint_math::{Interval, Point3, VectorExt};

/// A static sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(self.center, self.radius, self.material, ray, ray_t)
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`. The radius is constant.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: MaterialId,
}

impl MovingSphere {
    pub fn new(
        center0: Point3,
        center1: Point3,
        time0: f64,
        time1: f64,
        radius: f64,
        material: MaterialId,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Center at the given time. Times outside [time0, time1] extrapolate.
    pub fn center(&self, time: f64) -> Point3 {
        let fraction = (time - self.time0) / (self.time1 - self.time0);
        self.center0 + fraction * (self.center1 - self.center0)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(self.center(ray.time()), self.radius, self.material, ray, ray_t)
    }
}

/// Ray-sphere intersection shared by both sphere kinds.
///
/// Solves `a*t^2 + 2*b*t + c = 0`. A zero discriminant (grazing ray) counts
/// as a miss.
#[inline]
fn hit_sphere(
    center: Point3,
    radius: f64,
    material: MaterialId,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord> {
    let oc = ray.origin() - center;
    let a = ray.direction().squared_length();
    let b = oc.dot(ray.direction());
    let c = oc.squared_length() - radius * radius;

    let discriminant = b * b - a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Nearest root first, then the far one
    let mut root = (-b - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (-b + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = ray.at(root);
    Some(HitRecord {
        t: root,
        p,
        normal: (p - center) / radius,
        material,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vector3;

    const EPS: f64 = 1e-9;

    fn hit_range() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, MaterialId(0));
        let ray = Ray::new(Point3::ZERO, Vector3::new(0.0, 0.0, -1.0), 0.0);

        let rec = sphere.hit(&ray, hit_range()).expect("should hit");
        assert!((rec.t - 0.5).abs() < EPS);
        assert!((rec.normal - Vector3::Z).length() < EPS);
        assert_eq!(rec.material, MaterialId(0));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, MaterialId(0));

        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert!(sphere.hit(&ray, hit_range()).is_none());
    }

    #[test]
    fn test_axis_ray_roots() {
        let (d, r) = (10.0, 2.0);
        let sphere = Sphere::new(Point3::ZERO, r, MaterialId(0));
        let ray = Ray::new(Point3::new(0.0, 0.0, d), Vector3::new(0.0, 0.0, -1.0), 0.0);

        let near = sphere.hit(&ray, hit_range()).expect("near root");
        assert!((near.t - (d - r)).abs() < EPS);

        // Excluding the near root yields the far one
        let far = sphere
            .hit(&ray, Interval::new(d - r + 0.5, f64::INFINITY))
            .expect("far root");
        assert!((far.t - (d + r)).abs() < EPS);

        // Both roots outside the range
        assert!(sphere.hit(&ray, Interval::new(0.001, d - r - 0.5)).is_none());
    }

    #[test]
    fn test_range_bounds_are_exclusive() {
        let sphere = Sphere::new(Point3::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0), 0.0);

        // Upper bound equal to the near root excludes it
        assert!(sphere.hit(&ray, Interval::new(0.001, 4.0)).is_none());
    }

    #[test]
    fn test_tangent_ray_misses() {
        let sphere = Sphere::new(Point3::ZERO, 0.5, MaterialId(0));
        let ray = Ray::new(Point3::new(0.0, 0.5, 5.0), Vector3::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&ray, hit_range()).is_none());
    }

    #[test]
    fn test_normal_not_flipped_from_inside() {
        let sphere = Sphere::new(Point3::ZERO, 2.0, MaterialId(0));
        let ray = Ray::new(Point3::ZERO, Vector3::new(1.0, 0.0, 0.0), 0.0);

        let rec = sphere.hit(&ray, hit_range()).expect("should hit from inside");
        assert!((rec.t - 2.0).abs() < EPS);
        // Outward normal points along the ray, not against it
        assert!((rec.normal - Vector3::X).length() < EPS);
    }

    #[test]
    fn test_moving_sphere_center() {
        let sphere = MovingSphere::new(
            Point3::ZERO,
            Point3::new(0.0, 1.0, 0.0),
            0.0,
            1.0,
            0.2,
            MaterialId(0),
        );
        assert_eq!(sphere.center(0.0), Point3::ZERO);
        assert_eq!(sphere.center(0.5), Point3::new(0.0, 0.5, 0.0));
        assert_eq!(sphere.center(1.0), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_moving_sphere_hit_depends_on_time() {
        let sphere = MovingSphere::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 2.0, -1.0),
            0.0,
            1.0,
            0.5,
            MaterialId(3),
        );
        let direction = Vector3::new(0.0, 0.0, -1.0);

        let early = Ray::new(Point3::ZERO, direction, 0.0);
        let rec = sphere.hit(&early, hit_range()).expect("hit at shutter open");
        assert_eq!(rec.material, MaterialId(3));
        assert!((rec.t - 0.5).abs() < EPS);

        // By t=1 the sphere has moved two units up, out of the ray's path
        let late = Ray::new(Point3::ZERO, direction, 1.0);
        assert!(sphere.hit(&late, hit_range()).is_none());
    }

    #[test]
    fn test_moving_sphere_normal_uses_instant_center() {
        let sphere = MovingSphere::new(
            Point3::new(-1.0, 0.0, -3.0),
            Point3::new(1.0, 0.0, -3.0),
            0.0,
            2.0,
            1.0,
            MaterialId(0),
        );
        // Halfway through the interval the center sits at (0, 0, -3)
        let ray = Ray::new(Point3::ZERO, Vector3::new(0.0, 0.0, -1.0), 1.0);
        let rec = sphere.hit(&ray, hit_range()).expect("should hit");
        assert!((rec.t - 2.0).abs() < EPS);
        assert!((rec.normal - Vector3::Z).length() < EPS);
    }
}
