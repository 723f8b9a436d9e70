//! Thin-lens camera with a shutter interval.

use crate::{gen_f64, random_in_unit_disk, Ray};
use glint_math::{Interval, Point3, Vector3, VectorExt};
use rand::RngCore;

/// Camera parameters, collected with builder methods and turned into an
/// immutable [`Camera`] by [`CameraSettings::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vector3,

    // Lens settings
    vfov: f64,       // Vertical field of view in degrees
    aspect_ratio: f64,
    aperture: f64,   // Lens diameter
    focus_dist: f64, // Distance from camera to plane of perfect focus

    shutter: Interval,
}

impl CameraSettings {
    /// Create camera settings with defaults: a pinhole at the origin looking
    /// down -Z with a 90 degree field of view and a closed shutter at t=0.
    pub fn new() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vector3::Y,
            vfov: 90.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_dist: 1.0,
            shutter: Interval::new(0.0, 0.0),
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vector3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set image aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter open and close times.
    pub fn with_shutter(mut self, open: f64, close: f64) -> Self {
        self.shutter = Interval::new(open, close);
        self
    }

    /// Derive the camera frame. Degenerate settings (zero look direction,
    /// `vup` parallel to it) are not rejected and produce non-finite rays.
    pub fn build(&self) -> Camera {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        // Camera basis vectors
        let w = (self.look_from - self.look_at).unit();
        let u = self.vup.cross(w).unit();
        let v = w.cross(u);

        let origin = self.look_from;
        let lower_left_corner = origin
            - half_width * self.focus_dist * u
            - half_height * self.focus_dist * v
            - self.focus_dist * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * self.focus_dist * u,
            vertical: 2.0 * half_height * self.focus_dist * v,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
            shutter: self.shutter,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vector3,
    vertical: Vector3,
    u: Vector3,
    v: Vector3,
    w: Vector3,
    lens_radius: f64,
    shutter: Interval,
}

impl Camera {
    /// Generate a ray through normalized image coordinates `(s, t)`, where
    /// (0, 0) is the lower-left corner and (1, 1) the upper-right.
    ///
    /// The origin is jittered across the lens disk and the time is drawn
    /// uniformly from the shutter interval.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let time = self.shutter.lerp(gen_f64(rng));

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
            time,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// The camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vector3, Vector3, Vector3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }

    pub fn shutter(&self) -> Interval {
        self.shutter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_camera_basis() {
        let camera = CameraSettings::new()
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vector3::Y)
            .build();

        let (u, v, w) = camera.basis();
        assert!((u - Vector3::X).length() < EPS);
        assert!((v - Vector3::Y).length() < EPS);
        assert!((w - Vector3::Z).length() < EPS);
        assert_eq!(camera.origin(), Point3::ZERO);
    }

    #[test]
    fn test_camera_basis_orthonormal() {
        let camera = CameraSettings::new()
            .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vector3::Y)
            .build();
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < EPS);
        }
        assert!(u.dot(v).abs() < EPS);
        assert!(v.dot(w).abs() < EPS);
        assert!(w.dot(u).abs() < EPS);
    }

    #[test]
    fn test_pinhole_center_ray() {
        let camera = CameraSettings::new().with_lens(90.0, 0.0, 1.0).build();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Point3::ZERO);
        assert!((ray.direction() - Vector3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_pinhole_corner_rays() {
        // 90 degree fov, aspect 2: half height 1, half width 2
        let camera = CameraSettings::new()
            .with_aspect_ratio(2.0)
            .with_lens(90.0, 0.0, 1.0)
            .build();
        let mut rng = StdRng::seed_from_u64(0);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((lower_left.direction() - Vector3::new(-2.0, -1.0, -1.0)).length() < EPS);

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((upper_right.direction() - Vector3::new(2.0, 1.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_focus_distance_scales_image_plane() {
        let camera = CameraSettings::new().with_lens(90.0, 0.0, 10.0).build();
        let mut rng = StdRng::seed_from_u64(0);

        let ray = camera.get_ray(1.0, 0.5, &mut rng);
        assert!((ray.direction() - Vector3::new(10.0, 0.0, -10.0)).length() < EPS);
    }

    #[test]
    fn test_lens_rays_converge_on_focus_plane() {
        let focus_dist = 5.0;
        let camera = CameraSettings::new()
            .with_lens(40.0, 2.0, focus_dist)
            .build();
        assert_eq!(camera.lens_radius(), 1.0);
        let mut rng = StdRng::seed_from_u64(9);

        let target = Point3::new(0.0, 0.0, -focus_dist);
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            // Origins stay on the lens disk in the camera plane
            assert!(ray.origin().z.abs() < EPS);
            assert!(ray.origin().length() < 1.0);
            // Every ray passes through the focus point at t = 1
            assert!((ray.at(1.0) - target).length() < 1e-9);
        }
    }

    #[test]
    fn test_ray_time_within_shutter() {
        let camera = CameraSettings::new().with_shutter(0.25, 0.75).build();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let ray = camera.get_ray(0.3, 0.7, &mut rng);
            assert!(camera.shutter().contains(ray.time()));
        }
    }

    #[test]
    fn test_closed_shutter_time() {
        let camera = CameraSettings::new().build();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(camera.get_ray(0.5, 0.5, &mut rng).time(), 0.0);
    }
}
