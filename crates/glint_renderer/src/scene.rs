//! Scene container and the procedural demonstration scene.

use crate::{
    gen_f64, Camera, CameraSettings, Dielectric, Geometry, HitRecord, Hittable, HittableList,
    Lambertian, Material, MaterialId, Metal, MovingSphere, Ray, Sphere,
};
use glint_math::{Color, Interval, Point3, Vector3};
use rand::RngCore;

/// Worst-case object count of [`Scene::random`]: the 22x22 grid, three
/// feature spheres and the ground.
pub const MAX_SCENE_OBJECTS: usize = 22 * 22 + 3 + 1;

/// Everything one render reads: the material table and the geometry that
/// refers into it. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    world: HittableList,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with room for `capacity` objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            materials: Vec::with_capacity(capacity),
            world: HittableList::with_capacity(capacity),
        }
    }

    /// Add a material to the table and return its handle.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    /// Add geometry to the scene.
    pub fn add(&mut self, object: impl Into<Geometry>) {
        self.world.add(object);
    }

    /// Look up a material by handle.
    ///
    /// Handles are only valid for the scene that issued them.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Number of top-level objects.
    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn objects(&self) -> impl Iterator<Item = &Geometry> {
        self.world.iter()
    }

    /// Build the randomized demonstration scene: a ground sphere, a jittered
    /// 22x22 grid of small spheres and three large feature spheres.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        let mut scene = Scene::with_capacity(MAX_SCENE_OBJECTS);

        let ground = scene.add_material(Lambertian::new(Color::splat(0.5)));
        scene.add(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground));

        let glass = scene.add_material(Dielectric::new(1.5));
        let reserved = Point3::new(4.0, 0.2, 0.0);

        for a in -11..11 {
            for b in -11..11 {
                let choose_mat = gen_f64(rng);
                let center = Point3::new(
                    a as f64 + 0.9 * gen_f64(rng),
                    0.2,
                    b as f64 + 0.9 * gen_f64(rng),
                );
                if (center - reserved).length() <= 0.9 {
                    continue;
                }

                if choose_mat < 0.8 {
                    // Diffuse, bouncing upwards during the shutter
                    let center1 = center + Vector3::new(0.0, 0.5 * gen_f64(rng), 0.0);
                    let albedo = Color::new(
                        gen_f64(rng) * gen_f64(rng),
                        gen_f64(rng) * gen_f64(rng),
                        gen_f64(rng) * gen_f64(rng),
                    );
                    let material = scene.add_material(Lambertian::new(albedo));
                    scene.add(MovingSphere::new(center, center1, 0.0, 1.0, 0.2, material));
                } else if choose_mat < 0.95 {
                    let albedo = Color::new(
                        0.5 * (1.0 + gen_f64(rng)),
                        0.5 * (1.0 + gen_f64(rng)),
                        0.5 * (1.0 + gen_f64(rng)),
                    );
                    let fuzz = 0.5 * gen_f64(rng);
                    let material = scene.add_material(Metal::new(albedo, fuzz));
                    scene.add(Sphere::new(center, 0.2, material));
                } else {
                    scene.add(Sphere::new(center, 0.2, glass));
                }
            }
        }

        let brown = scene.add_material(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
        scene.add(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, brown));

        let silver = scene.add_material(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
        scene.add(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, silver));

        scene.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));

        log::debug!(
            "Generated scene with {} objects and {} materials",
            scene.len(),
            scene.material_count()
        );
        scene
    }
}

impl Hittable for Scene {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.world.hit(ray, ray_t)
    }
}

/// The camera framing [`Scene::random`]: slightly above the ground looking
/// at the origin, small aperture focused at distance 10, shutter open over
/// [0, 1].
pub fn showcase_camera(aspect_ratio: f64) -> Camera {
    CameraSettings::new()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vector3::Y)
        .with_aspect_ratio(aspect_ratio)
        .with_lens(20.0, 0.1, 10.0)
        .with_shutter(0.0, 1.0)
        .build()
}
