//! Glint - CPU Path Tracing
//!
//! A minimal Monte Carlo path tracer over analytic spheres, with thin-lens
//! depth of field and shutter-time motion blur.
//!
//! Every random draw goes through an explicit `&mut dyn RngCore`, so a
//! render is reproducible from a seed.

mod sampling;
mod hittable;
mod material;
mod sphere;
mod camera;
mod scene;
mod progress;
mod renderer;
mod bucket;

pub use sampling::{gen_f64, random_in_unit_disk, random_in_unit_sphere};
pub use hittable::{Geometry, HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, MaterialId, Metal, ScatterResult};
pub use sphere::{MovingSphere, Sphere};
pub use camera::{Camera, CameraSettings};
pub use scene::{showcase_camera, Scene, MAX_SCENE_OBJECTS};
pub use progress::{NoProgress, Progress};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, FrameBuffer,
    RenderConfig, MAX_DEPTH, T_MIN,
};
pub use bucket::{
    bucket_seed, generate_buckets, render_bucket, render_buckets, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};

/// Re-export the vector and ray types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vector3, VectorExt};
