//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket owns a generator seeded from the
//! render seed and its index, so output does not depend on thread count or
//! scheduling.

use crate::renderer::{color_to_rgba, render_pixel};
use crate::{Camera, FrameBuffer, Progress, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Edge buckets are truncated to the image bounds.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center (spiral order).
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets
    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Seed for the generator of bucket `index` in a render seeded with `seed`.
pub fn bucket_seed(seed: u64, index: usize) -> u64 {
    // SplitMix64 finalizer over the combined input
    let mut z = seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// RGBA pixels in row-major order within the bucket
    pub pixels: Vec<[u8; 4]>,
}

impl BucketResult {
    /// Copy the bucket's pixels into place in `image`.
    pub fn write_into(&self, image: &mut FrameBuffer) {
        let rows = self.pixels.chunks(self.bucket.width as usize);
        for (local_y, row) in rows.enumerate() {
            for (local_x, rgba) in row.iter().enumerate() {
                image.set(
                    self.bucket.x + local_x as u32,
                    self.bucket.y + local_y as u32,
                    *rgba,
                );
            }
        }
    }
}

/// Render a single bucket, drawing every sample from `rng`.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    progress: &dyn Progress,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                scene,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                rng,
            );
            pixels.push(color_to_rgba(color));
            progress.advance(1);
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

/// Render the entire scene in parallel buckets on the rayon pool.
///
/// The output is a pure function of `seed` and `bucket_size`.
pub fn render_buckets(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    seed: u64,
    bucket_size: u32,
    progress: &dyn Progress,
) -> FrameBuffer {
    let buckets = generate_buckets(config.width, config.height, bucket_size);
    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(bucket_seed(seed, bucket.index));
            render_bucket(bucket, camera, scene, config, &mut rng, progress)
        })
        .collect();

    let mut image = FrameBuffer::new(config.width, config.height);
    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{showcase_camera, NoProgress};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn assert_exact_cover(buckets: &[Bucket], width: u32, height: u32) {
        let mut seen = HashSet::new();
        for bucket in buckets {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    assert!(x < width && y < height);
                    assert!(seen.insert((x, y)), "pixel ({x}, {y}) covered twice");
                }
            }
        }
        assert_eq!(seen.len(), (width * height) as usize);
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid
        assert_exact_cover(&buckets, 128, 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 32);
        assert_eq!(buckets.len(), 4 * 3);
        assert_exact_cover(&buckets, 100, 70);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_bucket_seeds_differ() {
        let seeds: HashSet<u64> = (0..256).map(|i| bucket_seed(7, i)).collect();
        assert_eq!(seeds.len(), 256);
        assert_ne!(bucket_seed(7, 0), bucket_seed(8, 0));
    }

    #[test]
    fn test_render_buckets_deterministic_across_thread_counts() {
        let scene = Scene::random(&mut StdRng::seed_from_u64(4));
        let config = RenderConfig {
            width: 24,
            height: 12,
            samples_per_pixel: 2,
        };
        let camera = showcase_camera(config.aspect_ratio());

        let render_with = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .expect("thread pool")
                .install(|| render_buckets(&camera, &scene, &config, 99, 8, &NoProgress))
        };

        let single = render_with(1);
        let multi = render_with(4);
        assert_eq!(single.as_bytes(), multi.as_bytes());
        assert!(single.as_bytes().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_render_buckets_reports_every_pixel() {
        let mut scene = Scene::new();
        let mat = scene.add_material(crate::Lambertian::new(crate::Color::splat(0.5)));
        scene.add(crate::Sphere::new(crate::Point3::new(0.0, 0.0, -1.0), 0.5, mat));
        let config = RenderConfig {
            width: 10,
            height: 7,
            samples_per_pixel: 1,
        };
        let camera = crate::CameraSettings::new()
            .with_aspect_ratio(config.aspect_ratio())
            .build();

        let counter = AtomicU64::new(0);
        let image = render_buckets(&camera, &scene, &config, 1, 4, &counter);
        assert_eq!(counter.load(Ordering::Relaxed), 70);
        assert_eq!(image.as_bytes().len(), 10 * 7 * 4);
    }

    #[test]
    fn test_write_into_places_pixels() {
        let bucket = Bucket::new(1, 1, 2, 1, 0);
        let result = BucketResult {
            bucket,
            pixels: vec![[1, 1, 1, 255], [2, 2, 2, 255]],
        };
        let mut image = FrameBuffer::new(3, 2);
        result.write_into(&mut image);

        assert_eq!(image.get(1, 1), [1, 1, 1, 255]);
        assert_eq!(image.get(2, 1), [2, 2, 2, 255]);
        assert_eq!(image.get(0, 0), [0, 0, 0, 0]);
    }
}
