//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded at [`MAX_DEPTH`] bounces
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use crate::{gen_f64, Camera, Color, Hittable, Progress, Ray, Scene};
use glint_math::{Interval, VectorExt};
use rand::RngCore;
use std::time::Instant;

/// Maximum number of bounces along one path.
pub const MAX_DEPTH: u32 = 50;

/// Lower bound of the hit range, keeps bounced rays from re-hitting the
/// surface they left.
pub const T_MIN: f64 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 100,
        }
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts the bounces taken so far; callers start at 0. Radiance is
/// purely multiplicative along the path: the only light source is the sky.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    if depth >= MAX_DEPTH {
        return Color::ZERO;
    }

    match scene.material(rec.material).scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, scene, depth + 1, rng),
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().unit();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    linear.sqrt()
}

/// Convert an averaged linear color to 8-bit RGBA.
///
/// Channels are not clamped: the float to `u8` cast saturates values past
/// 255 and maps NaN to 0.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.99 * linear_to_gamma(color.x)) as u8;
    let g = (255.99 * linear_to_gamma(color.y)) as u8;
    let b = (255.99 * linear_to_gamma(color.z)) as u8;
    [r, g, b, 255]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are framebuffer coordinates with row 0 at the top. Returns the
/// averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let row_from_bottom = (config.height - 1 - y) as f64;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + gen_f64(rng)) / config.width as f64;
        let t = (row_from_bottom + gen_f64(rng)) / config.height as f64;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, 0, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

/// RGBA8 framebuffer, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new framebuffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let start = self.offset(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[start..start + 4]);
        rgba
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let start = self.offset(x, y);
        self.pixels[start..start + 4].copy_from_slice(&rgba);
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

/// Render the entire scene on the calling thread.
///
/// Draws every random number from `rng`, so the result is a pure function
/// of the generator's state.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    progress: &dyn Progress,
) -> FrameBuffer {
    log::info!(
        "Rendering {}x{} @ {} spp ({} objects)",
        config.width,
        config.height,
        config.samples_per_pixel,
        scene.len()
    );
    let start = Instant::now();
    let mut image = FrameBuffer::new(config.width, config.height);

    for y in 0..config.height {
        for x in 0..config.width {
            let color = render_pixel(camera, scene, x, y, config, rng);
            image.set(x, y, color_to_rgba(color));
            progress.advance(1);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
