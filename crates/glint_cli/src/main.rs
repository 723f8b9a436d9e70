//! `glint` - render the demonstration scene to a PNG file.

mod output;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{
    render, render_buckets, showcase_camera, Progress, RenderConfig, Scene, DEFAULT_BUCKET_SIZE,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Path trace a field of random spheres.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args {
    /// Path of the output image (PNG)
    #[arg(long, default_value = "output/output.png")]
    output: PathBuf,

    /// Width of the image in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height of the image in pixels
    #[arg(long, default_value_t = 225, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Number of samples to take per pixel
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    samples: u32,

    /// Seed for scene generation and sampling; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Render buckets in parallel on all cores
    #[arg(long)]
    parallel: bool,

    /// Bucket edge length in pixels for --parallel
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    bucket_size: u32,
}

/// Drives an indicatif bar from renderer progress.
struct BarProgress(ProgressBar);

impl BarProgress {
    fn new(pixels: u64) -> Result<Self> {
        let bar = ProgressBar::new(pixels);
        bar.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} px ({eta})",
            )
            .context("invalid progress bar template")?,
        );
        Ok(Self(bar))
    }

    fn finish(&self) {
        self.0.finish();
    }
}

impl Progress for BarProgress {
    fn advance(&self, pixels: u64) {
        self.0.inc(pixels);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting glint (seed {seed})");

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let start = Instant::now();
    let scene = Scene::random(&mut rng);
    log::info!("Scene built with {} spheres in {:?}", scene.len(), start.elapsed());

    let camera = showcase_camera(config.aspect_ratio());

    let progress = BarProgress::new(config.pixel_count())?;
    let image = if args.parallel {
        render_buckets(&camera, &scene, &config, seed, args.bucket_size, &progress)
    } else {
        render(&camera, &scene, &config, &mut rng, &progress)
    };
    progress.finish();

    output::write_png(&args.output, &image)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("Done in {:?}", start.elapsed());
    Ok(())
}
