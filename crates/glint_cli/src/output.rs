//! PNG output for rendered framebuffers.

use std::path::{Path, PathBuf};

use glint_renderer::FrameBuffer;
use image::{ImageFormat, RgbaImage};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Framebuffer does not hold {width}x{height} RGBA pixels")]
    BufferSize { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write `image` to `path` as PNG, creating missing parent directories.
pub fn write_png(path: &Path, image: &FrameBuffer) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let (width, height) = (image.width(), image.height());
    let buffer = RgbaImage::from_raw(width, height, image.as_bytes().to_vec())
        .ok_or(OutputError::BufferSize { width, height })?;
    buffer.save_with_format(path, ImageFormat::Png)?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}
