//! Render progress notifications.

use std::sync::atomic::{AtomicU64, Ordering};

/// Observer told how many pixels have been completed.
///
/// Called from rayon workers by the bucket driver, hence `Sync`.
pub trait Progress: Sync {
    /// `pixels` more pixels are finished.
    fn advance(&self, pixels: u64);
}

/// Ignores all progress notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn advance(&self, _pixels: u64) {}
}

/// Plain counter, handy for tests and for polling from another thread.
impl Progress for AtomicU64 {
    fn advance(&self, pixels: u64) {
        self.fetch_add(pixels, Ordering::Relaxed);
    }
}
