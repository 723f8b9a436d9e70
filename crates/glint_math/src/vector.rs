//! Vector algebra for points, directions and colors.
//!
//! All three roles share `glam::DVec3`. Addition, subtraction, scalar and
//! componentwise multiply/divide, `dot`, `cross` and `length` come straight
//! from glam; [`VectorExt`] adds the few operations the renderer names
//! differently.

use glam::DVec3;

/// A 3-component `f64` vector.
pub type Vector3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color (components nominally in [0, 1]).
pub type Color = DVec3;

/// Extra operations on [`Vector3`].
pub trait VectorExt {
    /// Squared Euclidean length.
    fn squared_length(self) -> f64;

    /// The vector scaled to unit length.
    ///
    /// A zero vector divides by zero and yields non-finite components. No
    /// check is made.
    fn unit(self) -> Self;
}

impl VectorExt for DVec3 {
    #[inline]
    fn squared_length(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    fn unit(self) -> Self {
        self / self.length()
    }
}
