// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

// Glint math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{Color, Point3, Vector3, VectorExt};
