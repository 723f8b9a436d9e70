//! Random sampling helpers.
//!
//! All helpers draw from a caller-supplied generator so renders can be
//! replayed from a seed.

use crate::Vector3;
use glint_math::VectorExt;
use rand::{Rng, RngCore};

/// Uniform draw in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point inside the unit ball, by rejection sampling.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vector3 {
    loop {
        let p = Vector3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if p.squared_length() < 1.0 {
            return p;
        }
    }
}

/// Uniform point inside the unit disk in the xy-plane, by rejection sampling.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vector3 {
    loop {
        let p = Vector3::new(gen_f64(rng) * 2.0 - 1.0, gen_f64(rng) * 2.0 - 1.0, 0.0);
        if p.squared_length() < 1.0 {
            return p;
        }
    }
}
