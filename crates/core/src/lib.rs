#![deny(unsafe_code)]
//! Core of the terrain-fbm height field generator.
//!
//! Provides the deterministic 2D simplex noise primitive (`simplex`), fractal
//! Brownian motion synthesis over a grid (`fractal`), range normalization
//! (`normalize`), linear blending (`blend`), the `Field` grid type, and a
//! one-shot `pipeline` that chains the three stages for a host.
//!
//! Every operation is a pure function of its inputs. The only shared state is
//! the constant lattice hash table [`simplex::PERM`].

pub mod blend;
pub mod error;
pub mod field;
pub mod fractal;
pub mod normalize;
pub mod params;
pub mod pipeline;
pub mod simplex;

pub use blend::blend;
pub use error::FieldError;
pub use field::Field;
pub use fractal::{synthesize, FractalParams, Octave};
pub use normalize::{normalize, normalize_with, NormalizeRange, RangeSeed};
pub use pipeline::{generate, Recipe};
pub use simplex::evaluate;
