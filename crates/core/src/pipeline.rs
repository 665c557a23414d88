//! One-shot height field generation.
//!
//! A [`Recipe`] captures everything needed to recreate a generated field:
//! grid dimensions, fractal parameters, normalization target and blend
//! factor. [`generate`] runs synthesize → normalize → blend against the
//! caller's existing field in a single synchronous call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::blend::blend;
use crate::error::FieldError;
use crate::field::Field;
use crate::fractal::{
    synthesize, FractalParams, DEFAULT_BASE_AMPLITUDE, DEFAULT_BASE_FREQUENCY, DEFAULT_OCTAVES,
    MAX_OCTAVES,
};
use crate::normalize::{normalize_with, NormalizeRange, RangeSeed};
use crate::params::{param_f64, param_string};

/// Default blend factor: the generated field replaces the existing one.
pub const DEFAULT_BLEND: f64 = 1.0;

/// Reproducible description of a generated height field.
///
/// Two identical recipes applied to the same existing field produce
/// bit-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub width: usize,
    pub height: usize,
    pub fractal: FractalParams,
    pub range: NormalizeRange,
    #[serde(default)]
    pub range_seed: RangeSeed,
    pub blend: f64,
}

impl Recipe {
    /// Creates a recipe with default fractal, normalization and blend settings.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            fractal: FractalParams::default(),
            range: NormalizeRange::default(),
            range_seed: RangeSeed::default(),
            blend: DEFAULT_BLEND,
        }
    }

    /// Creates a recipe from a flat JSON params object, falling back to
    /// defaults for missing or mistyped keys.
    ///
    /// Returns `FieldError::InvalidOption` for an unknown `range_seed` name.
    pub fn from_json(width: usize, height: usize, params: &Value) -> Result<Self, FieldError> {
        let defaults = NormalizeRange::default();
        let seed_name = param_string(params, "range_seed", "observed");
        let range_seed =
            RangeSeed::from_name(&seed_name).ok_or_else(|| FieldError::InvalidOption {
                name: "range_seed",
                value: seed_name.clone(),
            })?;
        Ok(Self {
            width,
            height,
            fractal: FractalParams::from_json(params),
            range: NormalizeRange::new(
                param_f64(params, "normalize_min", defaults.min),
                param_f64(params, "normalize_max", defaults.max),
            ),
            range_seed,
            blend: param_f64(params, "blend", DEFAULT_BLEND),
        })
    }

    /// Checks dimensions, fractal parameters, target range and blend factor.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FieldError::InvalidDimensions)?;
        self.fractal.validate()?;
        self.range.validate()?;
        if !self.blend.is_finite() {
            return Err(FieldError::InvalidParameter {
                name: "blend",
                value: self.blend,
            });
        }
        Ok(())
    }

    /// Flat JSON view of the tunable parameters, in the shape
    /// [`from_json`](Self::from_json) accepts.
    pub fn params(&self) -> Value {
        json!({
            "octaves": self.fractal.octaves,
            "base_frequency": self.fractal.base_frequency,
            "base_amplitude": self.fractal.base_amplitude,
            "normalize_min": self.range.min,
            "normalize_max": self.range.max,
            "range_seed": self.range_seed.name(),
            "blend": self.blend,
        })
    }

    /// Schema describing every parameter key, its type, range and default.
    pub fn param_schema() -> Value {
        json!({
            "octaves": {
                "type": "integer",
                "min": 1,
                "max": MAX_OCTAVES,
                "default": DEFAULT_OCTAVES,
                "description": "Number of noise layers; each doubles frequency and halves amplitude"
            },
            "base_frequency": {
                "type": "number",
                "exclusive_min": 0.0,
                "default": DEFAULT_BASE_FREQUENCY,
                "description": "Lattice cycles across the grid for the first octave"
            },
            "base_amplitude": {
                "type": "number",
                "exclusive_min": 0.0,
                "default": DEFAULT_BASE_AMPLITUDE,
                "description": "Weight of the first octave"
            },
            "normalize_min": {
                "type": "number",
                "default": 0.0,
                "description": "Value the lowest generated sample is mapped to"
            },
            "normalize_max": {
                "type": "number",
                "default": 1.0,
                "description": "Value the highest generated sample is mapped to"
            },
            "range_seed": {
                "type": "string",
                "enum": ["observed", "unit"],
                "default": "observed",
                "description": "Measure the true extent, or widen from [0, 1] only"
            },
            "blend": {
                "type": "number",
                "default": DEFAULT_BLEND,
                "description": "1 keeps only the generated field, 0 keeps only the existing one"
            }
        })
    }
}

/// Generates a fractal field per `recipe` and blends it over `existing`.
///
/// `existing` must be `recipe.width × recipe.height`; otherwise
/// `FieldError::DimensionMismatch` is returned before any noise is computed.
pub fn generate(recipe: &Recipe, existing: &Field) -> Result<Field, FieldError> {
    recipe.validate()?;
    if existing.width() != recipe.width || existing.height() != recipe.height {
        return Err(FieldError::DimensionMismatch {
            lhs_w: recipe.width,
            lhs_h: recipe.height,
            rhs_w: existing.width(),
            rhs_h: existing.height(),
        });
    }
    debug!(
        width = recipe.width,
        height = recipe.height,
        blend = recipe.blend,
        "generating height field"
    );
    let raw = synthesize(recipe.width, recipe.height, &recipe.fractal)?;
    let normalized = normalize_with(&raw, recipe.range, recipe.range_seed)?;
    blend(&normalized, existing, recipe.blend)
}
