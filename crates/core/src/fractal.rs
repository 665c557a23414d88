//! Fractal Brownian motion: layered simplex noise over a grid.
//!
//! Octave `k` samples the noise at `base_frequency · 2^k` lattice cycles
//! across the grid and weights it by `base_amplitude / 2^k`. The lattice is
//! scaled per axis by `frequency / width` and `frequency / height`, so the
//! same parameters give the same picture at any resolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::FieldError;
use crate::field::Field;
use crate::params::{param_f64, param_u32};
use crate::simplex;

/// Default number of octaves.
pub const DEFAULT_OCTAVES: u32 = 8;
/// Default lattice cycles across the grid for the first octave.
pub const DEFAULT_BASE_FREQUENCY: f64 = 4.0;
/// Default weight of the first octave.
pub const DEFAULT_BASE_AMPLITUDE: f64 = 1.0;
/// Upper bound on octaves, which bounds the per-cell cost. Octave 63 already
/// weighs `2^-63` of the base amplitude, so deeper layers cannot change an
/// f64 sum.
pub const MAX_OCTAVES: u32 = 64;

/// Parameters of the fractal sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Number of noise layers, at least 1.
    pub octaves: u32,
    /// Lattice cycles across the grid span for octave 0.
    pub base_frequency: f64,
    /// Contribution weight of octave 0.
    pub base_amplitude: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            base_frequency: DEFAULT_BASE_FREQUENCY,
            base_amplitude: DEFAULT_BASE_AMPLITUDE,
        }
    }
}

/// Frequency and amplitude of one octave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

impl FractalParams {
    /// Creates parameters from explicit values. Call [`validate`](Self::validate)
    /// before use, or go through [`synthesize`] which does.
    pub fn new(octaves: u32, base_frequency: f64, base_amplitude: f64) -> Self {
        Self {
            octaves,
            base_frequency,
            base_amplitude,
        }
    }

    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            octaves: param_u32(params, "octaves", DEFAULT_OCTAVES),
            base_frequency: param_f64(params, "base_frequency", DEFAULT_BASE_FREQUENCY),
            base_amplitude: param_f64(params, "base_amplitude", DEFAULT_BASE_AMPLITUDE),
        }
    }

    /// Checks that every parameter is positive and finite.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(FieldError::InvalidParameter {
                name: "octaves",
                value: f64::from(self.octaves),
            });
        }
        positive("base_frequency", self.base_frequency)?;
        positive("base_amplitude", self.base_amplitude)?;
        Ok(())
    }

    /// Iterates the octaves in order, starting from the base pair.
    pub fn octaves(&self) -> impl Iterator<Item = Octave> + '_ {
        (0..self.octaves).map(move |k| {
            let scale = 2_f64.powi(k as i32);
            Octave {
                frequency: self.base_frequency * scale,
                amplitude: self.base_amplitude / scale,
            }
        })
    }

    /// Sum of all octave amplitudes; bounds how far the raw field can stray
    /// from zero relative to a single noise sample.
    pub fn total_amplitude(&self) -> f64 {
        self.octaves().map(|o| o.amplitude).sum()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter { name, value })
    }
}

/// Per-octave lattice step along each grid axis.
struct OctaveStep {
    x_ratio: f64,
    y_ratio: f64,
    amplitude: f64,
}

/// Builds an unnormalized fBm field of `width × height` samples.
///
/// Returns `FieldError::InvalidDimensions` for a zero dimension and
/// `FieldError::InvalidParameter` for out-of-range parameters. The result is
/// signed and its extent grows with [`FractalParams::total_amplitude`].
pub fn synthesize(
    width: usize,
    height: usize,
    params: &FractalParams,
) -> Result<Field, FieldError> {
    params.validate()?;
    if width == 0 || height == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    debug!(
        width,
        height,
        octaves = params.octaves,
        base_frequency = params.base_frequency,
        base_amplitude = params.base_amplitude,
        "synthesizing fractal field"
    );

    let steps: Vec<OctaveStep> = params
        .octaves()
        .map(|o| OctaveStep {
            x_ratio: o.frequency / width as f64,
            y_ratio: o.frequency / height as f64,
            amplitude: o.amplitude,
        })
        .collect();

    let field = Field::from_fn(width, height, |x, y| {
        steps.iter().fold(0.0, |acc, step| {
            let nx = x as f64 * step.x_ratio;
            let ny = y as f64 * step.y_ratio;
            acc + simplex::evaluate(nx, ny) * step.amplitude
        })
    })?;

    if let Some((lo, hi)) = field.value_range() {
        debug!(min = lo, max = hi, "fractal field extent");
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- Parameters --

    #[test]
    fn default_matches_host_defaults() {
        let p = FractalParams::default();
        assert_eq!(p.octaves, 8);
        assert_eq!(p.base_frequency, 4.0);
        assert_eq!(p.base_amplitude, 1.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn from_json_overrides_and_falls_back() {
        let p = FractalParams::from_json(&json!({"octaves": 3, "base_amplitude": 0.5}));
        assert_eq!(p.octaves, 3);
        assert_eq!(p.base_frequency, DEFAULT_BASE_FREQUENCY);
        assert_eq!(p.base_amplitude, 0.5);
    }

    #[test]
    fn octaves_double_frequency_and_halve_amplitude() {
        let p = FractalParams::new(4, 3.0, 2.0);
        let octaves: Vec<Octave> = p.octaves().collect();
        assert_eq!(octaves.len(), 4);
        assert_eq!(
            octaves[0],
            Octave {
                frequency: 3.0,
                amplitude: 2.0
            }
        );
        assert_eq!(
            octaves[3],
            Octave {
                frequency: 24.0,
                amplitude: 0.25
            }
        );
        assert!((p.total_amplitude() - 3.75).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_non_positive_values() {
        let cases = [
            (FractalParams::new(0, 4.0, 1.0), "octaves"),
            (FractalParams::new(MAX_OCTAVES + 1, 4.0, 1.0), "octaves"),
            (FractalParams::new(1, 0.0, 1.0), "base_frequency"),
            (FractalParams::new(1, f64::NAN, 1.0), "base_frequency"),
            (FractalParams::new(1, 4.0, -1.0), "base_amplitude"),
            (FractalParams::new(1, 4.0, f64::INFINITY), "base_amplitude"),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(FieldError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter({expected}), got {other:?}"),
            }
        }
    }

    // -- Synthesis --

    #[test]
    fn synthesize_rejects_zero_dimensions() {
        let p = FractalParams::default();
        assert!(matches!(
            synthesize(0, 8, &p),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            synthesize(8, 0, &p),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn synthesize_rejects_invalid_params_as_invalid_input() {
        let err = synthesize(8, 8, &FractalParams::new(0, 4.0, 1.0)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn synthesize_accepts_max_octaves() {
        let p = FractalParams::new(MAX_OCTAVES, 4.0, 1.0);
        let field = synthesize(2, 2, &p).unwrap();
        let bound = 1.2 * p.total_amplitude();
        for (x, y, v) in field.iter() {
            assert!(v.is_finite() && v.abs() <= bound, "cell ({x}, {y}) = {v}");
        }
    }

    #[test]
    fn synthesize_survives_overflowing_octave_frequency() {
        // the top octaves reach 1e300 * 2^63, which is infinite in f64
        let p = FractalParams::new(MAX_OCTAVES, 1e300, 1.0);
        let field = synthesize(3, 3, &p).unwrap();
        assert!(field.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn single_octave_matches_direct_evaluation() {
        let field = synthesize(4, 4, &FractalParams::new(1, 4.0, 1.0)).unwrap();
        for (x, y, v) in field.iter() {
            let expected = simplex::evaluate(x as f64 * 4.0 / 4.0, y as f64 * 4.0 / 4.0) * 1.0;
            assert!(
                (v - expected).abs() < 1e-12,
                "cell ({x}, {y}): {v} vs {expected}"
            );
        }
    }

    #[test]
    fn octaves_are_additive() {
        let (w, h) = (12, 7);
        let both = synthesize(w, h, &FractalParams::new(2, 2.0, 1.0)).unwrap();
        let first = synthesize(w, h, &FractalParams::new(1, 2.0, 1.0)).unwrap();
        let second = synthesize(w, h, &FractalParams::new(1, 4.0, 0.5)).unwrap();
        for ((a, b), c) in both
            .data()
            .iter()
            .zip(first.data().iter())
            .zip(second.data().iter())
        {
            assert!((a - (b + c)).abs() < 1e-12);
        }
    }

    #[test]
    fn synthesize_is_deterministic() {
        let p = FractalParams::new(5, 3.0, 1.5);
        let a = synthesize(32, 24, &p).unwrap();
        let b = synthesize(32, 24, &p).unwrap();
        assert!(a
            .data()
            .iter()
            .zip(b.data().iter())
            .all(|(va, vb)| va.to_bits() == vb.to_bits()));
    }

    #[test]
    fn synthesize_scales_with_amplitude() {
        let unit = synthesize(16, 16, &FractalParams::new(3, 4.0, 1.0)).unwrap();
        let triple = synthesize(16, 16, &FractalParams::new(3, 4.0, 3.0)).unwrap();
        for (a, b) in unit.data().iter().zip(triple.data().iter()) {
            assert!((a * 3.0 - b).abs() < 1e-12);
        }
    }

    #[test]
    fn synthesize_produces_variation() {
        let field = synthesize(16, 16, &FractalParams::default()).unwrap();
        let (lo, hi) = field.value_range().unwrap();
        assert!(hi - lo > 1e-3, "flat field: [{lo}, {hi}]");
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn raw_field_is_finite_and_bounded(
                w in 1_usize..=24,
                h in 1_usize..=24,
                octaves in 1_u32..=6,
                freq in 0.5_f64..16.0,
                amp in 0.1_f64..4.0,
            ) {
                let params = FractalParams::new(octaves, freq, amp);
                let field = synthesize(w, h, &params).unwrap();
                let bound = 1.2 * params.total_amplitude();
                for &v in field.data() {
                    prop_assert!(v.is_finite());
                    prop_assert!(v.abs() <= bound, "{v} exceeds {bound}");
                }
            }
        }
    }
}
