//! Error types for the terrain-fbm core.

use thiserror::Error;

/// Errors produced by field synthesis, normalization and blending.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two fields had incompatible dimensions for an element-wise operation.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A numeric parameter was zero, negative or not finite where a positive
    /// finite value is required.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A named option had a value outside its set of accepted names.
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: &'static str, value: String },

    /// A normalization target range was not an ordered pair of finite values
    /// with a representable span.
    #[error("invalid target range [{min}, {max}]: need finite min < max with a finite span")]
    InvalidRange { min: f64, max: f64 },

    /// A field handed to an operation held NaN or an infinity.
    #[error("non-finite sample {value} at ({x}, {y})")]
    NonFiniteSample { x: usize, y: usize, value: f64 },

    /// The observed extent of a field was zero, so it cannot be rescaled.
    #[error("degenerate field: every sample equals {value}")]
    DegenerateRange { value: f64 },

    /// The observed extent `max - min` is too wide to represent as an f64.
    #[error("field extent [{min}, {max}] is wider than f64 can represent")]
    ExtentOverflow { min: f64, max: f64 },

    /// Reading or writing an external representation failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl FieldError {
    /// True for errors caused by a precondition on the caller's input
    /// (shapes, dimensions, parameters, target ranges, non-finite samples).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            FieldError::InvalidDimensions
                | FieldError::DimensionMismatch { .. }
                | FieldError::InvalidParameter { .. }
                | FieldError::InvalidOption { .. }
                | FieldError::InvalidRange { .. }
                | FieldError::NonFiniteSample { .. }
        )
    }
}
