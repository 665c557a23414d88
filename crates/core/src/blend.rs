//! Linear interpolation between two fields.

use crate::error::FieldError;
use crate::field::Field;

/// Returns `a * factor + b * (1 - factor)` cell by cell.
///
/// `factor = 1` yields `a`, `factor = 0` yields `b`. The factor is not
/// clamped; values outside [0, 1] extrapolate. Returns
/// `FieldError::DimensionMismatch` when the shapes differ and
/// `FieldError::InvalidParameter` for a non-finite factor.
pub fn blend(a: &Field, b: &Field, factor: f64) -> Result<Field, FieldError> {
    if !factor.is_finite() {
        return Err(FieldError::InvalidParameter {
            name: "blend",
            value: factor,
        });
    }
    let inverse = 1.0 - factor;
    a.zip_with(b, |va, vb| va * factor + vb * inverse)
}
