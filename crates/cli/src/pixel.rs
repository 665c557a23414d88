//! Pure conversion between a [`Field`] and 16-bit grayscale samples.

use terrain_fbm_core::{Field, FieldError};

/// Maps field values in `[lo, hi]` to `0..=u16::MAX`, clamping outside values.
///
/// The buffer is row-major with one sample per cell.
pub fn field_to_luma16(field: &Field, lo: f64, hi: f64) -> Vec<u16> {
    let span = hi - lo;
    field
        .data()
        .iter()
        .map(|&v| {
            let t = if span > 0.0 { (v - lo) / span } else { 0.0 };
            (t.clamp(0.0, 1.0) * f64::from(u16::MAX)).round() as u16
        })
        .collect()
}

/// Builds a field in [0, 1] from row-major 16-bit grayscale samples.
pub fn luma16_to_field(width: usize, height: usize, samples: &[u16]) -> Result<Field, FieldError> {
    let data = samples
        .iter()
        .map(|&s| f64::from(s) / f64::from(u16::MAX))
        .collect();
    Field::from_data(width, height, data)
}
