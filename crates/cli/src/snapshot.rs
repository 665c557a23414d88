//! PNG reading and writing of height fields as 16-bit grayscale images.
//!
//! The pixel conversion itself lives in [`crate::pixel`].

use std::path::Path;

use terrain_fbm_core::{Field, FieldError};

use crate::pixel::{field_to_luma16, luma16_to_field};

type Luma16Image = image::ImageBuffer<image::Luma<u16>, Vec<u16>>;

/// Writes a field as a 16-bit grayscale PNG, mapping `[lo, hi]` to black..white.
///
/// Returns `FieldError::InvalidDimensions` if the field dimensions overflow
/// `u32`, or `FieldError::Io` on write failure.
pub fn write_png(field: &Field, lo: f64, hi: f64, path: &Path) -> Result<(), FieldError> {
    let samples = field_to_luma16(field, lo, hi);
    let w = u32::try_from(field.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(field.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = Luma16Image::from_raw(w, h, samples)
        .ok_or_else(|| FieldError::Io("luma buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))
}

/// Reads any grayscale or color PNG as a field in [0, 1] (luma).
pub fn read_png(path: &Path) -> Result<Field, FieldError> {
    let img = image::open(path)
        .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?
        .to_luma16();
    let (w, h) = (img.width() as usize, img.height() as usize);
    luma16_to_field(w, h, img.as_raw())
}
