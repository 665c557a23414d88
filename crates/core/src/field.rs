//! Two-dimensional scalar field.
//!
//! A `Field` stores `width * height` f64 samples in row-major layout. Values
//! are not clamped: a raw fractal field is signed and its extent depends on
//! the synthesis parameters.

use crate::error::FieldError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A 2D grid of height or noise samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

/// Validates dimensions and returns the sample count.
fn checked_len(width: usize, height: usize) -> Result<usize, FieldError> {
    if width == 0 || height == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(FieldError::InvalidDimensions)
}

impl Field {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        Self::filled(width, height, 0.0)
    }

    /// Creates a field with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, FieldError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Creates a field from a pre-built row-major data vector, validating that
    /// `data.len() == width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, FieldError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(FieldError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a field by evaluating `f(x, y)` for every cell.
    ///
    /// With the `parallel` feature rows are filled concurrently; each cell
    /// depends only on its own coordinate so the result is identical.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Self, FieldError>
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let len = checked_len(width, height)?;
        let mut data = vec![0.0; len];

        #[cfg(feature = "parallel")]
        {
            data.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| fill_row(row, y, &f));
        }

        #[cfg(not(feature = "parallel"))]
        {
            data.chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| fill_row(row, y, &f));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// True when both fields have the same width and height.
    pub fn same_shape(&self, other: &Field) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Returns `FieldError::DimensionMismatch` if the fields differ in size.
    pub fn check_same_shape(&self, other: &Field) -> Result<(), FieldError> {
        if self.same_shape(other) {
            return Ok(());
        }
        Err(FieldError::DimensionMismatch {
            lhs_w: self.width,
            lhs_h: self.height,
            rhs_w: other.width,
            rhs_h: other.height,
        })
    }

    /// Smallest and largest finite sample, or `None` if no sample is finite.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Applies `f` to every sample, producing a new field of the same shape.
    pub fn map<F>(&self, f: F) -> Field
    where
        F: Fn(f64) -> f64,
    {
        Field {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combines two same-shaped fields cell by cell.
    ///
    /// Returns `FieldError::DimensionMismatch` if the fields differ in size.
    pub fn zip_with<F>(&self, other: &Field, f: F) -> Result<Field, FieldError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(other)?;
        Ok(Field {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, v)
        })
    }
}

fn fill_row<F>(row: &mut [f64], y: usize, f: &F)
where
    F: Fn(usize, usize) -> f64,
{
    for (x, cell) in row.iter_mut().enumerate() {
        *cell = f(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Constructor tests --

    #[test]
    fn new_creates_zero_filled_field() {
        let field = Field::new(4, 3).unwrap();
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 3);
        assert_eq!(field.data().len(), 12);
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_with_zero_dimension_returns_error() {
        assert!(matches!(
            Field::new(0, 5),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            Field::new(5, 0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_with_overflow_dimensions_returns_error() {
        assert!(Field::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn filled_keeps_values_outside_unit_interval() {
        let field = Field::filled(2, 2, -3.5).unwrap();
        assert!(field.data().iter().all(|&v| v == -3.5));
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        let result = Field::from_data(2, 2, vec![0.1, 0.2, 0.3]);
        assert!(matches!(result, Err(FieldError::DimensionMismatch { .. })));
    }

    #[test]
    fn from_data_rejects_zero_dimensions() {
        assert!(Field::from_data(0, 5, vec![]).is_err());
    }

    #[test]
    fn from_fn_is_row_major() {
        let field = Field::from_fn(3, 2, |x, y| (y * 10 + x) as f64).unwrap();
        assert_eq!(field.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    // -- Addressing --

    #[test]
    fn get_reads_row_major_cell() {
        let field = Field::from_fn(4, 3, |x, y| (y * 4 + x) as f64).unwrap();
        assert_eq!(field.get(0, 0), Some(0.0));
        assert_eq!(field.get(3, 0), Some(3.0));
        assert_eq!(field.get(2, 1), Some(6.0));
        assert_eq!(field.get(3, 2), Some(11.0));
    }

    #[test]
    fn get_outside_grid_is_none() {
        let field = Field::filled(4, 3, 1.0).unwrap();
        // (4, 0) would alias (0, 1) in the flat buffer
        assert_eq!(field.get(4, 0), None);
        assert_eq!(field.get(0, 3), None);
        assert_eq!(field.get(usize::MAX, usize::MAX), None);
    }

    // -- Shape and extent --

    #[test]
    fn check_same_shape_reports_both_sizes() {
        let a = Field::new(2, 3).unwrap();
        let b = Field::new(3, 2).unwrap();
        assert!(a.check_same_shape(&a.clone()).is_ok());
        assert!(matches!(
            a.check_same_shape(&b),
            Err(FieldError::DimensionMismatch {
                lhs_w: 2,
                lhs_h: 3,
                rhs_w: 3,
                rhs_h: 2
            })
        ));
    }

    #[test]
    fn value_range_finds_extremes() {
        let field = Field::from_data(2, 2, vec![0.5, -1.25, 3.0, 0.0]).unwrap();
        assert_eq!(field.value_range(), Some((-1.25, 3.0)));
    }

    #[test]
    fn value_range_skips_non_finite_samples() {
        let field = Field::from_data(3, 1, vec![f64::NAN, 2.0, f64::INFINITY]).unwrap();
        assert_eq!(field.value_range(), Some((2.0, 2.0)));
        let all_nan = Field::filled(2, 1, f64::NAN).unwrap();
        assert_eq!(all_nan.value_range(), None);
    }

    #[test]
    fn map_does_not_mutate_original() {
        let field = Field::filled(2, 2, 0.4).unwrap();
        let doubled = field.map(|v| v * 2.0);
        assert!(doubled.data().iter().all(|&v| (v - 0.8).abs() < f64::EPSILON));
        assert!(field.data().iter().all(|&v| (v - 0.4).abs() < f64::EPSILON));
    }

    #[test]
    fn zip_with_rejects_mismatched_shapes() {
        let a = Field::new(2, 2).unwrap();
        let b = Field::new(3, 3).unwrap();
        assert!(matches!(
            a.zip_with(&b, |x, y| x + y),
            Err(FieldError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn iter_yields_all_triples_in_row_major_order() {
        let field = Field::from_data(3, 2, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        let triples: Vec<(usize, usize, f64)> = field.iter().collect();
        assert_eq!(triples.len(), 6);
        assert_eq!(triples[0], (0, 0, 0.1));
        assert_eq!(triples[2], (2, 0, 0.3));
        assert_eq!(triples[3], (0, 1, 0.4));
        assert_eq!(triples[5], (2, 1, 0.6));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = usize> {
            1_usize..=48
        }

        proptest! {
            #[test]
            fn get_agrees_with_iter(
                w in dimension(),
                h in dimension(),
                dx in 0_usize..4,
                dy in 0_usize..4,
            ) {
                let field = Field::from_fn(w, h, |x, y| (x * 1000 + y) as f64).unwrap();
                for (x, y, v) in field.iter() {
                    prop_assert_eq!(field.get(x, y), Some(v));
                }
                prop_assert_eq!(field.get(w + dx, dy), None);
                prop_assert_eq!(field.get(dx, h + dy), None);
            }

            #[test]
            fn from_fn_matches_iter_coordinates(w in dimension(), h in dimension()) {
                let field = Field::from_fn(w, h, |x, y| (x * 1000 + y) as f64).unwrap();
                for (x, y, v) in field.iter() {
                    prop_assert_eq!(v, (x * 1000 + y) as f64);
                }
            }
        }
    }
}
