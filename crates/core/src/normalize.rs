//! Linear rescaling of a field's value range into a target range.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FieldError;
use crate::field::Field;

/// Target interval for [`normalize_with`]. Defaults to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for NormalizeRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl NormalizeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds must be finite with `min < max`, and `max - min` must not
    /// overflow.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.min.is_finite()
            && self.max.is_finite()
            && self.min < self.max
            && self.span().is_finite()
        {
            Ok(())
        } else {
            Err(FieldError::InvalidRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// How the source extent of a field is measured before rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSeed {
    /// The true minimum and maximum of the field.
    #[default]
    Observed,
    /// The search starts from min = 0 and max = 1 and only widens. A field
    /// lying inside [0, 1] is then mapped as if it spanned all of [0, 1].
    /// Reproduces heightmaps made with the older normalization.
    UnitInterval,
}

impl RangeSeed {
    /// Parses `"observed"` or `"unit"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "observed" => Some(RangeSeed::Observed),
            "unit" | "unit_interval" => Some(RangeSeed::UnitInterval),
            _ => None,
        }
    }

    /// Name accepted by [`from_name`](Self::from_name).
    pub fn name(self) -> &'static str {
        match self {
            RangeSeed::Observed => "observed",
            RangeSeed::UnitInterval => "unit",
        }
    }

    fn extent(self, field: &Field) -> Option<(f64, f64)> {
        let observed = field.value_range();
        match self {
            RangeSeed::Observed => observed,
            RangeSeed::UnitInterval => {
                let (lo, hi) = observed.unwrap_or((0.0, 1.0));
                Some((lo.min(0.0), hi.max(1.0)))
            }
        }
    }
}

/// Rescales `field` so its minimum lands on `target_min` and its maximum on
/// `target_max`.
///
/// Returns `FieldError::InvalidRange` for an unordered or non-finite target,
/// `FieldError::NonFiniteSample` if the field holds NaN or an infinity, and
/// `FieldError::DegenerateRange` when every sample is equal.
pub fn normalize(field: &Field, target_min: f64, target_max: f64) -> Result<Field, FieldError> {
    normalize_with(
        field,
        NormalizeRange::new(target_min, target_max),
        RangeSeed::Observed,
    )
}

/// Rescales `field` into `target`, measuring its extent according to `seed`.
pub fn normalize_with(
    field: &Field,
    target: NormalizeRange,
    seed: RangeSeed,
) -> Result<Field, FieldError> {
    target.validate()?;
    if let Some((x, y, value)) = field.iter().find(|&(_, _, v)| !v.is_finite()) {
        return Err(FieldError::NonFiniteSample { x, y, value });
    }
    let (lo, hi) = seed
        .extent(field)
        .ok_or(FieldError::DegenerateRange { value: f64::NAN })?;
    let range = hi - lo;
    if !range.is_finite() {
        return Err(FieldError::ExtentOverflow { min: lo, max: hi });
    }
    if range <= 0.0 {
        return Err(FieldError::DegenerateRange { value: lo });
    }
    debug!(
        source_min = lo,
        source_max = hi,
        target_min = target.min,
        target_max = target.max,
        ?seed,
        "normalizing field"
    );

    let span = target.span();
    Ok(field.map(|v| target.min + ((v - lo) / range) * span))
}
