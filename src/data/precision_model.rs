use super::Coordinate;
use crate::Error;

/// Maps real coordinates onto the grid that noding rounds to.
///
/// A `Fixed` model with scale `s` has grid spacing `1 / s`: a scale of `1.0`
/// rounds to integers, a scale of `100.0` to hundredths. `Floating` performs
/// no rounding at all.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PrecisionModel {
  #[default]
  Floating,
  Fixed {
    scale: f64,
  },
}

impl PrecisionModel {
  /// # Errors
  ///
  /// Returns [`Error::InvalidScale`] unless `scale` is finite and positive.
  pub fn fixed(scale: f64) -> Result<PrecisionModel, Error> {
    if scale.is_finite() && scale > 0.0 {
      Ok(PrecisionModel::Fixed { scale })
    } else {
      Err(Error::InvalidScale(scale))
    }
  }

  pub fn is_floating(&self) -> bool {
    matches!(self, PrecisionModel::Floating)
  }

  /// Grid scale factor. Floating models report `0.0`.
  pub fn scale(&self) -> f64 {
    match self {
      PrecisionModel::Floating => 0.0,
      PrecisionModel::Fixed { scale } => *scale,
    }
  }

  pub fn make_precise_value(&self, value: f64) -> f64 {
    match self {
      PrecisionModel::Floating => value,
      PrecisionModel::Fixed { scale } => (value * scale).round() / scale,
    }
  }

  pub fn make_precise(&self, c: Coordinate) -> Coordinate {
    Coordinate {
      x: self.make_precise_value(c.x),
      y: self.make_precise_value(c.y),
      z: c.z,
    }
  }

  /// Is the coordinate already on the grid?
  pub fn is_precise(&self, c: &Coordinate) -> bool {
    self.make_precise(*c) == *c
  }
}
