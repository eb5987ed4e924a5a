use std::fmt;

/// A planar position with an optional elevation.
///
/// Equality compares `x` and `y` exactly. The `z` ordinate is carried along
/// but ignored by every predicate and by `PartialEq`.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
  pub x: f64,
  pub y: f64,
  pub z: Option<f64>,
}

impl Coordinate {
  pub const fn new(x: f64, y: f64) -> Coordinate {
    Coordinate { x, y, z: None }
  }

  pub const fn new_3d(x: f64, y: f64, z: f64) -> Coordinate {
    Coordinate { x, y, z: Some(z) }
  }

  pub fn equals_2d(&self, other: &Coordinate) -> bool {
    self.x == other.x && self.y == other.y
  }

  pub fn distance(&self, other: &Coordinate) -> f64 {
    (self.x - other.x).hypot(self.y - other.y)
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite()
  }

  pub(crate) fn xy(&self) -> [f64; 2] {
    [self.x, self.y]
  }
}

impl PartialEq for Coordinate {
  fn eq(&self, other: &Coordinate) -> bool {
    self.equals_2d(other)
  }
}

impl From<(f64, f64)> for Coordinate {
  fn from((x, y): (f64, f64)) -> Coordinate {
    Coordinate::new(x, y)
  }
}

impl From<[f64; 2]> for Coordinate {
  fn from([x, y]: [f64; 2]) -> Coordinate {
    Coordinate::new(x, y)
  }
}

impl fmt::Display for Coordinate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.z {
      Some(z) => write!(f, "({} {} {})", self.x, self.y, z),
      None => write!(f, "({} {})", self.x, self.y),
    }
  }
}
