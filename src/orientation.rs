use crate::data::Coordinate;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}
use Orientation::*;

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `q`.
  ///
  /// The sign is computed with Shewchuk's adaptive-precision `orient2d`
  /// predicate, so it is exact for every finite input, including points that
  /// are nearly colinear.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use snapround::data::Coordinate;
  /// # use snapround::Orientation;
  /// let p1 = Coordinate::new(0.0, 0.0);
  /// let p2 = Coordinate::new(0.0, 1.0); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Coordinate::new(0.0, 2.0)).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Coordinate::new(-1.0, 2.0)).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Coordinate::new(1.0, 2.0)).is_cw());
  /// ```
  pub fn new(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
    Orientation::from_det(geometry_predicates::predicates::orient2d(
      p1.xy(),
      p2.xy(),
      q.xy(),
    ))
  }

  fn from_det(det: f64) -> Orientation {
    if det > 0.0 {
      CounterClockWise
    } else if det < 0.0 {
      ClockWise
    } else {
      CoLinear
    }
  }

  /// `1` for a left turn, `-1` for a right turn and `0` when colinear.
  pub fn index(self) -> i32 {
    match self {
      CounterClockWise => 1,
      ClockWise => -1,
      CoLinear => 0,
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, ClockWise)
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      CounterClockWise => ClockWise,
      ClockWise => CounterClockWise,
      CoLinear => CoLinear,
    }
  }

  /// Do `a` and `b` lie strictly on the same side of a line?
  pub fn same_side(a: Orientation, b: Orientation) -> bool {
    (a.is_ccw() && b.is_ccw()) || (a.is_cw() && b.is_cw())
  }
}

/// Sign of the turn `p1 -> p2 -> q`: `1` when `q` is strictly left of the ray
/// `p1 -> p2`, `-1` when strictly right and `0` when the three are colinear.
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> i32 {
  Orientation::new(p1, p2, q).index()
}
