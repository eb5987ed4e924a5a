use super::Coordinate;
use crate::algorithms::line_intersector::{IntersectionKind, LineIntersector};
use crate::algorithms::predicates;
use crate::Intersects;

///////////////////////////////////////////////////////////////////////////////
// LineSegment

/// A directed segment from `p0` to `p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
  pub p0: Coordinate,
  pub p1: Coordinate,
}

impl LineSegment {
  pub const fn new(p0: Coordinate, p1: Coordinate) -> LineSegment {
    LineSegment { p0, p1 }
  }

  pub fn length(&self) -> f64 {
    self.p0.distance(&self.p1)
  }

  /// Position of the orthogonal projection of `p` along the infinite line
  /// through the segment: `0` at `p0`, `1` at `p1`. Unbounded.
  ///
  /// A degenerate segment reports `0`.
  pub fn projection_factor(&self, p: &Coordinate) -> f64 {
    if p == &self.p0 {
      return 0.0;
    }
    if p == &self.p1 {
      return 1.0;
    }
    let dx = self.p1.x - self.p0.x;
    let dy = self.p1.y - self.p0.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
      return 0.0;
    }
    ((p.x - self.p0.x) * dx + (p.y - self.p0.y) * dy) / len2
  }

  /// The projection factor clamped to `[0, 1]`.
  pub fn segment_fraction(&self, p: &Coordinate) -> f64 {
    self.projection_factor(p).clamp(0.0, 1.0)
  }

  pub fn distance_to_point(&self, p: &Coordinate) -> f64 {
    predicates::distance_point_line(p, &self.p0, &self.p1)
  }

  pub fn distance_to_segment(&self, other: &LineSegment) -> f64 {
    predicates::distance_line_line(&self.p0, &self.p1, &other.p0, &other.p1)
  }
}

impl From<(Coordinate, Coordinate)> for LineSegment {
  fn from((p0, p1): (Coordinate, Coordinate)) -> LineSegment {
    LineSegment::new(p0, p1)
  }
}

///////////////////////////////////////////////////////////////////////////////
// SegmentIntersection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
  /// Segments meet in a single point. `proper` is set when the point lies in
  /// the interior of both segments.
  Point { at: Coordinate, proper: bool },
  /// Segments are colinear and share the stretch between the two points.
  Overlap(Coordinate, Coordinate),
}

///////////////////////////////////////////////////////////////////////////////
// Intersects

impl<'a> Intersects for &'a LineSegment {
  type Result = SegmentIntersection;
  fn intersect(self, other: &'a LineSegment) -> Option<Self::Result> {
    let mut li = LineIntersector::new();
    match li.compute_intersection(&self.p0, &self.p1, &other.p0, &other.p1) {
      IntersectionKind::None => None,
      IntersectionKind::Point => Some(SegmentIntersection::Point {
        at: li.intersection(0),
        proper: li.is_proper(),
      }),
      IntersectionKind::Collinear => Some(SegmentIntersection::Overlap(
        li.intersection(0),
        li.intersection(1),
      )),
    }
  }
}
