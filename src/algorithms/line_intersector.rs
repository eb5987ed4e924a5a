//! Robust segment/segment intersection.
//!
//! Classification (disjoint, single point, colinear overlap) and the
//! "proper" flag are derived exclusively from exact orientation tests on the
//! four endpoint triples. Only the location of a proper intersection is
//! computed with floating point arithmetic, and that location is checked
//! against the segment envelopes and optionally rounded to a precision grid.
use crate::data::{Coordinate, Envelope, PrecisionModel};
use crate::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionKind {
  None,
  /// A single shared point, possibly an endpoint.
  Point,
  /// The segments are colinear and overlap. One or two points are recorded.
  Collinear,
}

impl IntersectionKind {
  pub fn point_count(self) -> usize {
    match self {
      IntersectionKind::None => 0,
      IntersectionKind::Point => 1,
      IntersectionKind::Collinear => 2,
    }
  }
}

/// Computes and remembers the intersection of the most recent pair of
/// segments handed to it.
#[derive(Debug, Clone)]
pub struct LineIntersector {
  precision_model: Option<PrecisionModel>,
  kind: IntersectionKind,
  proper: bool,
  points: [Coordinate; 2],
  input: [[Coordinate; 2]; 2],
}

impl Default for LineIntersector {
  fn default() -> Self {
    LineIntersector::new()
  }
}

impl LineIntersector {
  pub fn new() -> LineIntersector {
    let origin = Coordinate::new(0.0, 0.0);
    LineIntersector {
      precision_model: None,
      kind: IntersectionKind::None,
      proper: false,
      points: [origin; 2],
      input: [[origin; 2]; 2],
    }
  }

  /// Proper intersection points will be rounded with `pm`.
  pub fn with_precision_model(pm: PrecisionModel) -> LineIntersector {
    LineIntersector {
      precision_model: Some(pm),
      ..LineIntersector::new()
    }
  }

  pub fn kind(&self) -> IntersectionKind {
    self.kind
  }

  pub fn has_intersection(&self) -> bool {
    self.kind != IntersectionKind::None
  }

  /// Number of recorded intersection points (0, 1 or 2).
  pub fn intersection_num(&self) -> usize {
    self.kind.point_count()
  }

  /// Is the intersection a single point interior to both segments?
  pub fn is_proper(&self) -> bool {
    self.has_intersection() && self.proper
  }

  /// # Panics
  ///
  /// Panics if `i > 1`.
  pub fn intersection(&self, i: usize) -> Coordinate {
    self.points[i]
  }

  pub fn intersections(&self) -> &[Coordinate] {
    &self.points[..self.intersection_num()]
  }

  /// Is `pt` one of the computed intersection points?
  pub fn is_intersection(&self, pt: &Coordinate) -> bool {
    self.intersections().iter().any(|p| p == pt)
  }

  /// Is some intersection point interior to at least one of the inputs?
  pub fn is_interior_intersection(&self) -> bool {
    self.is_interior_intersection_on(0) || self.is_interior_intersection_on(1)
  }

  /// Is some intersection point interior to input segment `input_index`?
  pub fn is_interior_intersection_on(&self, input_index: usize) -> bool {
    let [a, b] = &self.input[input_index];
    self.intersections().iter().any(|p| p != a && p != b)
  }

  /// Point/segment incidence. A point strictly inside the segment counts as
  /// proper; a point equal to an endpoint does not.
  pub fn compute_point_intersection(
    &mut self,
    p: &Coordinate,
    p1: &Coordinate,
    p2: &Coordinate,
  ) -> IntersectionKind {
    self.proper = false;
    self.input = [[*p, *p], [*p1, *p2]];
    self.kind = IntersectionKind::None;
    if Envelope::segment_contains(p1, p2, p)
      && Orientation::new(p1, p2, p).is_colinear()
      && Orientation::new(p2, p1, p).is_colinear()
    {
      self.proper = p != p1 && p != p2;
      self.points[0] = *p;
      self.kind = IntersectionKind::Point;
    }
    self.kind
  }

  pub fn compute_intersection(
    &mut self,
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
  ) -> IntersectionKind {
    self.input = [[*p1, *p2], [*q1, *q2]];
    self.proper = false;
    self.kind = self.compute(p1, p2, q1, q2);
    self.kind
  }

  fn compute(
    &mut self,
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
  ) -> IntersectionKind {
    if !Envelope::segments_overlap(p1, p2, q1, q2) {
      return IntersectionKind::None;
    }

    // Both endpoints of q strictly on one side of p: no intersection.
    let pq1 = Orientation::new(p1, p2, q1);
    let pq2 = Orientation::new(p1, p2, q2);
    if Orientation::same_side(pq1, pq2) {
      return IntersectionKind::None;
    }

    let qp1 = Orientation::new(q1, q2, p1);
    let qp2 = Orientation::new(q1, q2, p2);
    if Orientation::same_side(qp1, qp2) {
      return IntersectionKind::None;
    }

    if pq1.is_colinear() && pq2.is_colinear() && qp1.is_colinear() && qp2.is_colinear() {
      return self.compute_collinear(p1, p2, q1, q2);
    }

    // At least one endpoint lies on the other segment: an endpoint
    // intersection. Pick the endpoint exactly instead of computing it.
    if pq1.is_colinear() || pq2.is_colinear() || qp1.is_colinear() || qp2.is_colinear() {
      self.points[0] = if p1 == q1 || p1 == q2 {
        *p1
      } else if p2 == q1 || p2 == q2 {
        *p2
      } else if pq1.is_colinear() {
        *q1
      } else if pq2.is_colinear() {
        *q2
      } else if qp1.is_colinear() {
        *p1
      } else {
        *p2
      };
      return IntersectionKind::Point;
    }

    self.proper = true;
    self.points[0] = self.proper_intersection(p1, p2, q1, q2);
    IntersectionKind::Point
  }

  fn compute_collinear(
    &mut self,
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
  ) -> IntersectionKind {
    let p1q1p2 = Envelope::segment_contains(p1, p2, q1);
    let p1q2p2 = Envelope::segment_contains(p1, p2, q2);
    let q1p1q2 = Envelope::segment_contains(q1, q2, p1);
    let q1p2q2 = Envelope::segment_contains(q1, q2, p2);

    let (a, b, single) = if p1q1p2 && p1q2p2 {
      (q1, q2, false)
    } else if q1p1q2 && q1p2q2 {
      (p1, p2, false)
    } else if p1q1p2 && q1p1q2 {
      (q1, p1, q1 == p1 && !p1q2p2 && !q1p2q2)
    } else if p1q1p2 && q1p2q2 {
      (q1, p2, q1 == p2 && !p1q2p2 && !q1p1q2)
    } else if p1q2p2 && q1p1q2 {
      (q2, p1, q2 == p1 && !p1q1p2 && !q1p2q2)
    } else if p1q2p2 && q1p2q2 {
      (q2, p2, q2 == p2 && !p1q1p2 && !q1p1q2)
    } else {
      return IntersectionKind::None;
    };
    self.points = [*a, *b];
    if single {
      IntersectionKind::Point
    } else {
      IntersectionKind::Collinear
    }
  }

  fn proper_intersection(
    &self,
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
  ) -> Coordinate {
    let mut pt = match intersection_with_normalization(p1, p2, q1, q2) {
      Some(pt) if in_segment_envelopes(&pt, p1, p2, q1, q2) => pt,
      _ => central_endpoint(p1, p2, q1, q2),
    };
    if let Some(pm) = &self.precision_model {
      pt = pm.make_precise(pt);
    }
    pt
  }
}

fn in_segment_envelopes(
  pt: &Coordinate,
  p1: &Coordinate,
  p2: &Coordinate,
  q1: &Coordinate,
  q2: &Coordinate,
) -> bool {
  Envelope::of_segment(p1, p2).contains_point(pt) && Envelope::of_segment(q1, q2).contains_point(pt)
}

/// Intersect the infinite lines through both segments after translating
/// the inputs so that the centre of the envelope overlap sits at the
/// origin. Translation keeps the products in the determinant small, which
/// preserves most of the significant bits.
fn intersection_with_normalization(
  p1: &Coordinate,
  p2: &Coordinate,
  q1: &Coordinate,
  q2: &Coordinate,
) -> Option<Coordinate> {
  let centre = Envelope::of_segment(p1, p2)
    .intersection(&Envelope::of_segment(q1, q2))?
    .centre();
  let shift = |c: &Coordinate| Coordinate::new(c.x - centre.x, c.y - centre.y);
  let pt = homogeneous_intersection(&shift(p1), &shift(p2), &shift(q1), &shift(q2))?;
  Some(Coordinate::new(pt.x + centre.x, pt.y + centre.y))
}

fn homogeneous_intersection(
  p1: &Coordinate,
  p2: &Coordinate,
  q1: &Coordinate,
  q2: &Coordinate,
) -> Option<Coordinate> {
  let px = p1.y - p2.y;
  let py = p2.x - p1.x;
  let pw = p1.x * p2.y - p2.x * p1.y;

  let qx = q1.y - q2.y;
  let qy = q2.x - q1.x;
  let qw = q1.x * q2.y - q2.x * q1.y;

  let x = py * qw - qy * pw;
  let y = qx * pw - px * qw;
  let w = px * qy - qx * py;

  let pt = Coordinate::new(x / w, y / w);
  pt.is_finite().then_some(pt)
}

/// Fallback when round-off puts the computed point outside the segments:
/// the endpoint nearest to the average of all four endpoints.
fn central_endpoint(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
  let pts = [p1, p2, q1, q2];
  let avg = Coordinate::new(
    pts.iter().map(|p| p.x).sum::<f64>() / 4.0,
    pts.iter().map(|p| p.y).sum::<f64>() / 4.0,
  );
  let mut best = *p1;
  let mut best_dist = f64::INFINITY;
  for p in pts {
    let d = p.distance(&avg);
    if d < best_dist {
      best_dist = d;
      best = *p;
    }
  }
  best
}
