//! Orientation, containment and distance predicates over plain coordinate
//! slices.
//!
//! Every sign decision goes through [`Orientation`], which is exact. The
//! distance functions use ordinary floating point arithmetic.
use crate::algorithms::line_intersector::LineIntersector;
use crate::data::Coordinate;
use crate::Orientation;

pub use crate::orientation::orientation_index;

pub fn compute_orientation(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
  Orientation::new(p1, p2, q)
}

/// Crossing-number test of `p` against a closed ring.
///
/// A ray is cast from `p` in the `+x` direction. An edge counts as a crossing
/// when one endpoint is strictly above `p` and the other is at or below it,
/// and the crossing lies strictly to the right of `p`. The result for points
/// exactly on the boundary is unspecified.
///
/// # Examples
///
/// ```rust
/// # use snapround::algorithms::predicates::is_point_in_ring;
/// # use snapround::data::Coordinate;
/// let ring: Vec<Coordinate> = [(0., 0.), (10., 0.), (10., 10.), (0., 10.), (0., 0.)]
///   .into_iter()
///   .map(Coordinate::from)
///   .collect();
/// assert!(is_point_in_ring(&Coordinate::new(5.0, 5.0), &ring));
/// assert!(!is_point_in_ring(&Coordinate::new(15.0, 5.0), &ring));
/// ```
pub fn is_point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> bool {
  let mut crossings = 0usize;
  for edge in ring.windows(2) {
    let (p2, p1) = (&edge[0], &edge[1]);
    let y1 = p1.y - p.y;
    let y2 = p2.y - p.y;
    if (y1 > 0.0 && y2 <= 0.0) || (y2 > 0.0 && y1 <= 0.0) {
      // Sign of the translated determinant, divided by the edge's rise,
      // gives the side of the crossing relative to p.
      let sign = f64::from(Orientation::new(p1, p2, p).index());
      if sign / (y2 - y1) > 0.0 {
        crossings += 1;
      }
    }
  }
  crossings % 2 == 1
}

/// Does `p` lie on any segment of `line`?
pub fn is_on_line(p: &Coordinate, line: &[Coordinate]) -> bool {
  let mut li = LineIntersector::new();
  line.windows(2).any(|seg| {
    li.compute_point_intersection(p, &seg[0], &seg[1]);
    li.has_intersection()
  })
}

/// Is the closed ring oriented counter-clockwise?
///
/// Inspects the turn at the highest vertex and its immediate ring
/// neighbours. Rings with fewer than four coordinates report `false`. So
/// does any ring whose first highest vertex is repeated next to itself, or
/// whose neighbours coincide (A-B-A), even when the ring has three or more
/// distinct points elsewhere.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
  if ring.len() < 4 {
    return false;
  }
  // The closing coordinate repeats the first.
  let n = ring.len() - 1;
  let mut hi = 0;
  for i in 1..n {
    if ring[i].y > ring[hi].y {
      hi = i;
    }
  }
  let prev = &ring[(hi + n - 1) % n];
  let high = &ring[hi];
  let next = &ring[(hi + 1) % n];

  if prev == high || next == high || prev == next {
    return false;
  }

  match compute_orientation(prev, high, next) {
    // Both neighbours lie level with the high point, on opposite sides.
    Orientation::CoLinear => prev.x > next.x,
    o => o.is_ccw(),
  }
}

/// Shoelace area of a ring. Positive for clockwise rings, negative for
/// counter-clockwise ones and `0.0` with fewer than three points.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
  if ring.len() < 3 {
    return 0.0;
  }
  let sum: f64 = ring
    .windows(2)
    .map(|w| (w[0].x + w[1].x) * (w[1].y - w[0].y))
    .sum();
  -sum / 2.0
}

/// Distance from `p` to the segment `a b`. A degenerate segment falls back
/// to the point distance.
pub fn distance_point_line(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
  if a == b {
    return p.distance(a);
  }
  let dx = b.x - a.x;
  let dy = b.y - a.y;
  let len2 = dx * dx + dy * dy;
  let r = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
  if r <= 0.0 {
    return p.distance(a);
  }
  if r >= 1.0 {
    return p.distance(b);
  }
  distance_point_line_perpendicular(p, a, b)
}

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// Undefined (NaN) when `a == b`; callers must guard against degenerate
/// segments.
pub fn distance_point_line_perpendicular(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
  let dx = b.x - a.x;
  let dy = b.y - a.y;
  let len2 = dx * dx + dy * dy;
  let s = ((a.y - p.y) * dx - (a.x - p.x) * dy) / len2;
  s.abs() * len2.sqrt()
}

/// Distance between the segments `a b` and `c d`; `0.0` when they
/// intersect.
pub fn distance_line_line(a: &Coordinate, b: &Coordinate, c: &Coordinate, d: &Coordinate) -> f64 {
  if a == b {
    return distance_point_line(a, c, d);
  }
  if c == d {
    return distance_point_line(d, a, b);
  }

  let endpoint_distance = || {
    distance_point_line(a, c, d)
      .min(distance_point_line(b, c, d))
      .min(distance_point_line(c, a, b))
      .min(distance_point_line(d, a, b))
  };

  let r_top = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
  let s_top = (a.y - c.y) * (b.x - a.x) - (a.x - c.x) * (b.y - a.y);
  let bot = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);

  // Parallel or colinear.
  if bot == 0.0 {
    return endpoint_distance();
  }

  let r = r_top / bot;
  let s = s_top / bot;
  if !(0.0..=1.0).contains(&r) || !(0.0..=1.0).contains(&s) {
    return endpoint_distance();
  }
  0.0
}

/// Length of the path through `coords`.
pub fn length(coords: &[Coordinate]) -> f64 {
  coords.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::testing::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
  }

  fn ring(pts: &[(f64, f64)]) -> Vec<Coordinate> {
    pts.iter().copied().map(Coordinate::from).collect()
  }

  fn square() -> Vec<Coordinate> {
    ring(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.), (0., 0.)])
  }

  #[test]
  fn point_in_square() {
    let sq = square();
    assert!(is_point_in_ring(&c(5.0, 5.0), &sq));
    assert!(!is_point_in_ring(&c(15.0, 5.0), &sq));
    assert!(!is_point_in_ring(&c(-1.0, 5.0), &sq));
    assert!(!is_point_in_ring(&c(5.0, 11.0), &sq));
  }

  #[test]
  fn point_in_concave_ring() {
    // A "U" shape opening upwards.
    let u = ring(&[
      (0., 0.),
      (9., 0.),
      (9., 9.),
      (6., 9.),
      (6., 3.),
      (3., 3.),
      (3., 9.),
      (0., 9.),
      (0., 0.),
    ]);
    assert!(is_point_in_ring(&c(1.0, 5.0), &u));
    assert!(is_point_in_ring(&c(4.5, 1.0), &u));
    assert!(!is_point_in_ring(&c(4.5, 5.0), &u));
    // Ray passes exactly through vertices at y = 3 and y = 9.
    assert!(is_point_in_ring(&c(1.0, 3.0), &u));
    assert!(!is_point_in_ring(&c(-1.0, 9.0), &u));
  }

  #[test]
  fn on_line() {
    let line = ring(&[(0., 0.), (10., 0.), (10., 10.)]);
    assert!(is_on_line(&c(5.0, 0.0), &line));
    assert!(is_on_line(&c(10.0, 10.0), &line));
    assert!(!is_on_line(&c(5.0, 5.0), &line));
  }

  #[test]
  fn ccw_square() {
    let sq = square();
    assert!(is_ccw(&sq));
    let rev: Vec<Coordinate> = sq.iter().rev().copied().collect();
    assert!(!is_ccw(&rev));
  }

  #[test]
  fn ccw_flat_top() {
    // The high point has level neighbours on both sides.
    let r = ring(&[(5., 10.), (0., 10.), (0., 0.), (10., 0.), (10., 10.), (5., 10.)]);
    assert!(is_ccw(&r));
    let r = ring(&[(0., 0.), (10., 0.), (10., 10.), (5., 10.), (0., 10.), (0., 0.)]);
    assert!(is_ccw(&r));
  }

  #[test]
  fn ccw_degenerate() {
    assert!(!is_ccw(&ring(&[(0., 0.), (1., 1.), (0., 0.)])));
    assert!(!is_ccw(&ring(&[(0., 0.), (1., 1.), (2., 0.), (1., 1.), (0., 0.)])));
  }

  #[test]
  fn ccw_repeated_high_point() {
    let square = ring(&[(0., 0.), (10., 0.), (10., 10.), (10., 10.), (0., 10.), (0., 0.)]);
    assert_eq!(signed_area(&square), -100.0);
    assert!(!is_ccw(&square));
  }

  #[test]
  fn area_sign() {
    let sq = square();
    assert_eq!(signed_area(&sq), -100.0);
    let rev: Vec<Coordinate> = sq.iter().rev().copied().collect();
    assert_eq!(signed_area(&rev), 100.0);
    assert_eq!(signed_area(&sq[..2]), 0.0);
  }

  #[test]
  fn point_line_distance() {
    assert_eq!(distance_point_line(&c(0.0, 5.0), &c(0.0, 0.0), &c(10.0, 0.0)), 5.0);
    assert_eq!(distance_point_line(&c(-3.0, 4.0), &c(0.0, 0.0), &c(10.0, 0.0)), 5.0);
    assert_eq!(distance_point_line(&c(13.0, 4.0), &c(0.0, 0.0), &c(10.0, 0.0)), 5.0);
    assert_eq!(distance_point_line(&c(3.0, 4.0), &c(0.0, 0.0), &c(0.0, 0.0)), 5.0);
    assert_eq!(
      distance_point_line_perpendicular(&c(-3.0, 4.0), &c(0.0, 0.0), &c(10.0, 0.0)),
      4.0
    );
  }

  #[test]
  fn line_line_distance() {
    let (a, b) = (c(0.0, 0.0), c(10.0, 10.0));
    assert_eq!(distance_line_line(&a, &b, &c(0.0, 10.0), &c(10.0, 0.0)), 0.0);
    assert_eq!(distance_line_line(&c(0.0, 0.0), &c(10.0, 0.0), &c(0.0, 3.0), &c(10.0, 3.0)), 3.0);
    assert_eq!(
      distance_line_line(&c(0.0, 0.0), &c(4.0, 0.0), &c(6.0, 1.0), &c(6.0, 5.0)),
      c(4.0, 0.0).distance(&c(6.0, 1.0))
    );
    assert_eq!(distance_line_line(&a, &a, &c(3.0, 0.0), &c(3.0, 8.0)), 3.0);
  }

  #[test]
  fn path_length() {
    assert_eq!(length(&ring(&[(0., 0.), (3., 4.), (3., 10.)])), 11.0);
    assert_eq!(length(&ring(&[(1., 1.)])), 0.0);
    assert_eq!(length(&[]), 0.0);
  }

  #[proptest]
  fn reversal_preserves_containment(
    #[strategy(any_simple_ring())] ring: Vec<Coordinate>,
    #[strategy(grid_coordinate(40))] p: Coordinate,
  ) {
    prop_assume!(!is_on_line(&p, &ring));
    let rev: Vec<Coordinate> = ring.iter().rev().copied().collect();
    prop_assert_eq!(is_point_in_ring(&p, &ring), is_point_in_ring(&p, &rev));
  }

  #[proptest]
  fn area_sign_agrees_with_ccw(#[strategy(any_simple_ring())] ring: Vec<Coordinate>) {
    let area = signed_area(&ring);
    prop_assume!(area != 0.0);
    prop_assert_eq!(area < 0.0, is_ccw(&ring));
    let rev: Vec<Coordinate> = ring.iter().rev().copied().collect();
    prop_assert_eq!(signed_area(&rev) < 0.0, is_ccw(&rev));
  }
}
