use rstar::AABB;

use super::Coordinate;

/// Axis-aligned bounding box. Boundaries are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
  pub min_x: f64,
  pub max_x: f64,
  pub min_y: f64,
  pub max_y: f64,
}

impl Envelope {
  pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Envelope {
    Envelope {
      min_x,
      max_x,
      min_y,
      max_y,
    }
  }

  pub fn of_point(p: &Coordinate) -> Envelope {
    Envelope::new(p.x, p.x, p.y, p.y)
  }

  pub fn of_segment(p0: &Coordinate, p1: &Coordinate) -> Envelope {
    Envelope::new(
      p0.x.min(p1.x),
      p0.x.max(p1.x),
      p0.y.min(p1.y),
      p0.y.max(p1.y),
    )
  }

  /// Envelope of a non-empty run of coordinates.
  pub fn of_points<'a>(pts: impl IntoIterator<Item = &'a Coordinate>) -> Option<Envelope> {
    let mut iter = pts.into_iter();
    let mut env = Envelope::of_point(iter.next()?);
    for p in iter {
      env.expand_to_include(p);
    }
    Some(env)
  }

  pub fn expand_to_include(&mut self, p: &Coordinate) {
    self.min_x = self.min_x.min(p.x);
    self.max_x = self.max_x.max(p.x);
    self.min_y = self.min_y.min(p.y);
    self.max_y = self.max_y.max(p.y);
  }

  #[must_use]
  pub fn expand_by(&self, distance: f64) -> Envelope {
    Envelope::new(
      self.min_x - distance,
      self.max_x + distance,
      self.min_y - distance,
      self.max_y + distance,
    )
  }

  pub fn centre(&self) -> Coordinate {
    Coordinate::new(
      (self.min_x + self.max_x) / 2.0,
      (self.min_y + self.max_y) / 2.0,
    )
  }

  pub fn intersects(&self, other: &Envelope) -> bool {
    !(other.min_x > self.max_x
      || other.max_x < self.min_x
      || other.min_y > self.max_y
      || other.max_y < self.min_y)
  }

  /// Overlap of two envelopes, if any.
  pub fn intersection(&self, other: &Envelope) -> Option<Envelope> {
    if !self.intersects(other) {
      return None;
    }
    Some(Envelope::new(
      self.min_x.max(other.min_x),
      self.max_x.min(other.max_x),
      self.min_y.max(other.min_y),
      self.max_y.min(other.max_y),
    ))
  }

  pub fn intersects_segment(&self, p0: &Coordinate, p1: &Coordinate) -> bool {
    self.intersects(&Envelope::of_segment(p0, p1))
  }

  pub fn contains_point(&self, p: &Coordinate) -> bool {
    p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
  }

  /// Does `q` lie in the box spanned by `p1` and `p2`?
  pub fn segment_contains(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> bool {
    q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
  }

  /// Do the boxes spanned by `p1 p2` and `q1 q2` overlap?
  pub fn segments_overlap(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> bool {
    Envelope::of_segment(p1, p2).intersects(&Envelope::of_segment(q1, q2))
  }

  pub fn to_aabb(&self) -> AABB<[f64; 2]> {
    AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
  }
}

impl From<Envelope> for AABB<[f64; 2]> {
  fn from(env: Envelope) -> AABB<[f64; 2]> {
    env.to_aabb()
  }
}
