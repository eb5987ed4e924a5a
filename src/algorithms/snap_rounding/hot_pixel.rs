use crate::algorithms::line_intersector::LineIntersector;
use crate::data::{Coordinate, Envelope, SegmentString};

// Half-width of the pixel, in grid units.
const TOLERANCE: f64 = 0.5;
// Half-width of the envelope used to query for nearby segments, in grid
// units. Larger than the pixel to absorb round-off.
const SAFE_TOLERANCE: f64 = 0.75;

/// The unit square of the snapping grid around a rounded point.
///
/// All tests run in scaled (grid) space, where the pixel spans
/// `centre ± 0.5`. The top and right sides are treated as open: a segment
/// that only touches them does not hit the pixel.
#[derive(Debug, Clone)]
pub struct HotPixel {
  original: Coordinate,
  snapped: Coordinate,
  scale: f64,
  /// Rounded point in scaled space.
  centre: Coordinate,
  // [0] = (max_x, max_y), then counter-clockwise.
  corners: [Coordinate; 4],
  envelope: Envelope,
}

impl HotPixel {
  /// `scale` is the grid scale of a fixed precision model and must be
  /// positive.
  pub fn new(pt: Coordinate, scale: f64) -> HotPixel {
    let centre = Coordinate::new((pt.x * scale).round(), (pt.y * scale).round());
    let envelope = Envelope::of_point(&centre).expand_by(TOLERANCE);
    let corners = [
      Coordinate::new(envelope.max_x, envelope.max_y),
      Coordinate::new(envelope.min_x, envelope.max_y),
      Coordinate::new(envelope.min_x, envelope.min_y),
      Coordinate::new(envelope.max_x, envelope.min_y),
    ];
    HotPixel {
      original: pt,
      snapped: Coordinate {
        x: centre.x / scale,
        y: centre.y / scale,
        z: pt.z,
      },
      scale,
      centre,
      corners,
      envelope,
    }
  }

  /// The point the pixel was built from.
  pub fn original(&self) -> Coordinate {
    self.original
  }

  /// Pixel centre in real coordinates. This is the node inserted into
  /// segments that pass through the pixel.
  pub fn coordinate(&self) -> Coordinate {
    self.snapped
  }

  /// Real-space envelope that contains every segment able to hit the pixel.
  pub fn safe_envelope(&self) -> Envelope {
    Envelope::of_point(&self.original).expand_by(SAFE_TOLERANCE / self.scale)
  }

  /// Does the segment `p0 p1` (real coordinates) pass through the pixel?
  pub fn intersects(&self, p0: &Coordinate, p1: &Coordinate) -> bool {
    let p0 = self.to_grid(p0);
    let p1 = self.to_grid(p1);
    if !self.envelope.intersects_segment(&p0, &p1) {
      return false;
    }
    self.intersects_tolerance_square(&p0, &p1)
  }

  fn to_grid(&self, p: &Coordinate) -> Coordinate {
    Coordinate::new(p.x * self.scale, p.y * self.scale)
  }

  // A segment hits the pixel if it crosses a side properly, or passes
  // through the bottom-left corner, or ends at the centre. Touching only
  // the top or right side is not enough.
  fn intersects_tolerance_square(&self, p0: &Coordinate, p1: &Coordinate) -> bool {
    let c = &self.corners;
    let mut li = LineIntersector::new();

    li.compute_intersection(p0, p1, &c[0], &c[1]);
    if li.is_proper() {
      return true;
    }

    li.compute_intersection(p0, p1, &c[1], &c[2]);
    if li.is_proper() {
      return true;
    }
    let hits_left = li.has_intersection();

    li.compute_intersection(p0, p1, &c[2], &c[3]);
    if li.is_proper() {
      return true;
    }
    let hits_bottom = li.has_intersection();

    li.compute_intersection(p0, p1, &c[3], &c[0]);
    if li.is_proper() {
      return true;
    }

    if hits_left && hits_bottom {
      return true;
    }
    *p0 == self.centre || *p1 == self.centre
  }

  /// Node segment `segment_index` of `string` at the pixel centre if the
  /// segment passes through the pixel. Returns whether it did.
  pub fn add_snapped_node<C>(&self, string: &mut SegmentString<C>, segment_index: usize) -> bool {
    let pts = string.coordinates();
    if !self.intersects(&pts[segment_index], &pts[segment_index + 1]) {
      return false;
    }
    string.add_intersection(self.snapped, segment_index);
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
  }

  #[test]
  fn centre_is_rounded() {
    let hp = HotPixel::new(c(4.6, 5.4), 1.0);
    assert_eq!(hp.coordinate(), c(5.0, 5.0));
    assert_eq!(hp.original(), c(4.6, 5.4));
    let hp = HotPixel::new(c(0.123, 0.456), 100.0);
    assert_eq!(hp.coordinate(), c(0.12, 0.46));
  }

  #[test]
  fn crossing_segments_hit() {
    let hp = HotPixel::new(c(5.0, 5.0), 1.0);
    assert!(hp.intersects(&c(0.0, 0.0), &c(10.0, 10.0)));
    assert!(hp.intersects(&c(0.0, 5.2), &c(10.0, 5.2)));
    assert!(hp.intersects(&c(4.7, 0.0), &c(4.7, 10.0)));
  }

  #[test]
  fn distant_segments_miss() {
    let hp = HotPixel::new(c(5.0, 5.0), 1.0);
    assert!(!hp.intersects(&c(0.0, 6.0), &c(10.0, 6.0)));
    assert!(!hp.intersects(&c(0.0, 0.0), &c(10.0, 1.0)));
  }

  #[test]
  fn top_and_right_sides_are_open() {
    let hp = HotPixel::new(c(5.0, 5.0), 1.0);
    assert!(!hp.intersects(&c(0.0, 5.5), &c(10.0, 5.5)));
    assert!(!hp.intersects(&c(5.5, 0.0), &c(5.5, 10.0)));
    assert!(hp.intersects(&c(0.0, 4.5), &c(10.0, 4.5)));
    assert!(hp.intersects(&c(4.5, 0.0), &c(4.5, 10.0)));
  }

  #[test]
  fn segment_ending_at_centre_hits() {
    let hp = HotPixel::new(c(5.0, 5.0), 1.0);
    assert!(hp.intersects(&c(5.0, 5.0), &c(5.2, 5.1)));
    assert!(!hp.intersects(&c(5.1, 5.1), &c(5.2, 5.2)));
  }

  #[test]
  fn scaled_grid() {
    let hp = HotPixel::new(c(0.5, 0.5), 10.0);
    assert!(hp.intersects(&c(0.0, 0.52), &c(1.0, 0.52)));
    assert!(!hp.intersects(&c(0.0, 0.56), &c(1.0, 0.56)));
    let env = hp.safe_envelope();
    assert!(env.contains_point(&c(0.57, 0.43)));
    assert!(!env.contains_point(&c(0.6, 0.5)));
  }

  #[test]
  fn adds_node_at_centre() {
    let hp = HotPixel::new(c(5.2, 4.9), 1.0);
    let mut s = SegmentString::from_coords(vec![c(0.0, 0.0), c(10.0, 10.0)]).unwrap();
    assert!(hp.add_snapped_node(&mut s, 0));
    let node = s.nodes().next().copied().unwrap();
    assert_eq!(node.coord, c(5.0, 5.0));
    let far = HotPixel::new(c(0.0, 9.0), 1.0);
    assert!(!far.add_snapped_node(&mut s, 0));
    assert_eq!(s.node_count(), 1);
  }
}
