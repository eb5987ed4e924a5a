use super::SegmentIntersector;
use crate::algorithms::line_intersector::LineIntersector;
use crate::data::{Coordinate, SegmentStringView};

/// Detects whether any pair of segments intersects and remembers one
/// witness.
///
/// By default the search stops at the first intersection of any kind.
/// [`find_proper`](SegmentIntersectionDetector::find_proper) keeps going
/// until a proper intersection turns up, and
/// [`find_all_intersection_types`](SegmentIntersectionDetector::find_all_intersection_types)
/// until both a proper and a non-proper one have been seen.
#[derive(Debug, Clone)]
pub struct SegmentIntersectionDetector {
  li: LineIntersector,
  find_proper: bool,
  find_all_types: bool,

  has_intersection: bool,
  has_proper: bool,
  has_non_proper: bool,

  intersection: Option<Coordinate>,
  segments: Option<[Coordinate; 4]>,
}

impl Default for SegmentIntersectionDetector {
  fn default() -> Self {
    SegmentIntersectionDetector::new(LineIntersector::new())
  }
}

impl SegmentIntersectionDetector {
  pub fn new(li: LineIntersector) -> SegmentIntersectionDetector {
    SegmentIntersectionDetector {
      li,
      find_proper: false,
      find_all_types: false,
      has_intersection: false,
      has_proper: false,
      has_non_proper: false,
      intersection: None,
      segments: None,
    }
  }

  #[must_use]
  pub fn find_proper(mut self, yes: bool) -> Self {
    self.find_proper = yes;
    self
  }

  #[must_use]
  pub fn find_all_intersection_types(mut self, yes: bool) -> Self {
    self.find_all_types = yes;
    self
  }

  pub fn has_intersection(&self) -> bool {
    self.has_intersection
  }

  pub fn has_proper_intersection(&self) -> bool {
    self.has_proper
  }

  pub fn has_non_proper_intersection(&self) -> bool {
    self.has_non_proper
  }

  /// The recorded intersection location, if any.
  pub fn intersection(&self) -> Option<Coordinate> {
    self.intersection
  }

  /// Endpoints `[p00, p01, p10, p11]` of the recorded segment pair.
  pub fn intersection_segments(&self) -> Option<&[Coordinate; 4]> {
    self.segments.as_ref()
  }
}

impl SegmentIntersector for SegmentIntersectionDetector {
  fn process_intersections(
    &mut self,
    e0: SegmentStringView<'_>,
    seg0: usize,
    e1: SegmentStringView<'_>,
    seg1: usize,
  ) {
    if e0.id == e1.id && seg0 == seg1 {
      return;
    }
    let (p00, p01) = e0.segment(seg0);
    let (p10, p11) = e1.segment(seg1);
    self.li.compute_intersection(p00, p01, p10, p11);
    if !self.li.has_intersection() {
      return;
    }

    self.has_intersection = true;
    let proper = self.li.is_proper();
    if proper {
      self.has_proper = true;
    } else {
      self.has_non_proper = true;
    }

    // Keep the first witness, or replace it with one of the kind we are
    // looking for.
    let wanted = !self.find_proper || proper;
    if self.intersection.is_none() || wanted {
      self.intersection = Some(self.li.intersection(0));
      self.segments = Some([*p00, *p01, *p10, *p11]);
    }
  }

  fn is_done(&self) -> bool {
    if self.find_all_types {
      return self.has_proper && self.has_non_proper;
    }
    if self.find_proper {
      return self.has_proper;
    }
    self.has_intersection
  }
}
