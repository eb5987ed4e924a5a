use crate::algorithms::line_intersector::LineIntersector;
use crate::data::{Coordinate, SegmentString, SegmentStringId, SegmentStringView};

/// Callback invoked by a noder for every candidate pair of segments.
pub trait SegmentIntersector {
  fn process_intersections(
    &mut self,
    e0: SegmentStringView<'_>,
    seg0: usize,
    e1: SegmentStringView<'_>,
    seg1: usize,
  );

  /// Stop the search early. Checked between chain pairs.
  fn is_done(&self) -> bool {
    false
  }
}

fn same_segment(e0: &SegmentStringView<'_>, seg0: usize, e1: &SegmentStringView<'_>, seg1: usize) -> bool {
  e0.id == e1.id && seg0 == seg1
}

fn compute(
  li: &mut LineIntersector,
  e0: &SegmentStringView<'_>,
  seg0: usize,
  e1: &SegmentStringView<'_>,
  seg1: usize,
) {
  let (p00, p01) = e0.segment(seg0);
  let (p10, p11) = e1.segment(seg1);
  li.compute_intersection(p00, p01, p10, p11);
}

///////////////////////////////////////////////////////////////////////////////
// IntersectionAdder

/// Records a node on both strings for every intersection that is not a
/// trivial vertex shared by consecutive segments. The nodes are kept until
/// [`IntersectionAdder::apply`] writes them into the strings.
#[derive(Debug, Clone, Default)]
pub struct IntersectionAdder {
  li: LineIntersector,
  pending: Vec<(SegmentStringId, usize, Coordinate)>,
  pub num_tests: usize,
  pub intersection_count: usize,
  pub interior_count: usize,
  pub proper_count: usize,
  has_proper_interior: bool,
}

impl IntersectionAdder {
  pub fn new(li: LineIntersector) -> IntersectionAdder {
    IntersectionAdder {
      li,
      ..IntersectionAdder::default()
    }
  }

  pub fn has_proper_interior_intersection(&self) -> bool {
    self.has_proper_interior
  }

  /// Nodes found so far, in discovery order.
  pub fn pending(&self) -> &[(SegmentStringId, usize, Coordinate)] {
    &self.pending
  }

  /// Write the recorded nodes into `strings`, which must be the slice the
  /// pass ran over.
  pub fn apply<C>(&mut self, strings: &mut [SegmentString<C>]) {
    for (id, seg, pt) in self.pending.drain(..) {
      strings[id.usize()].add_intersection(pt, seg);
    }
  }

  // A single shared vertex between neighbouring segments of one string is
  // part of the string itself, not an intersection.
  fn is_trivial(&self, e0: &SegmentStringView<'_>, seg0: usize, e1: &SegmentStringView<'_>, seg1: usize) -> bool {
    if e0.id != e1.id || self.li.intersection_num() != 1 {
      return false;
    }
    if seg0.abs_diff(seg1) == 1 {
      return true;
    }
    if e0.is_closed() {
      let last = e0.num_segments() - 1;
      if (seg0 == 0 && seg1 == last) || (seg1 == 0 && seg0 == last) {
        return true;
      }
    }
    false
  }
}

impl SegmentIntersector for IntersectionAdder {
  fn process_intersections(
    &mut self,
    e0: SegmentStringView<'_>,
    seg0: usize,
    e1: SegmentStringView<'_>,
    seg1: usize,
  ) {
    if same_segment(&e0, seg0, &e1, seg1) {
      return;
    }
    self.num_tests += 1;
    compute(&mut self.li, &e0, seg0, &e1, seg1);
    if !self.li.has_intersection() {
      return;
    }
    self.intersection_count += 1;
    if self.li.is_interior_intersection() {
      self.interior_count += 1;
    }
    if self.is_trivial(&e0, seg0, &e1, seg1) {
      return;
    }
    for pt in self.li.intersections() {
      self.pending.push((e0.id, seg0, *pt));
      self.pending.push((e1.id, seg1, *pt));
    }
    if self.li.is_proper() {
      self.proper_count += 1;
      self.has_proper_interior = true;
    }
  }
}

///////////////////////////////////////////////////////////////////////////////
// InteriorIntersectionFinder

/// Collects intersection points that lie in the interior of at least one
/// of the two segments involved.
#[derive(Debug, Clone)]
pub struct InteriorIntersectionFinder {
  li: LineIntersector,
  find_all: bool,
  intersections: Vec<Coordinate>,
  segments: Option<[Coordinate; 4]>,
}

impl InteriorIntersectionFinder {
  /// Never stops early; every interior intersection is recorded.
  pub fn find_all(li: LineIntersector) -> InteriorIntersectionFinder {
    InteriorIntersectionFinder {
      li,
      find_all: true,
      intersections: Vec::new(),
      segments: None,
    }
  }

  /// Stops at the first interior intersection.
  pub fn find_first(li: LineIntersector) -> InteriorIntersectionFinder {
    InteriorIntersectionFinder {
      find_all: false,
      ..InteriorIntersectionFinder::find_all(li)
    }
  }

  pub fn has_intersection(&self) -> bool {
    !self.intersections.is_empty()
  }

  pub fn intersections(&self) -> &[Coordinate] {
    &self.intersections
  }

  pub fn into_intersections(self) -> Vec<Coordinate> {
    self.intersections
  }

  /// Endpoints of the segment pair behind the most recent intersection.
  pub fn intersection_segments(&self) -> Option<&[Coordinate; 4]> {
    self.segments.as_ref()
  }
}

impl SegmentIntersector for InteriorIntersectionFinder {
  fn process_intersections(
    &mut self,
    e0: SegmentStringView<'_>,
    seg0: usize,
    e1: SegmentStringView<'_>,
    seg1: usize,
  ) {
    if self.is_done() || same_segment(&e0, seg0, &e1, seg1) {
      return;
    }
    compute(&mut self.li, &e0, seg0, &e1, seg1);
    if self.li.has_intersection() && self.li.is_interior_intersection() {
      self.intersections.extend_from_slice(self.li.intersections());
      let (p00, p01) = e0.segment(seg0);
      let (p10, p11) = e1.segment(seg1);
      self.segments = Some([*p00, *p01, *p10, *p11]);
    }
  }

  fn is_done(&self) -> bool {
    !self.find_all && self.has_intersection()
  }
}
