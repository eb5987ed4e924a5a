use super::monotone_chain::{chains, ChainIndex};
use super::{SegmentIntersectionDetector, SegmentIntersector};
use crate::data::{SegmentString, SegmentStringId};

/// Tests whether segment strings intersect a fixed base set. The base set is
/// indexed once and can be queried many times.
#[derive(Debug)]
pub struct SegmentSetIntersectionFinder<'a, C> {
  base: &'a [SegmentString<C>],
  index: ChainIndex,
}

impl<'a, C> SegmentSetIntersectionFinder<'a, C> {
  pub fn new(base: &'a [SegmentString<C>]) -> SegmentSetIntersectionFinder<'a, C> {
    SegmentSetIntersectionFinder {
      base,
      index: ChainIndex::new(base),
    }
  }

  /// Does any segment of `other` intersect any segment of the base set?
  pub fn intersects<D>(&self, other: &[SegmentString<D>]) -> bool {
    let mut detector = SegmentIntersectionDetector::default();
    self.intersects_with(other, &mut detector)
  }

  /// As [`intersects`](SegmentSetIntersectionFinder::intersects), with a
  /// caller configured detector that retains the witness afterwards.
  pub fn intersects_with<D>(
    &self,
    other: &[SegmentString<D>],
    detector: &mut SegmentIntersectionDetector,
  ) -> bool {
    self.process(other, detector);
    detector.has_intersection()
  }

  /// Feed every candidate pair of base and `other` segments to
  /// `intersector`, stopping when it is done. Strings of `other` are
  /// numbered after the base strings.
  pub fn process<D, I: SegmentIntersector>(&self, other: &[SegmentString<D>], intersector: &mut I) {
    let offset = self.base.len();
    let mut next_id = self.index.len();
    for (i, s) in other.iter().enumerate() {
      let id = SegmentStringId(offset + i);
      let view1 = s.view(id);
      for query in chains(s.coordinates(), id, &mut next_id) {
        for base in self.index.query(query.envelope()) {
          let view0 = self.base[base.string.usize()].view(base.string);
          base.compute_overlaps(view0.coords, &query, view1.coords, &mut |i0, i1| {
            intersector.process_intersections(view0, i0, view1, i1)
          });
          if intersector.is_done() {
            return;
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Coordinate;

  fn line(v: &[(f64, f64)]) -> SegmentString {
    SegmentString::from_coords(v.iter().copied().map(Coordinate::from).collect()).unwrap()
  }

  #[test]
  fn detects_crossing_with_base() {
    let base = vec![line(&[(0., 0.), (10., 0.), (10., 10.)])];
    let finder = SegmentSetIntersectionFinder::new(&base);
    assert!(finder.intersects(&[line(&[(5., -5.), (5., 5.)])]));
    assert!(!finder.intersects(&[line(&[(0., 1.), (9., 9.)])]));
  }

  #[test]
  fn self_intersections_of_other_are_ignored() {
    let base = vec![line(&[(100., 100.), (110., 100.)])];
    let finder = SegmentSetIntersectionFinder::new(&base);
    let bow = line(&[(0., 0.), (4., 4.), (4., 0.), (0., 4.)]);
    assert!(!finder.intersects(&[bow]));
  }

  #[test]
  fn detector_keeps_proper_witness() {
    let base = vec![line(&[(0., 0.), (10., 0.)])];
    let finder = SegmentSetIntersectionFinder::new(&base);
    let other = vec![line(&[(10., 0.), (10., 5.)]), line(&[(3., -1.), (3., 1.)])];
    let mut detector = SegmentIntersectionDetector::default().find_proper(true);
    assert!(finder.intersects_with(&other, &mut detector));
    assert!(detector.has_proper_intersection());
    assert!(detector.has_non_proper_intersection());
    assert_eq!(detector.intersection(), Some(Coordinate::new(3.0, 0.0)));
  }
}
