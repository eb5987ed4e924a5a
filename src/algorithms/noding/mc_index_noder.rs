use super::monotone_chain::ChainIndex;
use super::{IntersectionAdder, Noder, SegmentIntersector};
use crate::algorithms::line_intersector::LineIntersector;
use crate::data::{SegmentString, SegmentStringId};

/// Single-pass noder that feeds candidate segment pairs, found through an
/// R-tree of monotone chains, to a [`SegmentIntersector`].
#[derive(Debug, Clone)]
pub struct McIndexNoder<I> {
  intersector: I,
}

impl Default for McIndexNoder<IntersectionAdder> {
  fn default() -> Self {
    McIndexNoder::new(IntersectionAdder::new(LineIntersector::new()))
  }
}

impl<I: SegmentIntersector> McIndexNoder<I> {
  pub fn new(intersector: I) -> McIndexNoder<I> {
    McIndexNoder { intersector }
  }

  pub fn intersector(&self) -> &I {
    &self.intersector
  }

  pub fn intersector_mut(&mut self) -> &mut I {
    &mut self.intersector
  }

  pub fn into_intersector(self) -> I {
    self.intersector
  }

  /// Run the intersector over every candidate pair of segments in
  /// `strings`, including pairs within one string. Each unordered pair of
  /// chains is visited once. Stops as soon as the intersector reports that
  /// it is done.
  pub fn compute_nodes<C>(&mut self, strings: &[SegmentString<C>]) {
    let index = ChainIndex::new(strings);
    self.compute_nodes_with(strings, &index);
  }

  /// As [`compute_nodes`](McIndexNoder::compute_nodes), reusing an index
  /// built over the same `strings`.
  pub fn compute_nodes_with<C>(&mut self, strings: &[SegmentString<C>], index: &ChainIndex) {
    let mut overlaps = 0usize;
    for chain in index.chains() {
      let view0 = strings[chain.string.usize()].view(chain.string);
      for other in index.query(chain.envelope()) {
        if other.id > chain.id {
          let view1 = strings[other.string.usize()].view(other.string);
          let intersector = &mut self.intersector;
          chain.compute_overlaps(view0.coords, other, view1.coords, &mut |i, j| {
            intersector.process_intersections(view0, i, view1, j)
          });
          overlaps += 1;
        }
        if self.intersector.is_done() {
          tracing::debug!(overlaps, "noding stopped early");
          return;
        }
      }
    }
    tracing::debug!(strings = strings.len(), chains = index.len(), overlaps, "chains intersected");
  }
}

impl<C: Clone> Noder<C> for McIndexNoder<IntersectionAdder> {
  fn node(&mut self, mut strings: Vec<SegmentString<C>>) -> Vec<SegmentString<C>> {
    self.compute_nodes(&strings);
    self.intersector.apply(&mut strings);
    SegmentString::noded_substrings_of(&strings)
  }
}

/// Views of every string in a pass, by position.
pub(crate) fn views<C>(strings: &[SegmentString<C>]) -> impl Iterator<Item = crate::data::SegmentStringView<'_>> {
  strings
    .iter()
    .enumerate()
    .map(|(i, s)| s.view(SegmentStringId(i)))
}
