use super::HotPixel;
use crate::algorithms::noding::ChainIndex;
use crate::data::{SegmentString, SegmentStringId};

/// Snaps segments to hot pixels, using a chain index to find the segments
/// near each pixel.
///
/// The index must be built over the same strings passed to
/// [`snap`](McIndexPointSnapper::snap). Nodes added while snapping do not
/// invalidate it, since coordinates never change.
#[derive(Debug, Clone, Copy)]
pub struct McIndexPointSnapper<'a> {
  index: &'a ChainIndex,
}

impl<'a> McIndexPointSnapper<'a> {
  pub fn new(index: &'a ChainIndex) -> McIndexPointSnapper<'a> {
    McIndexPointSnapper { index }
  }

  /// Add a node at the pixel centre to every segment that passes through
  /// `pixel`. When the pixel was built from a vertex, `parent` names that
  /// vertex as `(string, vertex index)`, and the two segments meeting there
  /// are left alone. Returns whether any node was added.
  pub fn snap<C>(
    &self,
    pixel: &HotPixel,
    strings: &mut [SegmentString<C>],
    parent: Option<(SegmentStringId, usize)>,
  ) -> bool {
    let env = pixel.safe_envelope();
    let mut candidates = Vec::new();
    for chain in self.index.query(&env) {
      let coords = strings[chain.string.usize()].coordinates();
      chain.select(coords, &env, &mut |seg| candidates.push((chain.string, seg)));
    }

    let mut added = false;
    for (id, seg) in candidates {
      if let Some((parent, vertex)) = parent {
        if parent == id && is_incident(seg, vertex) {
          continue;
        }
      }
      added |= pixel.add_snapped_node(&mut strings[id.usize()], seg);
    }
    added
  }
}

/// Does segment `seg` start or end at vertex `vertex` of the same string?
pub(super) fn is_incident(seg: usize, vertex: usize) -> bool {
  seg == vertex || seg + 1 == vertex
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Coordinate;

  fn line(v: &[(f64, f64)]) -> SegmentString {
    SegmentString::from_coords(v.iter().copied().map(Coordinate::from).collect()).unwrap()
  }

  #[test]
  fn snaps_only_nearby_segments() {
    let mut strings = vec![
      line(&[(0., 0.), (10., 10.)]),
      line(&[(0., 5.2), (10., 5.2)]),
      line(&[(0., 8.), (10., 8.)]),
    ];
    let index = ChainIndex::new(&strings);
    let pixel = HotPixel::new(Coordinate::new(5.0, 5.0), 1.0);
    assert!(McIndexPointSnapper::new(&index).snap(&pixel, &mut strings, None));
    let counts: Vec<usize> = strings.iter().map(SegmentString::node_count).collect();
    assert_eq!(counts, vec![1, 1, 0]);
  }

  #[test]
  fn skips_segments_at_parent_vertex() {
    let mut strings = vec![
      line(&[(0., 0.), (5., 0.), (5., 5.)]),
      line(&[(0., 0.), (10., 0.)]),
    ];
    let index = ChainIndex::new(&strings);
    let snapper = McIndexPointSnapper::new(&index);
    let pixel = HotPixel::new(Coordinate::new(5.0, 0.0), 1.0);
    assert!(snapper.snap(&pixel, &mut strings, Some((SegmentStringId(0), 1))));
    assert_eq!(strings[0].node_count(), 0);
    assert_eq!(strings[1].node_count(), 1);

    let mut alone = vec![line(&[(0., 0.), (5., 0.), (5., 5.)])];
    let index = ChainIndex::new(&alone);
    let snapper = McIndexPointSnapper::new(&index);
    assert!(!snapper.snap(&pixel, &mut alone, Some((SegmentStringId(0), 1))));
  }

  #[test]
  fn nothing_nearby() {
    let mut strings = vec![line(&[(0., 0.), (10., 0.)])];
    let index = ChainIndex::new(&strings);
    let pixel = HotPixel::new(Coordinate::new(5.0, 3.0), 1.0);
    assert!(!McIndexPointSnapper::new(&index).snap(&pixel, &mut strings, None));
    assert_eq!(strings[0].node_count(), 0);
  }
}
