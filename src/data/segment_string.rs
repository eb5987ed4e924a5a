use ordered_float::OrderedFloat;
use std::collections::btree_map::{BTreeMap, Entry};

use super::{Coordinate, LineSegment};
use crate::algorithms::line_intersector::LineIntersector;
use crate::Error;

///////////////////////////////////////////////////////////////////////////////
// SegmentStringId

/// Position of a segment string in the slice a noding pass runs over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentStringId(pub usize);

impl SegmentStringId {
  pub fn usize(self) -> usize {
    self.0
  }
}

///////////////////////////////////////////////////////////////////////////////
// SegmentNode

/// A point where a segment string must be split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentNode {
  pub coord: Coordinate,
  /// Index of the segment containing the node.
  pub segment_index: usize,
  /// Clamped position of the node along its segment.
  pub fraction: f64,
  is_interior: bool,
}

impl SegmentNode {
  /// Does the node differ from the start vertex of its segment?
  pub fn is_interior(&self) -> bool {
    self.is_interior
  }
}

// Within a segment the node on its start vertex sorts first.
type NodeKey = (
  usize,
  bool,
  OrderedFloat<f64>,
  OrderedFloat<f64>,
  OrderedFloat<f64>,
);

/// Nodes of one segment string, sorted along the string.
#[derive(Debug, Clone, Default)]
struct SegmentNodeList {
  nodes: BTreeMap<NodeKey, SegmentNode>,
}

impl SegmentNodeList {
  fn add(&mut self, coords: &[Coordinate], coord: Coordinate, segment_index: usize) -> bool {
    let start = coords[segment_index];
    let fraction = match coords.get(segment_index + 1) {
      Some(end) => LineSegment::new(start, *end).segment_fraction(&coord),
      None => 0.0,
    };
    let is_interior = coord != start;
    let key = (
      segment_index,
      is_interior,
      OrderedFloat(fraction),
      OrderedFloat(coord.x),
      OrderedFloat(coord.y),
    );
    match self.nodes.entry(key) {
      Entry::Occupied(_) => false,
      Entry::Vacant(slot) => {
        slot.insert(SegmentNode {
          coord,
          segment_index,
          fraction,
          is_interior,
        });
        true
      }
    }
  }

  fn iter(&self) -> impl Iterator<Item = &SegmentNode> + '_ {
    self.nodes.values()
  }

  fn len(&self) -> usize {
    self.nodes.len()
  }
}

///////////////////////////////////////////////////////////////////////////////
// SegmentString

/// A path of at least two coordinates together with the nodes recorded on
/// it during a noding pass.
///
/// `context` is an arbitrary caller value that is cloned into every noded
/// child, so output line work can be traced back to its source.
#[derive(Debug, Clone)]
pub struct SegmentString<C = ()> {
  coords: Vec<Coordinate>,
  context: C,
  nodes: SegmentNodeList,
}

impl SegmentString<()> {
  pub fn from_coords(coords: Vec<Coordinate>) -> Result<SegmentString<()>, Error> {
    SegmentString::new(coords, ())
  }
}

#[allow(clippy::len_without_is_empty)]
impl<C> SegmentString<C> {
  /// # Errors
  ///
  /// Fails with [`Error::InsufficientCoordinates`] for fewer than two
  /// coordinates and [`Error::NonFiniteCoordinate`] if any ordinate is NaN or
  /// infinite.
  pub fn new(coords: Vec<Coordinate>, context: C) -> Result<SegmentString<C>, Error> {
    if coords.len() < 2 {
      return Err(Error::InsufficientCoordinates(coords.len()));
    }
    if let Some(bad) = coords.iter().find(|c| !c.is_finite()) {
      return Err(Error::NonFiniteCoordinate { x: bad.x, y: bad.y });
    }
    Ok(SegmentString::new_unchecked(coords, context))
  }

  fn new_unchecked(coords: Vec<Coordinate>, context: C) -> SegmentString<C> {
    SegmentString {
      coords,
      context,
      nodes: SegmentNodeList::default(),
    }
  }

  /// Number of coordinates.
  pub fn len(&self) -> usize {
    self.coords.len()
  }

  pub fn coordinates(&self) -> &[Coordinate] {
    &self.coords
  }

  pub fn context(&self) -> &C {
    &self.context
  }

  pub fn is_closed(&self) -> bool {
    self.coords.first() == self.coords.last()
  }

  /// # Panics
  ///
  /// Panics if `i + 1 >= self.len()`.
  pub fn segment(&self, i: usize) -> LineSegment {
    LineSegment::new(self.coords[i], self.coords[i + 1])
  }

  /// Recorded nodes, in order along the string.
  pub fn nodes(&self) -> impl Iterator<Item = &SegmentNode> + '_ {
    self.nodes.iter()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn view(&self, id: SegmentStringId) -> SegmentStringView<'_> {
    SegmentStringView {
      id,
      coords: &self.coords,
    }
  }

  /// Record a node at `coord` on segment `segment_index`. A node equal to
  /// the segment's end vertex is stored as the start of the next segment.
  /// Returns `false` if the node was already present.
  ///
  /// # Panics
  ///
  /// Panics if `segment_index` is not a vertex index of the string.
  pub fn add_intersection(&mut self, coord: Coordinate, segment_index: usize) -> bool {
    let mut index = segment_index;
    if let Some(next) = self.coords.get(segment_index + 1) {
      if *next == coord {
        index += 1;
      }
    }
    self.nodes.add(&self.coords, coord, index)
  }

  /// Record every intersection point currently held by `li` on segment
  /// `segment_index`.
  pub fn add_intersections(&mut self, li: &LineIntersector, segment_index: usize) {
    for pt in li.intersections() {
      self.add_intersection(*pt, segment_index);
    }
  }
}

impl<C: Clone> SegmentString<C> {
  /// Split the string at its nodes.
  ///
  /// Children follow the original path exactly, with a vertex at every
  /// node. Collapsed runs (`A-B-A`) are split at the turning vertex.
  /// Repeated consecutive coordinates are dropped, as are children that
  /// reduce to a single point.
  pub fn noded_substrings(&self) -> Vec<SegmentString<C>> {
    let mut nodes = self.nodes.clone();
    let last = self.coords.len() - 1;
    nodes.add(&self.coords, self.coords[0], 0);
    nodes.add(&self.coords, self.coords[last], last);
    for vertex in self.collapsed_vertices(&nodes) {
      nodes.add(&self.coords, self.coords[vertex], vertex);
    }

    let ordered: Vec<&SegmentNode> = nodes.iter().collect();
    ordered
      .windows(2)
      .filter_map(|pair| self.split_edge(pair[0], pair[1]))
      .collect()
  }

  pub fn noded_substrings_of(strings: &[SegmentString<C>]) -> Vec<SegmentString<C>> {
    strings.iter().flat_map(SegmentString::noded_substrings).collect()
  }

  fn collapsed_vertices(&self, nodes: &SegmentNodeList) -> Vec<usize> {
    let mut collapsed = Vec::new();
    let ordered: Vec<&SegmentNode> = nodes.iter().collect();
    for pair in ordered.windows(2) {
      let (n0, n1) = (pair[0], pair[1]);
      if n0.coord != n1.coord {
        continue;
      }
      let between = (n1.segment_index - n0.segment_index).saturating_sub(usize::from(!n1.is_interior));
      if between == 1 {
        collapsed.push(n0.segment_index + 1);
      }
    }
    for (i, w) in self.coords.windows(3).enumerate() {
      if w[0] == w[2] {
        collapsed.push(i + 1);
      }
    }
    collapsed
  }

  fn split_edge(&self, n0: &SegmentNode, n1: &SegmentNode) -> Option<SegmentString<C>> {
    let mut pts = Vec::with_capacity(n1.segment_index - n0.segment_index + 2);
    pts.push(n0.coord);
    pts.extend_from_slice(&self.coords[n0.segment_index + 1..=n1.segment_index]);
    if n1.is_interior || n1.coord != self.coords[n1.segment_index] {
      pts.push(n1.coord);
    }
    pts.dedup();
    (pts.len() >= 2).then(|| SegmentString::new_unchecked(pts, self.context.clone()))
  }
}

///////////////////////////////////////////////////////////////////////////////
// SegmentStringView

/// Read-only access to one string of a noding pass.
#[derive(Debug, Clone, Copy)]
pub struct SegmentStringView<'a> {
  pub id: SegmentStringId,
  pub coords: &'a [Coordinate],
}

impl<'a> SegmentStringView<'a> {
  pub fn is_closed(&self) -> bool {
    self.coords.first() == self.coords.last()
  }

  pub fn num_segments(&self) -> usize {
    self.coords.len().saturating_sub(1)
  }

  pub fn segment(&self, i: usize) -> (&'a Coordinate, &'a Coordinate) {
    (&self.coords[i], &self.coords[i + 1])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use claims::{assert_err, assert_ok};

  fn line(pts: &[(f64, f64)]) -> SegmentString {
    SegmentString::from_coords(pts.iter().copied().map(Coordinate::from).collect()).unwrap()
  }

  fn coords(s: &SegmentString) -> Vec<(f64, f64)> {
    s.coordinates().iter().map(|c| (c.x, c.y)).collect()
  }

  #[test]
  fn rejects_short_and_non_finite_input() {
    assert_err!(SegmentString::from_coords(vec![Coordinate::new(0.0, 0.0)]));
    assert_err!(SegmentString::from_coords(vec![
      Coordinate::new(0.0, 0.0),
      Coordinate::new(f64::NAN, 1.0)
    ]));
    assert_ok!(SegmentString::new(
      vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
      "context"
    ));
  }

  #[test]
  fn nodes_are_sorted_along_the_string() {
    let mut s = line(&[(0., 0.), (10., 0.), (10., 10.)]);
    assert!(s.add_intersection(Coordinate::new(7.0, 0.0), 0));
    assert!(s.add_intersection(Coordinate::new(10.0, 4.0), 1));
    assert!(s.add_intersection(Coordinate::new(2.0, 0.0), 0));
    assert!(!s.add_intersection(Coordinate::new(7.0, 0.0), 0));
    let order: Vec<(usize, f64)> = s.nodes().map(|n| (n.segment_index, n.coord.x)).collect();
    assert_eq!(order, vec![(0, 2.0), (0, 7.0), (1, 10.0)]);
  }

  #[test]
  fn node_at_next_vertex_is_normalised() {
    let mut s = line(&[(0., 0.), (10., 0.), (10., 10.)]);
    assert!(s.add_intersection(Coordinate::new(10.0, 0.0), 0));
    assert!(!s.add_intersection(Coordinate::new(10.0, 0.0), 1));
    let node = s.nodes().next().copied().unwrap();
    assert_eq!(node.segment_index, 1);
    assert_eq!(node.fraction, 0.0);
    assert!(!node.is_interior());
  }

  #[test]
  fn no_nodes_yields_the_original() {
    let s = line(&[(0., 0.), (10., 0.), (10., 10.)]);
    let parts = s.noded_substrings();
    assert_eq!(parts.len(), 1);
    assert_eq!(coords(&parts[0]), vec![(0., 0.), (10., 0.), (10., 10.)]);
  }

  #[test]
  fn split_at_interior_and_vertex_nodes() {
    let mut s = line(&[(0., 0.), (10., 0.), (10., 10.)]);
    s.add_intersection(Coordinate::new(5.0, 0.0), 0);
    s.add_intersection(Coordinate::new(10.0, 0.0), 0);
    let parts: Vec<_> = s.noded_substrings().iter().map(coords).collect();
    assert_eq!(
      parts,
      vec![
        vec![(0., 0.), (5., 0.)],
        vec![(5., 0.), (10., 0.)],
        vec![(10., 0.), (10., 10.)],
      ]
    );
  }

  #[test]
  fn off_segment_node_is_kept() {
    // A snapped node need not lie exactly on the segment.
    let mut s = line(&[(0., 0.), (10., 1.)]);
    s.add_intersection(Coordinate::new(5.0, 0.0), 0);
    let parts: Vec<_> = s.noded_substrings().iter().map(coords).collect();
    assert_eq!(parts, vec![vec![(0., 0.), (5., 0.)], vec![(5., 0.), (10., 1.)]]);
  }

  #[test]
  fn collapse_in_existing_vertices() {
    let s = line(&[(0., 0.), (5., 0.), (0., 0.), (0., 5.)]);
    let parts: Vec<_> = s.noded_substrings().iter().map(coords).collect();
    assert_eq!(
      parts,
      vec![vec![(0., 0.), (5., 0.)], vec![(5., 0.), (0., 0.), (0., 5.)]]
    );
  }

  #[test]
  fn collapse_from_inserted_nodes() {
    // Two nodes at the same point, one vertex apart.
    let mut s = line(&[(0., 0.), (4., 0.), (4., 1.), (0., 1.)]);
    s.add_intersection(Coordinate::new(2.0, 0.0), 0);
    s.add_intersection(Coordinate::new(2.0, 0.0), 1);
    let nodes: Vec<usize> = s.nodes().map(|n| n.segment_index).collect();
    assert_eq!(nodes, vec![0, 1]);
    let parts: Vec<_> = s.noded_substrings().iter().map(coords).collect();
    assert_eq!(
      parts,
      vec![
        vec![(0., 0.), (2., 0.)],
        vec![(2., 0.), (4., 0.)],
        vec![(4., 0.), (2., 0.)],
        vec![(2., 0.), (4., 1.), (0., 1.)],
      ]
    );
  }

  #[test]
  fn context_is_cloned_into_children() {
    let mut s = SegmentString::new(
      vec![Coordinate::new(0.0, 0.0), Coordinate::new(4.0, 0.0)],
      String::from("edge-7"),
    )
    .unwrap();
    s.add_intersection(Coordinate::new(1.0, 0.0), 0);
    let parts = s.noded_substrings();
    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|p| p.context() == "edge-7"));
    assert_eq!(parts[0].node_count(), 0);
  }

  #[test]
  fn closed_ring() {
    let s = line(&[(0., 0.), (1., 0.), (1., 1.), (0., 0.)]);
    assert!(s.is_closed());
    assert_eq!(s.len(), 4);
    assert_eq!(s.segment(2).p1, Coordinate::new(0.0, 0.0));
    let view = s.view(SegmentStringId(3));
    assert!(view.is_closed());
    assert_eq!(view.num_segments(), 3);
  }

  #[test]
  fn concatenation_reproduces_path() {
    let mut s = line(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]);
    s.add_intersection(Coordinate::new(3.0, 0.0), 0);
    s.add_intersection(Coordinate::new(10.0, 10.0), 1);
    s.add_intersection(Coordinate::new(4.0, 10.0), 2);
    let mut path: Vec<Coordinate> = Vec::new();
    for part in s.noded_substrings() {
      if let Some(last) = path.last() {
        assert_eq!(last, &part.coordinates()[0]);
        path.extend_from_slice(&part.coordinates()[1..]);
      } else {
        path.extend_from_slice(part.coordinates());
      }
    }
    let original: Vec<Coordinate> = [(0., 0.), (3., 0.), (10., 0.), (10., 10.), (4., 10.), (0., 10.)]
      .into_iter()
      .map(Coordinate::from)
      .collect();
    assert_eq!(path, original);
  }
}
