use rstar::{RTree, RTreeObject, AABB};
use std::fmt;

use crate::data::{Coordinate, Envelope, SegmentString, SegmentStringId};

/// Direction class of a segment: NE, NW, SW, SE.
fn quadrant(p0: &Coordinate, p1: &Coordinate) -> u8 {
  let dx = p1.x - p0.x;
  let dy = p1.y - p0.y;
  match (dx >= 0.0, dy >= 0.0) {
    (true, true) => 0,
    (false, true) => 1,
    (false, false) => 2,
    (true, false) => 3,
  }
}

/// A run of segments `start..end` of one segment string whose directions all
/// fall in the same quadrant. Every vertex of the run lies inside the
/// envelope of any two of its vertices that bracket it, which lets the
/// overlap search bisect on envelopes alone.
#[derive(Debug, Clone)]
pub struct MonotoneChain {
  pub id: usize,
  pub string: SegmentStringId,
  /// Index of the first vertex.
  pub start: usize,
  /// Index of the last vertex.
  pub end: usize,
  envelope: Envelope,
}

impl MonotoneChain {
  pub fn envelope(&self) -> &Envelope {
    &self.envelope
  }

  /// Report every pair of segments `(i, j)` from `self` and `other` whose
  /// subdivision envelopes overlap. `coords` and `other_coords` must be the
  /// coordinates of the strings the chains were built from.
  pub fn compute_overlaps<F>(
    &self,
    coords: &[Coordinate],
    other: &MonotoneChain,
    other_coords: &[Coordinate],
    f: &mut F,
  ) where
    F: FnMut(usize, usize),
  {
    overlaps(
      coords,
      self.start,
      self.end,
      other_coords,
      other.start,
      other.end,
      f,
    );
  }

  /// Report every segment index whose subdivision envelope meets
  /// `search_env`.
  pub fn select<F>(&self, coords: &[Coordinate], search_env: &Envelope, f: &mut F)
  where
    F: FnMut(usize),
  {
    select(coords, search_env, self.start, self.end, f);
  }
}

fn overlaps<F: FnMut(usize, usize)>(
  pts0: &[Coordinate],
  start0: usize,
  end0: usize,
  pts1: &[Coordinate],
  start1: usize,
  end1: usize,
  f: &mut F,
) {
  if end0 - start0 == 1 && end1 - start1 == 1 {
    f(start0, start1);
    return;
  }
  if !Envelope::segments_overlap(&pts0[start0], &pts0[end0], &pts1[start1], &pts1[end1]) {
    return;
  }
  let mid0 = (start0 + end0) / 2;
  let mid1 = (start1 + end1) / 2;
  if start0 < mid0 {
    if start1 < mid1 {
      overlaps(pts0, start0, mid0, pts1, start1, mid1, f);
    }
    if mid1 < end1 {
      overlaps(pts0, start0, mid0, pts1, mid1, end1, f);
    }
  }
  if mid0 < end0 {
    if start1 < mid1 {
      overlaps(pts0, mid0, end0, pts1, start1, mid1, f);
    }
    if mid1 < end1 {
      overlaps(pts0, mid0, end0, pts1, mid1, end1, f);
    }
  }
}

fn select<F: FnMut(usize)>(
  pts: &[Coordinate],
  search_env: &Envelope,
  start: usize,
  end: usize,
  f: &mut F,
) {
  if end - start == 1 {
    f(start);
    return;
  }
  if !search_env.intersects_segment(&pts[start], &pts[end]) {
    return;
  }
  let mid = (start + end) / 2;
  if start < mid {
    select(pts, search_env, start, mid, f);
  }
  if mid < end {
    select(pts, search_env, mid, end, f);
  }
}

impl RTreeObject for MonotoneChain {
  type Envelope = AABB<[f64; 2]>;
  fn envelope(&self) -> Self::Envelope {
    self.envelope.to_aabb()
  }
}

/// Index of the last vertex of the monotone run beginning at `start`.
fn chain_end(pts: &[Coordinate], start: usize) -> usize {
  let last = pts.len() - 1;
  // Zero-length segments have no direction.
  let mut safe = start;
  while safe < last && pts[safe] == pts[safe + 1] {
    safe += 1;
  }
  if safe >= last {
    return last;
  }
  let chain_quad = quadrant(&pts[safe], &pts[safe + 1]);
  let mut end = start + 1;
  while end < pts.len() {
    if pts[end - 1] != pts[end] && quadrant(&pts[end - 1], &pts[end]) != chain_quad {
      break;
    }
    end += 1;
  }
  end - 1
}

/// Split a path into maximal monotone chains. Chain ids continue from
/// `next_id`.
pub fn chains(pts: &[Coordinate], string: SegmentStringId, next_id: &mut usize) -> Vec<MonotoneChain> {
  let mut out = Vec::new();
  if pts.len() < 2 {
    return out;
  }
  let mut start = 0;
  while start < pts.len() - 1 {
    let end = chain_end(pts, start);
    if let Some(envelope) = Envelope::of_points(&pts[start..=end]) {
      out.push(MonotoneChain {
        id: *next_id,
        string,
        start,
        end,
        envelope,
      });
      *next_id += 1;
    }
    start = end;
  }
  out
}

///////////////////////////////////////////////////////////////////////////////
// ChainIndex

/// Bulk-loaded R-tree over the monotone chains of a set of segment strings.
pub struct ChainIndex {
  tree: RTree<MonotoneChain>,
  len: usize,
}

impl fmt::Debug for ChainIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ChainIndex").field("len", &self.len).finish_non_exhaustive()
  }
}

impl ChainIndex {
  pub fn new<C>(strings: &[SegmentString<C>]) -> ChainIndex {
    let mut next_id = 0;
    let all: Vec<MonotoneChain> = strings
      .iter()
      .enumerate()
      .flat_map(|(i, s)| chains(s.coordinates(), SegmentStringId(i), &mut next_id))
      .collect();
    ChainIndex {
      len: all.len(),
      tree: RTree::bulk_load(all),
    }
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn chains(&self) -> impl Iterator<Item = &MonotoneChain> + '_ {
    self.tree.iter()
  }

  /// Chains whose envelope meets `env`.
  pub fn query(&self, env: &Envelope) -> impl Iterator<Item = &MonotoneChain> + '_ {
    self.tree.locate_in_envelope_intersecting(&env.to_aabb())
  }
}
