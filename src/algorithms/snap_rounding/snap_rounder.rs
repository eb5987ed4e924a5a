use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

use super::point_snapper::is_incident;
use super::{HotPixel, McIndexPointSnapper};
use crate::algorithms::line_intersector::LineIntersector;
use crate::algorithms::noding::{
  ChainIndex, FastNodingValidator, InteriorIntersectionFinder, McIndexNoder, Noder,
};
use crate::data::{Coordinate, PrecisionModel, SegmentString, SegmentStringId};
use crate::Error;

/// How vertices are tested against the segments of every string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexSnapStrategy {
  /// Every vertex against every segment.
  Pairwise,
  /// Only segments found through the chain index.
  Indexed,
  /// `Pairwise` up to [`SnapRoundingConfig::index_threshold`] vertices,
  /// `Indexed` above it.
  #[default]
  Auto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapRoundingConfig {
  pub vertex_snap: VertexSnapStrategy,
  /// Total vertex count above which `Auto` switches to the index.
  pub index_threshold: usize,
  /// Upper bound on pairwise vertex-segment tests. Remaining vertices are
  /// snapped through the index once it is reached.
  pub max_vertex_snap_tests: Option<usize>,
  /// Check the output with a [`FastNodingValidator`] after every pass.
  pub validate: bool,
}

impl Default for SnapRoundingConfig {
  fn default() -> Self {
    SnapRoundingConfig {
      vertex_snap: VertexSnapStrategy::Auto,
      index_threshold: 1024,
      max_vertex_snap_tests: None,
      validate: false,
    }
  }
}

/// Noder that rounds every intersection and vertex to a fixed grid.
///
/// A pass runs in three steps:
///
/// 1. Find every interior intersection, rounded to the grid.
/// 2. Build a hot pixel at each, and node every segment passing through one.
/// 3. Build a hot pixel at each vertex, and node segments passing through it
///    (and the vertex itself, when one does).
///
/// The noded output has every vertex on the grid and no two strings cross
/// away from shared nodes, barring floating point corner cases. Those can
/// be detected with [`SnapRoundingConfig::validate`].
///
/// A pass does not iterate to a fixed point. A piece that snapping bends
/// towards a node may pass through another hot pixel, so rounding the
/// output again can add nodes. It never finds new interior intersections.
///
/// ```
/// use snapround::algorithms::noding::Noder;
/// use snapround::algorithms::snap_rounding::SnapRounder;
/// use snapround::data::{Coordinate, PrecisionModel, SegmentString};
///
/// let line = |a: (f64, f64), b: (f64, f64)| {
///   SegmentString::from_coords(vec![Coordinate::from(a), Coordinate::from(b)]).unwrap()
/// };
/// let mut rounder = SnapRounder::new(PrecisionModel::fixed(1.0).unwrap()).unwrap();
/// let out = rounder.node(vec![line((0., 0.), (10., 10.)), line((0., 10.), (10., 0.))]);
/// assert_eq!(out.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SnapRounder {
  pm: PrecisionModel,
  config: SnapRoundingConfig,
  last_validation: Option<Vec<Coordinate>>,
}

impl SnapRounder {
  /// # Errors
  ///
  /// A floating precision model has no grid to snap to.
  pub fn new(pm: PrecisionModel) -> Result<SnapRounder, Error> {
    SnapRounder::with_config(pm, SnapRoundingConfig::default())
  }

  /// # Errors
  ///
  /// A floating precision model has no grid to snap to.
  pub fn with_config(pm: PrecisionModel, config: SnapRoundingConfig) -> Result<SnapRounder, Error> {
    if pm.is_floating() {
      return Err(Error::FloatingPrecisionModel);
    }
    Ok(SnapRounder {
      pm,
      config,
      last_validation: None,
    })
  }

  pub fn precision_model(&self) -> &PrecisionModel {
    &self.pm
  }

  pub fn config(&self) -> &SnapRoundingConfig {
    &self.config
  }

  /// Interior intersections left in the output of the last pass, if it was
  /// validated. Empty when the output was fully noded.
  pub fn last_validation(&self) -> Option<&[Coordinate]> {
    self.last_validation.as_deref()
  }

  /// Record every snap-rounding node on `strings` without splitting them.
  pub fn snap_round<C>(&self, strings: &mut [SegmentString<C>]) {
    let index = ChainIndex::new(strings);
    let strategy = self.resolve_strategy(strings);

    let pixels = self.intersection_pixels(strings, &index);
    tracing::debug!(
      strings = strings.len(),
      pixels = pixels.len(),
      ?strategy,
      "hot pixels found"
    );
    self.snap_to_pixels(&pixels, strings, &index, strategy);
    self.snap_vertices(strings, &index, strategy);
  }

  fn resolve_strategy<C>(&self, strings: &[SegmentString<C>]) -> VertexSnapStrategy {
    match self.config.vertex_snap {
      VertexSnapStrategy::Auto => {
        let vertices: usize = strings.iter().map(SegmentString::len).sum();
        if vertices > self.config.index_threshold {
          VertexSnapStrategy::Indexed
        } else {
          VertexSnapStrategy::Pairwise
        }
      }
      strategy => strategy,
    }
  }

  // One pixel per distinct grid point.
  fn intersection_pixels<C>(&self, strings: &[SegmentString<C>], index: &ChainIndex) -> Vec<HotPixel> {
    let li = LineIntersector::with_precision_model(self.pm);
    let mut noder = McIndexNoder::new(InteriorIntersectionFinder::find_all(li));
    noder.compute_nodes_with(strings, index);

    let mut seen = BTreeSet::new();
    let scale = self.pm.scale();
    noder
      .into_intersector()
      .into_intersections()
      .into_iter()
      .map(|pt| self.pm.make_precise(pt))
      .filter(|pt| seen.insert((OrderedFloat(pt.x), OrderedFloat(pt.y))))
      .map(|pt| HotPixel::new(pt, scale))
      .collect()
  }

  fn snap_to_pixels<C>(
    &self,
    pixels: &[HotPixel],
    strings: &mut [SegmentString<C>],
    index: &ChainIndex,
    strategy: VertexSnapStrategy,
  ) {
    match strategy {
      VertexSnapStrategy::Indexed => {
        let snapper = McIndexPointSnapper::new(index);
        for pixel in pixels {
          snapper.snap(pixel, strings, None);
        }
      }
      _ => {
        for s in strings.iter_mut() {
          for pixel in pixels {
            for seg in 0..s.len() - 1 {
              pixel.add_snapped_node(s, seg);
            }
          }
        }
      }
    }
  }

  fn snap_vertices<C>(
    &self,
    strings: &mut [SegmentString<C>],
    index: &ChainIndex,
    strategy: VertexSnapStrategy,
  ) {
    let vertices: Vec<(usize, usize)> = strings
      .iter()
      .enumerate()
      .flat_map(|(e, s)| (0..s.len()).map(move |i| (e, i)))
      .collect();

    let first_indexed = match strategy {
      VertexSnapStrategy::Indexed => 0,
      _ => self.snap_vertices_pairwise(strings, &vertices),
    };
    if first_indexed < vertices.len() {
      let snapper = McIndexPointSnapper::new(index);
      for &(e, i) in &vertices[first_indexed..] {
        let v = strings[e].coordinates()[i];
        let pixel = HotPixel::new(v, self.pm.scale());
        if snapper.snap(&pixel, strings, Some((SegmentStringId(e), i))) {
          tracing::trace!(x = v.x, y = v.y, "vertex snapped");
          strings[e].add_intersection(v, i);
        }
      }
    }
  }

  // Returns how many vertices were handled before the test budget ran out.
  fn snap_vertices_pairwise<C>(&self, strings: &mut [SegmentString<C>], vertices: &[(usize, usize)]) -> usize {
    let segments: usize = strings.iter().map(|s| s.len() - 1).sum();
    let mut tests = 0usize;
    for (k, &(e0, i0)) in vertices.iter().enumerate() {
      if let Some(max) = self.config.max_vertex_snap_tests {
        if tests + segments > max {
          tracing::warn!(tests, max, remaining = vertices.len() - k, "vertex snap budget exhausted, using index");
          return k;
        }
      }
      tests += segments;

      let v = strings[e0].coordinates()[i0];
      let pixel = HotPixel::new(v, self.pm.scale());
      let mut added = false;
      for (e1, s) in strings.iter_mut().enumerate() {
        for i1 in 0..s.len() - 1 {
          if e0 == e1 && is_incident(i1, i0) {
            continue;
          }
          added |= pixel.add_snapped_node(s, i1);
        }
      }
      if added {
        tracing::trace!(x = v.x, y = v.y, "vertex snapped");
        strings[e0].add_intersection(v, i0);
      }
    }
    vertices.len()
  }
}

impl<C: Clone> Noder<C> for SnapRounder {
  fn node(&mut self, mut strings: Vec<SegmentString<C>>) -> Vec<SegmentString<C>> {
    self.snap_round(&mut strings);
    let noded = SegmentString::noded_substrings_of(&strings);
    tracing::debug!(input = strings.len(), output = noded.len(), "snap rounded");

    self.last_validation = self.config.validate.then(|| {
      let remaining = FastNodingValidator::new(&noded).find_all(true).intersections().to_vec();
      if !remaining.is_empty() {
        tracing::warn!(count = remaining.len(), first = %remaining[0], "snap rounded output is not fully noded");
      }
      remaining
    });
    noded
  }
}
