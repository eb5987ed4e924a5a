use super::{views, InteriorIntersectionFinder, McIndexNoder};
use crate::algorithms::line_intersector::LineIntersector;
use crate::data::{Coordinate, SegmentString, SegmentStringView};
use crate::NodingError;

///////////////////////////////////////////////////////////////////////////////
// NodingValidator

/// Brute force check that a set of strings is fully noded. Quadratic in the
/// number of segments; meant for tests and diagnostics.
#[derive(Debug)]
pub struct NodingValidator<'a, C> {
  strings: &'a [SegmentString<C>],
}

impl<'a, C> NodingValidator<'a, C> {
  pub fn new(strings: &'a [SegmentString<C>]) -> NodingValidator<'a, C> {
    NodingValidator { strings }
  }

  /// # Errors
  ///
  /// Reports the first collapse (`A-B-A`), interior intersection or string
  /// endpoint touching another string's interior vertex.
  pub fn check_valid(&self) -> Result<(), NodingError> {
    self.check_endpoint_vertices()?;
    self.check_interior_intersections()?;
    self.check_collapses()
  }

  fn check_collapses(&self) -> Result<(), NodingError> {
    for s in self.strings {
      if let Some(w) = s.coordinates().windows(3).find(|w| w[0] == w[2]) {
        return Err(NodingError::Collapse(w[1]));
      }
    }
    Ok(())
  }

  fn check_interior_intersections(&self) -> Result<(), NodingError> {
    let mut li = LineIntersector::new();
    let all: Vec<SegmentStringView<'_>> = views(self.strings).collect();
    for e0 in &all {
      for e1 in &all {
        for i0 in 0..e0.num_segments() {
          for i1 in 0..e1.num_segments() {
            if e0.id == e1.id && i0 == i1 {
              continue;
            }
            let (p00, p01) = e0.segment(i0);
            let (p10, p11) = e1.segment(i1);
            li.compute_intersection(p00, p01, p10, p11);
            if li.is_interior_intersection() {
              return Err(NodingError::InteriorIntersection(li.intersection(0)));
            }
          }
        }
      }
    }
    Ok(())
  }

  fn check_endpoint_vertices(&self) -> Result<(), NodingError> {
    for s in self.strings {
      let pts = s.coordinates();
      for end in [&pts[0], &pts[pts.len() - 1]] {
        let touches_interior = self
          .strings
          .iter()
          .any(|other| interior_vertices(other.coordinates()).contains(end));
        if touches_interior {
          return Err(NodingError::EndpointInteriorIntersection(*end));
        }
      }
    }
    Ok(())
  }
}

fn interior_vertices(pts: &[Coordinate]) -> &[Coordinate] {
  &pts[1..pts.len() - 1]
}

///////////////////////////////////////////////////////////////////////////////
// FastNodingValidator

/// Index based check that no two strings intersect in their interiors.
#[derive(Debug)]
pub struct FastNodingValidator<'a, C> {
  strings: &'a [SegmentString<C>],
  find_all: bool,
  intersections: Option<Vec<Coordinate>>,
}

impl<'a, C> FastNodingValidator<'a, C> {
  pub fn new(strings: &'a [SegmentString<C>]) -> FastNodingValidator<'a, C> {
    FastNodingValidator {
      strings,
      find_all: false,
      intersections: None,
    }
  }

  /// Collect every interior intersection instead of stopping at the first.
  #[must_use]
  pub fn find_all(mut self, yes: bool) -> Self {
    self.find_all = yes;
    self
  }

  pub fn is_valid(&mut self) -> bool {
    self.intersections().is_empty()
  }

  pub fn intersections(&mut self) -> &[Coordinate] {
    let strings = self.strings;
    let find_all = self.find_all;
    self.intersections.get_or_insert_with(|| {
      let li = LineIntersector::new();
      let finder = if find_all {
        InteriorIntersectionFinder::find_all(li)
      } else {
        InteriorIntersectionFinder::find_first(li)
      };
      let mut noder = McIndexNoder::new(finder);
      noder.compute_nodes(strings);
      noder.into_intersector().into_intersections()
    })
  }

  /// # Errors
  ///
  /// Returns the first interior intersection found.
  pub fn check_valid(&mut self) -> Result<(), NodingError> {
    match self.intersections().first() {
      Some(pt) => Err(NodingError::InteriorIntersection(*pt)),
      None => Ok(()),
    }
  }
}
