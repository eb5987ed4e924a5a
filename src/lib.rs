//! Noding and snap rounding of planar line work.
//!
//! A collection of [`SegmentString`](data::SegmentString)s is *noded* when
//! no two of them intersect except at shared endpoints. This crate computes
//! noded arrangements either exactly in floating point
//! ([`McIndexNoder`](algorithms::noding::McIndexNoder)) or on a fixed
//! precision grid ([`SnapRounder`](algorithms::snap_rounding::SnapRounder)),
//! using exact orientation predicates and a monotone chain R-tree.
//!
//! ```
//! use snapround::algorithms::noding::{FastNodingValidator, Noder};
//! use snapround::algorithms::snap_rounding::SnapRounder;
//! use snapround::data::{Coordinate, PrecisionModel, SegmentString};
//!
//! let line = |pts: &[(f64, f64)]| {
//!   SegmentString::from_coords(pts.iter().copied().map(Coordinate::from).collect()).unwrap()
//! };
//! let input = vec![line(&[(0., 0.), (10., 10.)]), line(&[(0., 10.), (10., 0.)])];
//! let mut rounder = SnapRounder::new(PrecisionModel::fixed(1.0).unwrap()).unwrap();
//! let noded = rounder.node(input);
//! assert!(FastNodingValidator::new(&noded).is_valid());
//! ```
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]

pub mod algorithms;
pub mod data;
mod intersection;
mod orientation;

pub use intersection::Intersects;
pub use orientation::{orientation_index, Orientation};

use data::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
  #[error("segment string needs at least 2 coordinates, got {0}")]
  InsufficientCoordinates(usize),
  #[error("non-finite coordinate ({x}, {y})")]
  NonFiniteCoordinate { x: f64, y: f64 },
  #[error("precision scale must be finite and positive, got {0}")]
  InvalidScale(f64),
  #[error("snap rounding requires a fixed precision model")]
  FloatingPrecisionModel,
}

/// Reasons a set of segment strings is not fully noded.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NodingError {
  #[error("found non-noded collapse at {0}")]
  Collapse(Coordinate),
  #[error("found non-noded intersection at {0}")]
  InteriorIntersection(Coordinate),
  #[error("found endpoint/interior pair intersection at {0}")]
  EndpointInteriorIntersection(Coordinate),
}

#[cfg(test)]
pub(crate) mod testing;
