//! Noding: computing every intersection in a collection of segment strings
//! and splitting the strings there.
mod intersection_detector;
mod mc_index_noder;
pub mod monotone_chain;
mod segment_intersector;
mod set_intersection;
mod validator;

pub use intersection_detector::SegmentIntersectionDetector;
pub use mc_index_noder::McIndexNoder;
pub use monotone_chain::{ChainIndex, MonotoneChain};
pub use segment_intersector::{IntersectionAdder, InteriorIntersectionFinder, SegmentIntersector};
pub use set_intersection::SegmentSetIntersectionFinder;
pub use validator::{FastNodingValidator, NodingValidator};

pub(crate) use mc_index_noder::views;

use crate::data::SegmentString;

/// Turns a collection of segment strings into a fully noded one: no two
/// output strings intersect except at shared endpoints.
pub trait Noder<C> {
  fn node(&mut self, strings: Vec<SegmentString<C>>) -> Vec<SegmentString<C>>;
}
