// Strategies for property tests:
//  * grid coordinates
//  * simple rings
//  * line work on an integer grid
use crate::data::Coordinate;

use core::ops::{Range, RangeInclusive};
use proptest::collection::*;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

///////////////////////////////////////////////////////////////////////////////
// Grid coordinates

/// Integer coordinates in `[-extent, extent]`.
pub fn grid_coordinate(extent: i32) -> impl Strategy<Value = Coordinate> {
  let range: RangeInclusive<i32> = -extent..=extent;
  (range.clone(), range).prop_map(|(x, y)| Coordinate::new(f64::from(x), f64::from(y)))
}

///////////////////////////////////////////////////////////////////////////////
// Simple rings

/// Closed, star-shaped rings around the origin. Counter-clockwise or
/// clockwise with equal probability.
pub fn any_simple_ring() -> impl Strategy<Value = Vec<Coordinate>> {
  (3usize..24, any::<u64>(), any::<bool>()).prop_map(|(n, seed, clockwise)| {
    let rng = &mut rand::rngs::SmallRng::seed_from_u64(seed);
    let mut ring: Vec<Coordinate> = (0..n)
      .map(|i| {
        let angle = (i as f64 + rng.gen_range(0.0..0.9)) * TAU / n as f64;
        let radius = rng.gen_range(1.0..50.0);
        Coordinate::new(radius * angle.cos(), radius * angle.sin())
      })
      .collect();
    if clockwise {
      ring.reverse();
    }
    ring.push(ring[0]);
    ring
  })
}

///////////////////////////////////////////////////////////////////////////////
// Grid line work

/// An open path of `len` grid coordinates with no repeated consecutive
/// points.
pub fn grid_line(extent: i32, len: Range<usize>) -> impl Strategy<Value = Vec<Coordinate>> {
  vec(grid_coordinate(extent), len.start.max(2)..len.end.max(3)).prop_filter_map(
    "Needs two distinct points",
    |mut pts| {
      pts.dedup();
      (pts.len() >= 2).then_some(pts)
    },
  )
}

pub fn grid_lines(
  extent: i32,
  len: Range<usize>,
  count: Range<usize>,
) -> impl Strategy<Value = Vec<Vec<Coordinate>>> {
  vec(grid_line(extent, len), count)
}
