//! Snap rounding: noding on a fixed precision grid.
//!
//! Every intersection and vertex is rounded to the centre of its grid cell
//! (its *hot pixel*), and every input segment passing through a hot pixel
//! gets a node there. Pieces created by that snapping are not tested
//! against the hot pixels again. Input vertices are expected to lie on the
//! grid already.
mod hot_pixel;
mod point_snapper;
mod snap_rounder;

pub use hot_pixel::HotPixel;
pub use point_snapper::McIndexPointSnapper;
pub use snap_rounder::{SnapRounder, SnapRoundingConfig, VertexSnapStrategy};
