pub mod line_intersector;
pub mod noding;
pub mod predicates;
pub mod snap_rounding;

#[doc(inline)]
pub use line_intersector::{IntersectionKind, LineIntersector};

#[doc(inline)]
pub use snap_rounding::SnapRounder;
