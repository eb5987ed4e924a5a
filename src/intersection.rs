/// Pairwise intersection test between two shapes.
///
/// Returns `None` when the shapes are disjoint and a description of the
/// shared part otherwise.
pub trait Intersects<T = Self> {
  type Result;
  fn intersect(self, other: T) -> Option<Self::Result>;
}
