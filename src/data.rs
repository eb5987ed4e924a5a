mod coordinate;
mod envelope;
mod line_segment;
mod precision_model;
mod segment_string;

pub use coordinate::Coordinate;
pub use envelope::Envelope;
pub use line_segment::{LineSegment, SegmentIntersection};
pub use precision_model::PrecisionModel;
pub use segment_string::{SegmentNode, SegmentString, SegmentStringId, SegmentStringView};
