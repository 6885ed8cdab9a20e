mod detection;
mod geometry;
mod screen;

pub use detection::{Detection, DetectionSet, DetectionSource};
pub use geometry::{BoundingBox, CoordSpace};
pub use screen::Screen;
