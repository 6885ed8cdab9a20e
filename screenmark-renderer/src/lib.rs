//! Draws the merged detection set back onto the screenshot as indexed,
//! color-coded overlay marks.

mod overlay;
mod style;

pub use overlay::OverlayRenderer;
pub use style::OverlayStyle;
