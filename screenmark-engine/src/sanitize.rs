use screenmark_types::{CoordSpace, Detection, DetectionSet};
use tracing::instrument;

/// Drops malformed boxes and clamps the rest to the image bounds.
///
/// Pixel boxes clamp to `[0, width] x [0, height]`, ratio boxes to the
/// unit square. Boxes left with no area after clamping are dropped too.
#[instrument(level = "debug", skip_all, fields(len = set.len()))]
pub fn sanitize(set: &DetectionSet, width: u32, height: u32) -> DetectionSet {
    set.iter()
        .filter_map(|detection| {
            if !detection.bbox.is_well_formed() {
                tracing::warn!(bbox = ?detection.bbox, "dropping malformed box");
                return None;
            }

            let bbox = match detection.bbox.space {
                CoordSpace::Pixel => detection.bbox.clamped(width as f32, height as f32),
                CoordSpace::Ratio => detection.bbox.clamped(1.0, 1.0),
            };
            if bbox.area() == 0.0 {
                tracing::warn!(bbox = ?detection.bbox, "dropping box outside image bounds");
                return None;
            }

            Some(Detection {
                bbox,
                ..detection.clone()
            })
        })
        .collect()
}
