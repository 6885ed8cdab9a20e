use screenmark_types::DetectionSet;
use tracing::instrument;

/// Greedy non-maximum suppression within a single detection set.
///
/// Higher-confidence boxes suppress overlapping boxes with IoU above
/// `nms_threshold`; confidence ties fall back to insertion order. The
/// survivors keep their original relative order.
#[instrument(level = "debug", skip_all, fields(len = set.len()))]
pub fn suppress(set: &DetectionSet, nms_threshold: f32) -> DetectionSet {
    let detections = set.as_slice();

    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| {
        let ca = detections[a].confidence.unwrap_or(0.0);
        let cb = detections[b].confidence.unwrap_or(0.0);
        cb.total_cmp(&ca)
    });

    let mut suppressed = vec![false; detections.len()];
    for (rank, &index) in order.iter().enumerate() {
        if suppressed[index] {
            continue;
        }
        for &other in &order[rank + 1..] {
            if suppressed[other] {
                continue;
            }
            if detections[index].bbox.iou(&detections[other].bbox) > nms_threshold {
                suppressed[other] = true;
            }
        }
    }

    detections
        .iter()
        .enumerate()
        .filter(|(index, _)| !suppressed[*index])
        .map(|(_, detection)| detection.clone())
        .collect()
}
