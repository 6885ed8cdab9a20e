use screenmark_types::{Detection, DetectionSet};
use tracing::instrument;

/// Merges detector boxes and OCR boxes into one labeled set.
///
/// An OCR box whose best IoU against any detector box is positive and at
/// least `iou_threshold` is treated as the same screen element: the
/// detector box is kept and the OCR text attached as its content. OCR
/// boxes with no such match survive as standalone text elements; detector
/// boxes with no match keep `content: None`, awaiting captioning.
///
/// Output ordering is detector entries in insertion order followed by
/// surviving text entries in insertion order; an entry's position is its
/// stable index for overlay labels.
///
/// Both inputs may use pixel or ratio coordinates, but must agree: boxes
/// in different spaces never overlap. Malformed boxes are dropped with a
/// warning. Empty inputs produce an empty output.
#[instrument(level = "debug", skip_all, fields(detector = detector.len(), ocr = ocr.len()))]
pub fn reconcile(detector: &DetectionSet, ocr: &DetectionSet, iou_threshold: f32) -> DetectionSet {
    let iou_threshold = iou_threshold.clamp(0.0, 1.0);

    let detector: Vec<&Detection> = detector.iter().filter(|d| keep(d)).collect();
    let ocr: Vec<&Detection> = ocr.iter().filter(|d| keep(d)).collect();

    // Best absorbed OCR candidate per detector box: (iou, ocr index).
    // Strict comparisons everywhere so earliest insertion order wins ties.
    let mut labels: Vec<Option<(f32, usize)>> = vec![None; detector.len()];
    let mut standalone: Vec<usize> = Vec::new();

    for (ocr_index, text) in ocr.iter().enumerate() {
        let mut best: Option<(usize, f32)> = None;
        for (det_index, icon) in detector.iter().enumerate() {
            let iou = icon.bbox.iou(&text.bbox);
            if iou > best.map_or(0.0, |(_, v)| v) {
                best = Some((det_index, iou));
            }
        }

        match best {
            // A zero-threshold run merges any overlapping pair, never
            // disjoint ones, hence the positivity check.
            Some((det_index, iou)) if iou > 0.0 && iou >= iou_threshold => {
                let better = labels[det_index].is_none_or(|(current, _)| iou > current);
                if better {
                    labels[det_index] = Some((iou, ocr_index));
                }
            }
            _ => standalone.push(ocr_index),
        }
    }

    let mut merged = DetectionSet::new();
    for (det_index, icon) in detector.iter().enumerate() {
        let mut entry = (*icon).clone();
        if let Some((_, ocr_index)) = labels[det_index]
            && let Some(text) = &ocr[ocr_index].content
        {
            entry.content = Some(text.clone());
        }
        merged.push(entry);
    }
    for ocr_index in standalone {
        merged.push(ocr[ocr_index].clone());
    }

    merged
}

fn keep(detection: &Detection) -> bool {
    let ok = detection.bbox.is_well_formed();
    if !ok {
        tracing::warn!(bbox = ?detection.bbox, source = %detection.source, "dropping malformed box");
    }
    ok
}
