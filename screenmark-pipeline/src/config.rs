use serde::{Deserialize, Serialize};

/// Icon/element detector knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Minimum model confidence for a box to be reported.
    pub confidence_threshold: f32,
    /// IoU above which overlapping detector boxes suppress each other.
    pub nms_threshold: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.05,
            nms_threshold: 0.45,
        }
    }
}

/// OCR engine knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrConfig {
    /// Group recognized lines into paragraphs.
    pub paragraph: bool,
    /// Minimum text confidence for a box to be reported.
    pub text_threshold: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            paragraph: false,
            text_threshold: 0.9,
        }
    }
}

/// Everything a parse run needs, spelled out instead of passed as loose
/// keyword arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseConfig {
    pub detector: DetectorConfig,
    pub ocr: OcrConfig,
    /// Overlap at or above which a detector box and an OCR box count as
    /// the same screen element.
    pub iou_threshold: f32,
    /// Emit ratio-normalized coordinates instead of pixel `xyxy`.
    pub coords_in_ratio: bool,
    /// Caption icon entries that end up without OCR text.
    pub caption_icons: bool,
    /// Crops per captioner call.
    pub caption_batch_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            ocr: OcrConfig::default(),
            iou_threshold: 0.7,
            coords_in_ratio: true,
            caption_icons: true,
            caption_batch_size: 128,
        }
    }
}
