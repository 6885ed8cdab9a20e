use async_trait::async_trait;
use image::DynamicImage;
use screenmark_types::DetectionSet;

use crate::{DetectorConfig, OcrConfig};

/// Icon/element detection model.
///
/// Returns icon boxes in pixel `xyxy` with confidence scores, already cut
/// at `config.confidence_threshold` where the backend supports it.
#[async_trait]
pub trait IconDetector: Send + Sync {
    async fn detect(
        &self,
        image: &DynamicImage,
        config: &DetectorConfig,
    ) -> anyhow::Result<DetectionSet>;
}

/// OCR backend.
///
/// Returns axis-aligned text boxes with recognized strings; backends with
/// polygon output are expected to pre-convert to bounding rectangles.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(
        &self,
        image: &DynamicImage,
        config: &OcrConfig,
    ) -> anyhow::Result<DetectionSet>;
}

/// Caption model for icon crops, batched.
///
/// Must return exactly one description per input crop.
#[async_trait]
pub trait IconCaptioner: Send + Sync {
    async fn caption(&self, crops: &[DynamicImage]) -> anyhow::Result<Vec<String>>;
}
