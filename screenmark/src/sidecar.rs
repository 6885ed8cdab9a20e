use std::path::PathBuf;

use async_trait::async_trait;
use image::DynamicImage;
use screenmark_pipeline::{DetectorConfig, IconDetector, OcrConfig, OcrEngine};
use screenmark_types::DetectionSet;

/// Detector stand-in that replays a JSON detection dump.
///
/// The dump is a serialized [`DetectionSet`], typically exported from a
/// live model run; the confidence cutoff is applied here the way a model
/// backend would apply it.
pub struct SidecarDetector {
    path: PathBuf,
}

impl SidecarDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IconDetector for SidecarDetector {
    async fn detect(
        &self,
        _image: &DynamicImage,
        config: &DetectorConfig,
    ) -> anyhow::Result<DetectionSet> {
        let set = read_dump(&self.path)?;
        Ok(set
            .into_iter()
            .filter(|d| d.confidence.unwrap_or(1.0) >= config.confidence_threshold)
            .collect())
    }
}

/// OCR stand-in that replays a JSON text-box dump.
pub struct SidecarOcr {
    path: PathBuf,
}

impl SidecarOcr {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OcrEngine for SidecarOcr {
    async fn recognize(
        &self,
        _image: &DynamicImage,
        config: &OcrConfig,
    ) -> anyhow::Result<DetectionSet> {
        let set = read_dump(&self.path)?;
        Ok(set
            .into_iter()
            .filter(|d| d.confidence.unwrap_or(1.0) >= config.text_threshold)
            .collect())
    }
}

fn read_dump(path: &PathBuf) -> anyhow::Result<DetectionSet> {
    let bytes = std::fs::read(path)
        .map_err(|err| anyhow::anyhow!("failed to read detection dump {path:?}: {err}"))?;
    Ok(serde_json::from_slice(&bytes)?)
}
