use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use image::DynamicImage;
use screenmark_engine::{reconcile, sanitize, suppress};
use screenmark_types::{Detection, DetectionSet, DetectionSource, Screen};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{IconCaptioner, IconDetector, OcrEngine, ParseConfig};

/// Failures of one screen's parse; a batch treats these as skippable.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("detector failed: {0}")]
    Detector(#[source] anyhow::Error),
    #[error("ocr failed: {0}")]
    Ocr(#[source] anyhow::Error),
    #[error("captioner failed: {0}")]
    Captioner(#[source] anyhow::Error),
}

/// The merged, indexed element list for one screenshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedScreen {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub elements: DetectionSet,
}

/// Runs the detect / recognize / reconcile / caption sequence for a
/// screenshot. Holds no mutable state, so one pipeline can serve
/// concurrent callers on independent screens.
pub struct Pipeline {
    detector: Arc<dyn IconDetector>,
    ocr: Arc<dyn OcrEngine>,
    captioner: Option<Arc<dyn IconCaptioner>>,
    config: ParseConfig,
}

impl Pipeline {
    pub fn new(detector: Arc<dyn IconDetector>, ocr: Arc<dyn OcrEngine>, config: ParseConfig) -> Self {
        Self {
            detector,
            ocr,
            captioner: None,
            config,
        }
    }

    pub fn with_captioner(mut self, captioner: Arc<dyn IconCaptioner>) -> Self {
        self.captioner = Some(captioner);
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    #[instrument(level = "info", skip_all, fields(screen = %screen.name))]
    pub async fn parse(&self, screen: &Screen) -> Result<ParsedScreen, ParseError> {
        let raw_icons = self
            .detector
            .detect(&screen.image, &self.config.detector)
            .await
            .map_err(ParseError::Detector)?;
        let icons = suppress(
            &sanitize(&raw_icons, screen.width, screen.height),
            self.config.detector.nms_threshold,
        );

        let raw_text = self
            .ocr
            .recognize(&screen.image, &self.config.ocr)
            .await
            .map_err(ParseError::Ocr)?;
        let text = sanitize(&raw_text, screen.width, screen.height);

        let mut elements = reconcile(&icons, &text, self.config.iou_threshold);
        tracing::info!(
            icons = icons.len(),
            text = text.len(),
            elements = elements.len(),
            "reconciled detections"
        );

        if self.config.caption_icons
            && let Some(captioner) = &self.captioner
        {
            elements = self.caption_missing(screen, elements, captioner).await?;
        }

        let elements = elements
            .into_iter()
            .map(|detection| {
                let bbox = if self.config.coords_in_ratio {
                    detection.bbox.to_ratio(screen.width, screen.height)
                } else {
                    detection.bbox.to_pixel(screen.width, screen.height)
                };
                Detection { bbox, ..detection }
            })
            .collect();

        Ok(ParsedScreen {
            id: screen.id.clone(),
            name: screen.name.clone(),
            width: screen.width,
            height: screen.height,
            elements,
        })
    }

    /// Fills in captions for icon entries that have no OCR text.
    #[instrument(level = "debug", skip_all)]
    async fn caption_missing(
        &self,
        screen: &Screen,
        elements: DetectionSet,
        captioner: &Arc<dyn IconCaptioner>,
    ) -> Result<DetectionSet, ParseError> {
        let mut elements = elements.into_inner();

        let mut pending: Vec<usize> = Vec::new();
        let mut crops: Vec<DynamicImage> = Vec::new();
        for (index, detection) in elements.iter().enumerate() {
            if detection.source != DetectionSource::Icon || detection.content.is_some() {
                continue;
            }
            match detection.bbox.pixel_rect(screen.width, screen.height) {
                Some((x, y, w, h)) => {
                    pending.push(index);
                    crops.push(screen.image.crop_imm(x, y, w, h));
                }
                None => {
                    tracing::warn!(bbox = ?detection.bbox, "skipping caption for degenerate crop")
                }
            }
        }

        let batch_size = self.config.caption_batch_size.max(1);
        for (indices, batch) in pending.chunks(batch_size).zip(crops.chunks(batch_size)) {
            let captions = captioner
                .caption(batch)
                .await
                .map_err(ParseError::Captioner)?;
            for (&index, caption) in indices.iter().zip(captions) {
                elements[index].content = Some(caption);
            }
        }

        Ok(elements.into())
    }

    /// Parses screens one after another, skipping failures and stopping
    /// early when `cancel` is raised.
    #[instrument(level = "info", skip_all, fields(screens = screens.len()))]
    pub async fn parse_all(&self, screens: &[Screen], cancel: &AtomicBool) -> Vec<ParsedScreen> {
        let mut parsed = Vec::with_capacity(screens.len());
        for screen in screens {
            if cancel.load(Ordering::Relaxed) {
                tracing::info!("batch cancelled");
                break;
            }
            match self.parse(screen).await {
                Ok(result) => parsed.push(result),
                Err(err) => {
                    tracing::error!(screen = %screen.name, "skipping screen: {err:#}");
                }
            }
        }
        parsed
    }
}
